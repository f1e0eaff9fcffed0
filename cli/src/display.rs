//! Plain-text rendering of verdicts and accumulated intel for terminal output.

use honeypot::{AccumulatedIntel, Verdict};

/// Indent for nested fields (one level).
const INDENT: &str = "  ";

/// Truncates a string to at most `max` chars; appends "..." when truncated. UTF-8 safe.
/// `0` means no truncation.
pub fn truncate_display(s: &str, max: usize) -> String {
    const SUFFIX: &str = "...";
    if max == 0 || s.chars().count() <= max {
        return s.to_string();
    }
    if max <= SUFFIX.len() {
        return s.chars().take(max).collect();
    }
    let head: String = s.chars().take(max - SUFFIX.len()).collect();
    format!("{}{}", head, SUFFIX)
}

/// One-line status: `[SCAM 0.92 | ENGAGEMENT]`.
pub fn format_verdict_status(verdict: &Verdict) -> String {
    format!(
        "[{} {:.2} | {}]",
        verdict.classification, verdict.confidence_score, verdict.current_state
    )
}

/// Multi-line verdict: status, explanation (if any), then this turn's intel.
pub fn format_verdict(verdict: &Verdict, max: usize) -> String {
    let mut lines = vec![format_verdict_status(verdict)];
    if let Some(explanation) = &verdict.explanation {
        lines.push(format!("{}why: {}", INDENT, truncate_display(explanation, max)));
    }
    let intel = &verdict.extracted_intel;
    push_list(&mut lines, "upi", &intel.upi_ids);
    push_list(&mut lines, "bank", &intel.bank_account_numbers);
    push_list(&mut lines, "links", &intel.phishing_urls);
    push_list(&mut lines, "phones", &intel.phone_numbers);
    lines.join("\n")
}

/// Accumulated intel, one list per line; empty lists are shown as `-`.
pub fn format_intel(intel: &AccumulatedIntel) -> String {
    let show = |values: &[String]| {
        if values.is_empty() {
            "-".to_string()
        } else {
            values.join(", ")
        }
    };
    [
        format!("category: {}", intel.scam_category),
        format!("{}upi:    {}", INDENT, show(&intel.upi_ids)),
        format!("{}bank:   {}", INDENT, show(&intel.bank_account_numbers)),
        format!("{}links:  {}", INDENT, show(&intel.phishing_urls)),
        format!("{}phones: {}", INDENT, show(&intel.phone_numbers)),
    ]
    .join("\n")
}

fn push_list(lines: &mut Vec<String>, label: &str, values: &[String]) {
    if !values.is_empty() {
        lines.push(format!("{}{}: {}", INDENT, label, values.join(", ")));
    }
}
