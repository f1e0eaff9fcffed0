//! Intel accumulator: session-wide union of per-turn fragments.
//!
//! [`merge`] is the reducer applied after every processed turn. It is pure and monotonic:
//! list values are only ever added, and the category only changes to a known value.

use serde::{Deserialize, Serialize};

use crate::verdict::{IntelFragment, UNKNOWN_CATEGORY};

/// Running totals of all intel seen in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulatedIntel {
    pub upi_ids: Vec<String>,
    pub bank_account_numbers: Vec<String>,
    pub phishing_urls: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub scam_category: String,
}

impl Default for AccumulatedIntel {
    fn default() -> Self {
        Self {
            upi_ids: Vec::new(),
            bank_account_numbers: Vec::new(),
            phishing_urls: Vec::new(),
            phone_numbers: Vec::new(),
            scam_category: UNKNOWN_CATEGORY.to_string(),
        }
    }
}

impl AccumulatedIntel {
    /// Empty totals, as at session start.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when at least one identifier has been collected.
    pub fn has_intel(&self) -> bool {
        self.indicator_count() > 0
    }

    /// Total number of distinct identifiers across all lists.
    pub fn indicator_count(&self) -> usize {
        self.upi_ids.len()
            + self.bank_account_numbers.len()
            + self.phishing_urls.len()
            + self.phone_numbers.len()
    }
}

/// Merges one turn's fragment into the accumulated intel.
///
/// Lists: previous order kept, then each value of `fragment` not yet present, in fragment
/// order (exact string equality). Category: replaced only by a value other than `"Unknown"`.
pub fn merge(previous: &AccumulatedIntel, fragment: &IntelFragment) -> AccumulatedIntel {
    AccumulatedIntel {
        upi_ids: union(&previous.upi_ids, &fragment.upi_ids),
        bank_account_numbers: union(
            &previous.bank_account_numbers,
            &fragment.bank_account_numbers,
        ),
        phishing_urls: union(&previous.phishing_urls, &fragment.phishing_urls),
        phone_numbers: union(&previous.phone_numbers, &fragment.phone_numbers),
        scam_category: if fragment.scam_category != UNKNOWN_CATEGORY {
            fragment.scam_category.clone()
        } else {
            previous.scam_category.clone()
        },
    }
}

fn union(previous: &[String], incoming: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(previous.len() + incoming.len());
    for value in previous.iter().chain(incoming) {
        if !out.contains(value) {
            out.push(value.clone());
        }
    }
    out
}
