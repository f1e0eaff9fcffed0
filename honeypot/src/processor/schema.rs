//! Verdict output schema and strict parsing of model output.
//!
//! Model output is an untrusted payload. It is deserialized into raw structs whose required
//! fields have no defaults, so a missing list, a bad enum value or a non-JSON reply is a
//! [`HoneypotError::MalformedResponse`]. The only tolerated deviations are a Markdown code fence
//! around the JSON, an absent or out-of-range `confidence_score` (defaulted / clamped) and an
//! absent or blank `scam_category` (`"Unknown"`).

use serde::Deserialize;
use serde_json::json;

use crate::error::HoneypotError;
use crate::llm::JsonSchemaFormat;
use crate::verdict::{
    clamp_confidence, Classification, ConversationState, IntelFragment, Verdict, UNKNOWN_CATEGORY,
};

/// Schema name sent to the provider.
pub const VERDICT_SCHEMA_NAME: &str = "honeypot_verdict";

/// JSON schema of the verdict; all four intel lists are required.
pub fn verdict_schema() -> serde_json::Value {
    let string_list = json!({ "type": "array", "items": { "type": "string" } });
    json!({
        "type": "object",
        "properties": {
            "classification": {
                "type": "string",
                "enum": ["SCAM", "LEGIT", "UNCERTAIN"],
                "description": "Classify the scammer's intent."
            },
            "confidence_score": {
                "type": "number",
                "description": "Confidence score between 0 and 1."
            },
            "current_state": {
                "type": "string",
                "enum": ["DETECTION", "ENGAGEMENT", "EXTRACTION"],
                "description": "Current stage of the honey-pot operation."
            },
            "reply_text": {
                "type": "string",
                "description": "The persona's reply to the scammer."
            },
            "explanation": {
                "type": "string",
                "description": "Brief internal reasoning for the classification and state."
            },
            "extracted_intel": {
                "type": "object",
                "properties": {
                    "upi_ids": string_list.clone(),
                    "bank_account_numbers": string_list.clone(),
                    "phishing_urls": string_list.clone(),
                    "phone_numbers": string_list,
                    "scam_category": {
                        "type": "string",
                        "description":
                            "Type of scam (e.g. Job, Crypto, Lottery, Sextortion) or Unknown."
                    }
                },
                "required": ["upi_ids", "bank_account_numbers", "phishing_urls", "phone_numbers"]
            }
        },
        "required": [
            "classification",
            "confidence_score",
            "current_state",
            "reply_text",
            "extracted_intel"
        ]
    })
}

/// Output format passed to the LLM client.
pub fn verdict_format() -> JsonSchemaFormat {
    JsonSchemaFormat {
        name: VERDICT_SCHEMA_NAME.to_string(),
        description: Some("Honey-pot judgement for one scammer message".to_string()),
        schema: verdict_schema(),
    }
}

#[derive(Deserialize)]
struct RawVerdict {
    classification: Classification,
    confidence_score: Option<f64>,
    current_state: ConversationState,
    reply_text: String,
    explanation: Option<String>,
    extracted_intel: RawIntel,
}

#[derive(Deserialize)]
struct RawIntel {
    upi_ids: Vec<String>,
    bank_account_numbers: Vec<String>,
    phishing_urls: Vec<String>,
    phone_numbers: Vec<String>,
    scam_category: Option<String>,
}

/// Removes a surrounding Markdown code fence (```` ``` ```` or ```` ```json ````), if any.
///
/// A `json` tag is dropped whether or not a newline follows it; any other tag must end its line.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let body = match rest.find('\n') {
        Some(i) if rest[..i].trim().chars().all(|c| c.is_ascii_alphanumeric()) => &rest[i + 1..],
        _ => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parses model output into a [`Verdict`].
pub fn parse_verdict(text: &str) -> Result<Verdict, HoneypotError> {
    let payload = strip_code_fence(text);
    if payload.is_empty() {
        return Err(HoneypotError::MalformedResponse(
            "empty model output".to_string(),
        ));
    }
    let raw: RawVerdict = serde_json::from_str(payload)
        .map_err(|e| HoneypotError::MalformedResponse(e.to_string()))?;
    if raw.reply_text.trim().is_empty() {
        return Err(HoneypotError::MalformedResponse(
            "reply_text is empty".to_string(),
        ));
    }
    let scam_category = raw
        .extracted_intel
        .scam_category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
    Ok(Verdict {
        classification: raw.classification,
        confidence_score: raw.confidence_score.map(clamp_confidence).unwrap_or(0.0),
        current_state: raw.current_state,
        reply_text: raw.reply_text,
        explanation: raw.explanation.filter(|e| !e.trim().is_empty()),
        extracted_intel: IntelFragment {
            upi_ids: raw.extracted_intel.upi_ids,
            bank_account_numbers: raw.extracted_intel.bank_account_numbers,
            phishing_urls: raw.extracted_intel.phishing_urls,
            phone_numbers: raw.extracted_intel.phone_numbers,
            scam_category,
        },
    })
}
