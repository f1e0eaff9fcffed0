//! Verdict wire types: classification, engagement state and per-turn intel.
//!
//! These serialize to the verdict JSON schema that API callers depend on. Parsing of
//! untrusted model output into a [`Verdict`] lives in [`crate::processor`].

use serde::{Deserialize, Serialize};

/// Category value meaning "not determined"; never overrides an accumulated category.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Reply used by the fallback verdict.
pub const FALLBACK_REPLY: &str = "Sorry, I didn't quite catch that. Could you repeat?";

/// Intent classification of the scammer's messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Classification {
    Scam,
    Legit,
    Uncertain,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Scam => "SCAM",
            Classification::Legit => "LEGIT",
            Classification::Uncertain => "UNCERTAIN",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engagement stage reported by the judgement capability.
///
/// This is an observed label, not an enforced state: any value may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConversationState {
    Detection,
    Engagement,
    Extraction,
}

impl ConversationState {
    pub fn as_str(self) -> &'static str {
        match self {
            ConversationState::Detection => "DETECTION",
            ConversationState::Engagement => "ENGAGEMENT",
            ConversationState::Extraction => "EXTRACTION",
        }
    }
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifiers extracted from a single turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntelFragment {
    pub upi_ids: Vec<String>,
    pub bank_account_numbers: Vec<String>,
    pub phishing_urls: Vec<String>,
    pub phone_numbers: Vec<String>,
    #[serde(default = "unknown_category")]
    pub scam_category: String,
}

fn unknown_category() -> String {
    UNKNOWN_CATEGORY.to_string()
}

impl Default for IntelFragment {
    fn default() -> Self {
        Self {
            upi_ids: Vec::new(),
            bank_account_numbers: Vec::new(),
            phishing_urls: Vec::new(),
            phone_numbers: Vec::new(),
            scam_category: unknown_category(),
        }
    }
}

impl IntelFragment {
    /// True when no identifier list has an entry (the category is not considered).
    pub fn is_empty(&self) -> bool {
        self.upi_ids.is_empty()
            && self.bank_account_numbers.is_empty()
            && self.phishing_urls.is_empty()
            && self.phone_numbers.is_empty()
    }
}

/// Structured judgement for one conversational turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub classification: Classification,
    /// Always within `[0.0, 1.0]`.
    pub confidence_score: f64,
    pub current_state: ConversationState,
    pub reply_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub extracted_intel: IntelFragment,
}

impl Verdict {
    /// The zero-value verdict returned whenever the judgement pipeline fails.
    ///
    /// `note` becomes the explanation; everything else is fixed.
    pub fn fallback(note: impl Into<String>) -> Self {
        Self {
            classification: Classification::Uncertain,
            confidence_score: 0.0,
            current_state: ConversationState::Detection,
            reply_text: FALLBACK_REPLY.to_string(),
            explanation: Some(note.into()),
            extracted_intel: IntelFragment::default(),
        }
    }

    /// True when this verdict has the fixed fallback shape (any explanation).
    pub fn is_fallback(&self) -> bool {
        self.classification == Classification::Uncertain
            && self.confidence_score == 0.0
            && self.current_state == ConversationState::Detection
            && self.reply_text == FALLBACK_REPLY
            && self.extracted_intel == IntelFragment::default()
    }
}

/// Clamps a confidence score into `[0, 1]`; non-finite values become `0.0`.
pub fn clamp_confidence(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
