//! Dashboard projection of a verdict ("structured JSON log").
//!
//! Same information as [`Verdict`] with the short field names used by the intel dashboard:
//! `agent_response` for the reply and `upi` / `links` / `bank_details` / `phones` / `category`
//! for the extracted intel.

use serde::{Deserialize, Serialize};

use crate::verdict::{Classification, ConversationState, Verdict};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportIntel {
    pub upi: Vec<String>,
    pub links: Vec<String>,
    pub bank_details: Vec<String>,
    pub phones: Vec<String>,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntelReport {
    pub classification: Classification,
    pub confidence_score: f64,
    pub current_state: ConversationState,
    pub agent_response: String,
    pub extracted_intel: ReportIntel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl IntelReport {
    pub fn from_verdict(verdict: &Verdict) -> Self {
        let intel = &verdict.extracted_intel;
        Self {
            classification: verdict.classification,
            confidence_score: verdict.confidence_score,
            current_state: verdict.current_state,
            agent_response: verdict.reply_text.clone(),
            extracted_intel: ReportIntel {
                upi: intel.upi_ids.clone(),
                links: intel.phishing_urls.clone(),
                bank_details: intel.bank_account_numbers.clone(),
                phones: intel.phone_numbers.clone(),
                category: intel.scam_category.clone(),
            },
            explanation: verdict.explanation.clone(),
        }
    }
}

impl From<&Verdict> for IntelReport {
    fn from(verdict: &Verdict) -> Self {
        Self::from_verdict(verdict)
    }
}
