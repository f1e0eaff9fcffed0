//! Mock adversary: synthesizes scammer messages for demos and end-to-end runs.
//!
//! Uses the same [`LlmClient`] seam as the turn processor with an attacker-impersonation prompt.
//! Never fails: a call error yields [`FALLBACK_SCAM_MESSAGE`], an empty completion yields
//! [`EMPTY_COMPLETION_MESSAGE`].

use std::sync::Arc;

use tracing::warn;

use crate::llm::{CompletionOptions, LlmClient};
use crate::message::Message;
use crate::turn::{Sender, Turn};

/// Returned when the adversary call fails.
pub const FALLBACK_SCAM_MESSAGE: &str = "Click this link: www.fallback-scam.com";

/// Returned when the adversary call succeeds with empty text.
pub const EMPTY_COMPLETION_MESSAGE: &str = "Hello, I have an offer for you.";

/// Default sampling temperature for adversary calls.
pub const DEFAULT_ADVERSARY_TEMPERATURE: f32 = 0.9;

/// Scam scenario the adversary plays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScamScenario {
    Lottery,
    PartTimeJob,
    BankKyc,
    Sextortion,
    /// Free-form scenario description.
    Custom(String),
}

impl ScamScenario {
    /// Preset scenarios in display order.
    pub const PRESETS: [ScamScenario; 4] = [
        ScamScenario::Lottery,
        ScamScenario::PartTimeJob,
        ScamScenario::BankKyc,
        ScamScenario::Sextortion,
    ];

    /// Scenario description used in the prompt.
    pub fn description(&self) -> &str {
        match self {
            ScamScenario::Lottery => "Lottery Fraud",
            ScamScenario::PartTimeJob => "Part-time Job Scam",
            ScamScenario::BankKyc => "Bank KYC Phishing",
            ScamScenario::Sextortion => "Sextortion or Blackmail",
            ScamScenario::Custom(s) => s,
        }
    }
}

impl std::fmt::Display for ScamScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

impl std::str::FromStr for ScamScenario {
    type Err = String;

    /// Short names (`lottery`, `job`, `kyc`, `sextortion`) and preset descriptions map to
    /// presets; any other non-empty text is a custom scenario.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("scenario must be non-empty".to_string());
        }
        let preset = match trimmed.to_lowercase().as_str() {
            "lottery" | "lottery fraud" => Some(ScamScenario::Lottery),
            "job" | "part-time-job" | "part-time job scam" => Some(ScamScenario::PartTimeJob),
            "kyc" | "bank-kyc" | "bank kyc phishing" => Some(ScamScenario::BankKyc),
            "sextortion" | "sextortion or blackmail" => Some(ScamScenario::Sextortion),
            _ => None,
        };
        Ok(preset.unwrap_or_else(|| ScamScenario::Custom(trimmed.to_string())))
    }
}

/// Generates the next scammer message for a scenario.
pub struct AdversaryGenerator {
    llm: Arc<dyn LlmClient>,
    temperature: f32,
}

impl AdversaryGenerator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            temperature: DEFAULT_ADVERSARY_TEMPERATURE,
        }
    }

    /// Set temperature (builder).
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Next scammer message given the conversation so far.
    pub async fn generate(&self, scenario: &ScamScenario, history: &[Turn]) -> String {
        let messages = build_adversary_prompt(scenario, history);
        let options = CompletionOptions::default().with_temperature(self.temperature);
        match self.llm.invoke(&messages, &options).await {
            Ok(resp) => {
                let text = resp.content.trim().trim_matches('"').trim();
                if text.is_empty() {
                    EMPTY_COMPLETION_MESSAGE.to_string()
                } else {
                    text.to_string()
                }
            }
            Err(e) => {
                warn!(error = %e, scenario = %scenario, "adversary generation failed");
                FALLBACK_SCAM_MESSAGE.to_string()
            }
        }
    }
}

fn build_adversary_prompt(scenario: &ScamScenario, history: &[Turn]) -> Vec<Message> {
    let transcript = history
        .iter()
        .map(|t| {
            let who = match t.sender() {
                Sender::Scammer => "You (Scammer)",
                Sender::Agent => "Target (Aarav)",
            };
            format!("{}: {}", who, t.text())
        })
        .collect::<Vec<_>>()
        .join("\n");
    let system = format!(
        "You are simulating a cybercriminal for a scam-detection test harness. \
         Your goal is to trick the target into a {} scam.\n\
         - If this is the first message, start with the hook.\n\
         - If the target is responding, push them to send money (UPI/bank) or click a link.\n\
         - Invent fake UPI IDs (e.g. boss@scambank) or links (e.g. www.phish-login.com) when \
         needed so the target's extraction logic is exercised.",
        scenario.description()
    );
    let user = format!(
        "Conversation history:\n{}\n\nTask: write the next short message sent by the scammer. \
         Output only the message text, without quotes.",
        if transcript.is_empty() {
            "(none yet)"
        } else {
            transcript.as_str()
        }
    );
    vec![Message::system(system), Message::user(user)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;

    #[test]
    fn parses_short_names_and_custom() {
        assert_eq!("lottery".parse::<ScamScenario>().unwrap(), ScamScenario::Lottery);
        assert_eq!("KYC".parse::<ScamScenario>().unwrap(), ScamScenario::BankKyc);
        assert_eq!(
            "Part-time Job Scam".parse::<ScamScenario>().unwrap(),
            ScamScenario::PartTimeJob
        );
        assert_eq!(
            "crypto giveaway".parse::<ScamScenario>().unwrap(),
            ScamScenario::Custom("crypto giveaway".to_string())
        );
        assert!("  ".parse::<ScamScenario>().is_err());
    }

    #[tokio::test]
    async fn returns_trimmed_completion() {
        let llm = Arc::new(MockLlm::with_content("  \"Pay ₹500 to boss@scambank\"  "));
        let gen = AdversaryGenerator::new(llm.clone());
        let msg = gen.generate(&ScamScenario::Lottery, &[]).await;
        assert_eq!(msg, "Pay ₹500 to boss@scambank");
        let prompt = llm.last_prompt().unwrap();
        assert!(prompt[0].content().contains("Lottery Fraud"));
    }

    #[tokio::test]
    async fn failure_returns_fixed_fallback() {
        let gen = AdversaryGenerator::new(Arc::new(MockLlm::failing("down")));
        let msg = gen.generate(&ScamScenario::BankKyc, &[]).await;
        assert_eq!(msg, FALLBACK_SCAM_MESSAGE);
    }

    #[tokio::test]
    async fn empty_completion_returns_greeting() {
        let gen = AdversaryGenerator::new(Arc::new(MockLlm::with_content("   ")));
        let msg = gen.generate(&ScamScenario::Sextortion, &[]).await;
        assert_eq!(msg, EMPTY_COMPLETION_MESSAGE);
    }

    #[tokio::test]
    async fn history_is_rendered_from_scammer_point_of_view() {
        let llm = Arc::new(MockLlm::with_content("next"));
        let gen = AdversaryGenerator::new(llm.clone());
        let history = vec![
            Turn::scammer("You won!"),
            Turn::from_parts(Sender::Agent, "Really?"),
        ];
        gen.generate(&ScamScenario::Lottery, &history).await;
        let user = llm.last_prompt().unwrap()[1].content().to_string();
        assert!(user.contains("You (Scammer): You won!"));
        assert!(user.contains("Target (Aarav): Really?"));
    }
}
