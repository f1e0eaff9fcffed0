//! Library side of the `honeypot` binary: backend selection, simulation driver, and display
//! helpers shared by the `chat` and `simulate` subcommands.

pub mod display;

use std::sync::Arc;

use config::Settings;
use honeypot::{
    AdversaryGenerator, ChatOpenAI, LlmClient, MockLlm, ScamScenario, Session, TurnProcessor,
    Verdict,
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Canned judgement returned by the offline (`--mock`) backend.
pub const MOCK_VERDICT: &str = r#"{
  "classification": "SCAM",
  "confidence_score": 0.85,
  "current_state": "ENGAGEMENT",
  "reply_text": "Wait, really? I never win anything! What do I need to do?",
  "explanation": "Offline mock verdict.",
  "extracted_intel": {
    "upi_ids": ["claim.prize@okaxis"],
    "bank_account_numbers": [],
    "phishing_urls": ["www.lucky-draw-claim.in"],
    "phone_numbers": [],
    "scam_category": "Lottery Fraud"
  }
}"#;

/// Canned scammer line returned by the offline (`--mock`) adversary.
pub const MOCK_SCAM_MESSAGE: &str = "Congratulations! You won Rs 25,00,000 in the KBC lucky draw. \
Pay Rs 500 processing fee to claim.prize@okaxis or visit www.lucky-draw-claim.in";

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config: {0}")]
    Settings(#[from] config::SettingsError),
    #[error("invalid scenario: {0}")]
    Scenario(String),
}

/// LLM clients for the judge and the adversary.
pub struct Backends {
    pub judge: Arc<dyn LlmClient>,
    pub adversary: Arc<dyn LlmClient>,
}

impl Backends {
    /// Real OpenAI-compatible clients for `settings.model`, or offline mocks when `mock` is set.
    pub fn new(settings: &Settings, mock: bool) -> Self {
        if mock {
            debug!("using offline mock backends");
            return Self {
                judge: Arc::new(MockLlm::with_content(MOCK_VERDICT)),
                adversary: Arc::new(MockLlm::with_content(MOCK_SCAM_MESSAGE)),
            };
        }
        let client: Arc<dyn LlmClient> = Arc::new(ChatOpenAI::new(settings.model.clone()));
        Self {
            judge: client.clone(),
            adversary: client,
        }
    }

    /// Turn processor configured from `settings`.
    pub fn processor(&self, settings: &Settings) -> TurnProcessor {
        TurnProcessor::new(self.judge.clone())
            .with_temperature(settings.judge_temperature)
            .with_timeout(settings.turn_timeout)
    }

    /// Adversary configured from `settings`.
    pub fn adversary(&self, settings: &Settings) -> AdversaryGenerator {
        AdversaryGenerator::new(self.adversary.clone())
            .with_temperature(settings.adversary_temperature)
    }
}

/// One simulated exchange: the generated scam message and the verdict it produced.
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    pub scam_message: String,
    pub verdict: Verdict,
}

/// Runs `turns` adversary-driven exchanges on `session`, calling `on_exchange` after each.
pub async fn run_simulation<F>(
    session: &mut Session,
    generator: &AdversaryGenerator,
    scenario: &ScamScenario,
    turns: usize,
    mut on_exchange: F,
) -> Vec<Exchange>
where
    F: FnMut(usize, &Exchange),
{
    let mut exchanges = Vec::with_capacity(turns);
    for index in 0..turns {
        let (scam_message, verdict) = session.simulate(generator, scenario).await;
        let exchange = Exchange {
            scam_message,
            verdict: verdict.clone(),
        };
        on_exchange(index, &exchange);
        exchanges.push(exchange);
    }
    exchanges
}

/// Reads settings from the environment and applies the `--model` override.
pub fn load_settings(model: Option<String>) -> Result<Settings, CliError> {
    Ok(with_model(Settings::from_env()?, model))
}

/// Replaces `settings.model` when an override is given.
pub fn with_model(mut settings: Settings, model: Option<String>) -> Settings {
    if let Some(model) = model {
        settings.model = model;
    }
    settings
}

/// Preset scenario names, comma separated, for help and error text.
pub fn preset_list() -> String {
    ScamScenario::PRESETS
        .iter()
        .map(|s| s.description())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parses a `--scenario` value.
pub fn parse_scenario(s: &str) -> Result<ScamScenario, CliError> {
    s.parse()
        .map_err(|e| CliError::Scenario(format!("{} (presets: {})", e, preset_list())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use honeypot::{Classification, ConversationState, Sender};

    fn settings() -> Settings {
        Settings::from_lookup(|_| None).unwrap()
    }

    #[test]
    fn mock_verdict_is_a_valid_verdict() {
        let v: Verdict = serde_json::from_str(MOCK_VERDICT).unwrap();
        assert_eq!(v.classification, Classification::Scam);
        assert_eq!(v.current_state, ConversationState::Engagement);
    }

    #[test]
    fn with_model_applies_override() {
        let s = with_model(settings(), Some("gpt-4o".into()));
        assert_eq!(s.model, "gpt-4o");
        let s = with_model(settings(), None);
        assert_eq!(s.model, config::DEFAULT_MODEL);
    }

    #[test]
    fn invalid_settings_become_cli_errors() {
        let err: CliError = Settings::from_lookup(|k| (k == "PORT").then(|| "eighty".to_string()))
            .unwrap_err()
            .into();
        assert!(matches!(err, CliError::Settings(_)));
        assert!(err.to_string().starts_with("config: invalid PORT"));
    }

    #[test]
    fn blank_scenario_error_lists_presets() {
        let err = parse_scenario("").unwrap_err();
        let text = err.to_string();
        assert!(text.contains("Lottery Fraud"), "{}", text);
        assert!(text.contains("Sextortion or Blackmail"), "{}", text);
    }

    #[test]
    fn parse_scenario_maps_presets_and_rejects_blank() {
        assert_eq!(parse_scenario("kyc").unwrap(), ScamScenario::BankKyc);
        assert_eq!(
            parse_scenario("fake courier").unwrap(),
            ScamScenario::Custom("fake courier".into())
        );
        assert!(matches!(parse_scenario("  "), Err(CliError::Scenario(_))));
    }

    /// **Scenario**: offline simulation records two turns per exchange and accumulates intel.
    #[tokio::test]
    async fn mock_simulation_runs_offline() {
        let settings = settings();
        let backends = Backends::new(&settings, true);
        let mut session = Session::new(Arc::new(backends.processor(&settings)));
        let generator = backends.adversary(&settings);

        let mut seen = Vec::new();
        let exchanges = run_simulation(
            &mut session,
            &generator,
            &ScamScenario::Lottery,
            2,
            |i, _| seen.push(i),
        )
        .await;

        assert_eq!(seen, vec![0, 1]);
        assert_eq!(exchanges.len(), 2);
        assert_eq!(exchanges[0].scam_message, MOCK_SCAM_MESSAGE);
        assert_eq!(session.turns().len(), 4);
        assert_eq!(session.turns()[0].sender(), Sender::Scammer);
        assert_eq!(session.turns()[1].sender(), Sender::Agent);
        let intel = session.accumulated_intel();
        assert_eq!(intel.upi_ids, vec!["claim.prize@okaxis".to_string()]);
        assert_eq!(intel.scam_category, "Lottery Fraud");
    }
}
