//! # Honeypot
//!
//! Core of a demonstration scam honey-pot chat agent. It converses with a (simulated) scammer,
//! classifies intent, tracks a three-stage engagement state and extracts payment identifiers,
//! phishing links and phone numbers into a fixed JSON schema.
//!
//! The judgement itself (classification, extraction, persona reply) is delegated to an LLM
//! behind [`LlmClient`]; this crate owns the contract around it:
//!
//! - [`Verdict`] / [`IntelFragment`]: the wire schema of one judgement.
//! - [`TurnProcessor`]: transcript → judgement call → strictly parsed verdict, with a fallback
//!   verdict on any failure ([`TurnProcessor::process`]) or a typed error
//!   ([`TurnProcessor::try_process`]).
//! - [`merge`] / [`AccumulatedIntel`]: monotonic, deduplicating union of intel across turns with a
//!   sticky scam category.
//! - [`ConversationStore`]: append-only turn log.
//! - [`Session`]: one conversation wiring the above together; [`SessionSnapshot`] and
//!   [`IntelReport`] are its read surfaces.
//! - [`AdversaryGenerator`]: mock scammer for demos and end-to-end runs.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use honeypot::{ChatOpenAI, Session, TurnProcessor};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let processor = Arc::new(TurnProcessor::new(Arc::new(ChatOpenAI::new("gpt-4o-mini"))));
//! let mut session = Session::new(processor);
//! let verdict = session.send_message("You won a lottery! Pay ₹500 to claim.").await;
//! println!("{} ({}): {}", verdict.classification, verdict.current_state, verdict.reply_text);
//! # }
//! ```

pub mod adversary;
pub mod error;
pub mod intel;
pub mod llm;
pub mod message;
pub mod processor;
pub mod report;
pub mod session;
pub mod store;
pub mod turn;
pub mod verdict;

pub use adversary::{AdversaryGenerator, ScamScenario, FALLBACK_SCAM_MESSAGE};
pub use error::HoneypotError;
pub use intel::{merge, AccumulatedIntel};
pub use llm::{ChatOpenAI, CompletionOptions, JsonSchemaFormat, LlmClient, LlmResponse, MockLlm};
pub use message::Message;
pub use processor::{TurnProcessor, FALLBACK_EXPLANATION};
pub use report::IntelReport;
pub use session::{Session, SessionSnapshot};
pub use store::ConversationStore;
pub use turn::{Sender, Turn};
pub use verdict::{
    Classification, ConversationState, IntelFragment, Verdict, FALLBACK_REPLY, UNKNOWN_CATEGORY,
};
