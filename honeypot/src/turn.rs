//! Conversation turns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::verdict::Verdict;

/// Who sent a turn.
///
/// Deserialization also accepts the chat-role spellings (`user` for the scammer side,
/// `assistant` for the agent side) so API callers can post history in either form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sender {
    #[serde(alias = "scammer", alias = "SCAMMER", alias = "user", alias = "User")]
    Scammer,
    #[serde(alias = "agent", alias = "AGENT", alias = "assistant", alias = "Assistant")]
    Agent,
}

impl Sender {
    /// Speaker label used in transcripts.
    pub fn label(self) -> &'static str {
        match self {
            Sender::Scammer => "Scammer",
            Sender::Agent => "Agent",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One message exchanged by either party. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    id: String,
    sender: Sender,
    text: String,
    timestamp: DateTime<Utc>,
    /// Verdict that produced an agent turn; `None` for scammer turns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    verdict: Option<Verdict>,
}

impl Turn {
    /// New scammer turn stamped now.
    pub fn scammer(text: impl Into<String>) -> Self {
        Self::new(Sender::Scammer, text, None)
    }

    /// New agent turn carrying the verdict whose `reply_text` it holds.
    pub fn agent(verdict: Verdict) -> Self {
        let text = verdict.reply_text.clone();
        Self::new(Sender::Agent, text, Some(verdict))
    }

    /// New turn without a verdict, e.g. history posted by an API caller.
    pub fn from_parts(sender: Sender, text: impl Into<String>) -> Self {
        Self::new(sender, text, None)
    }

    fn new(sender: Sender, text: impl Into<String>, verdict: Option<Verdict>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            verdict,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }
}
