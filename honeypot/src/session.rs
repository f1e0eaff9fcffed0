//! One honey-pot conversation: store, accumulated intel and latest verdict.
//!
//! [`Session::send_message`] is the chat-facing pipeline: process → append turns → merge intel.
//! It takes `&mut self`, so a session can never have two judgement calls in flight.
//!
//! The engagement state is whatever the last verdict reports; the session does not validate
//! transitions between DETECTION, ENGAGEMENT and EXTRACTION.

use std::sync::{Arc, OnceLock};

use serde::Serialize;
use tracing::{info, warn};

use crate::adversary::{AdversaryGenerator, ScamScenario};
use crate::intel::{merge, AccumulatedIntel};
use crate::processor::{TurnProcessor, FALLBACK_EXPLANATION};
use crate::report::IntelReport;
use crate::store::ConversationStore;
use crate::turn::Turn;
use crate::verdict::Verdict;

/// Read-only view of a session for consumers (REPL, dashboards).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub last_verdict: Option<Verdict>,
    pub accumulated_intel: AccumulatedIntel,
    pub turn_count: usize,
}

/// Single-conversation session.
pub struct Session {
    processor: Arc<TurnProcessor>,
    store: ConversationStore,
    intel: AccumulatedIntel,
    last_verdict: Option<Verdict>,
}

impl Session {
    /// Empty session using `processor` for every turn.
    pub fn new(processor: Arc<TurnProcessor>) -> Self {
        Self {
            processor,
            store: ConversationStore::new(),
            intel: AccumulatedIntel::new(),
            last_verdict: None,
        }
    }

    /// Processes one scammer message and returns its verdict.
    ///
    /// Never fails: processing errors become the fallback verdict, which is recorded like any
    /// other (its empty fragment leaves the accumulated intel unchanged).
    ///
    /// A blank message is answered with the fallback verdict and leaves the session untouched:
    /// no turns are recorded and the last verdict is kept.
    pub async fn send_message(&mut self, text: &str) -> &Verdict {
        if text.trim().is_empty() {
            warn!("blank scammer message ignored");
            return blank_message_verdict();
        }
        let verdict = self.processor.process(self.store.all(), text).await;

        self.store.append(Turn::scammer(text));
        self.store.append(Turn::agent(verdict.clone()));
        self.intel = merge(&self.intel, &verdict.extracted_intel);
        info!(
            turn_count = self.store.len(),
            classification = %verdict.classification,
            current_state = %verdict.current_state,
            indicators = self.intel.indicator_count(),
            "session turn recorded"
        );
        self.last_verdict.insert(verdict)
    }

    /// Asks `generator` for the next scammer message and feeds it through
    /// [`send_message`](Self::send_message). Returns the generated message and its verdict.
    pub async fn simulate(
        &mut self,
        generator: &AdversaryGenerator,
        scenario: &ScamScenario,
    ) -> (String, &Verdict) {
        let scam_text = generator.generate(scenario, self.store.all()).await;
        let verdict = self.send_message(&scam_text).await;
        (scam_text, verdict)
    }

    pub fn turns(&self) -> &[Turn] {
        self.store.all()
    }

    pub fn accumulated_intel(&self) -> &AccumulatedIntel {
        &self.intel
    }

    pub fn last_verdict(&self) -> Option<&Verdict> {
        self.last_verdict.as_ref()
    }

    /// Current surface state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            last_verdict: self.last_verdict.clone(),
            accumulated_intel: self.intel.clone(),
            turn_count: self.store.len(),
        }
    }

    /// Dashboard projection of the last verdict; `None` before the first turn.
    pub fn report(&self) -> Option<IntelReport> {
        self.last_verdict.as_ref().map(IntelReport::from_verdict)
    }
}

fn blank_message_verdict() -> &'static Verdict {
    static VERDICT: OnceLock<Verdict> = OnceLock::new();
    VERDICT.get_or_init(|| Verdict::fallback(FALLBACK_EXPLANATION))
}
