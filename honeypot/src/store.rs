//! Conversation store: append-only, arrival-ordered turns for one session.
//!
//! There is no edit or delete; the only mutation is [`ConversationStore::append`].

use crate::turn::Turn;

/// Ordered turns of one session.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    turns: Vec<Turn>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one turn and returns the full sequence.
    pub fn append(&mut self, turn: Turn) -> &[Turn] {
        self.turns.push(turn);
        &self.turns
    }

    /// All turns in arrival order.
    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::Sender;
    use crate::verdict::Verdict;

    #[test]
    fn new_store_is_empty() {
        let store = ConversationStore::new();
        assert!(store.is_empty());
        assert!(store.all().is_empty());
        assert!(store.last().is_none());
    }

    #[test]
    fn append_keeps_arrival_order() {
        let mut store = ConversationStore::new();
        store.append(Turn::scammer("first"));
        store.append(Turn::agent(Verdict::fallback("n/a")));
        let all = store.append(Turn::scammer("third"));
        let texts: Vec<&str> = all.iter().map(Turn::text).collect();
        assert_eq!(texts[0], "first");
        assert_eq!(texts[2], "third");
        assert_eq!(all[1].sender(), Sender::Agent);
        assert_eq!(store.len(), 3);
        assert_eq!(store.last().map(Turn::text), Some("third"));
    }
}
