//! Prompt assembly for the judgement call.
//!
//! The system message carries the persona and the operating rules; the user message carries the
//! transcript, the new scammer message and the expected output schema.

use crate::message::Message;
use crate::turn::Turn;

/// Persona and rules for the honey-pot agent.
pub const SYSTEM_INSTRUCTION: &str = r#"You are the reasoning core of a scam honey-pot.
You play "Aarav Sharma", a 24 year old graphic designer from Bangalore: friendly, a little naive,
curious about offers, never suspicious out loud. Your goal is to keep a suspected scammer talking
and get them to reveal payment and contact details.

For every new scammer message:
1. Classify intent as SCAM, LEGIT or UNCERTAIN with a confidence_score between 0 and 1.
2. Pick the operation stage:
   - DETECTION: intent is still unclear; respond naturally.
   - ENGAGEMENT: scam is likely; show interest and build trust.
   - EXTRACTION: steer the scammer into sharing UPI IDs, bank account numbers or IFSC codes,
     links and phone numbers (e.g. "which UPI should I pay to?",
     "the link is not opening, send again").
3. Write reply_text in persona. Never reveal that you are an AI or that you suspect a scam.
   Never share real personal or financial data.
4. Extract every identifier that appears in the conversation so far into extracted_intel,
   exactly as written. Use empty arrays when nothing was found.
5. Set scam_category to a short label (e.g. Lottery, Job, Crypto, Bank KYC, Sextortion),
   or "Unknown" when it cannot be told yet.
6. Put a brief internal reasoning into explanation."#;

/// Placeholder for an empty history.
const NO_HISTORY: &str = "(no previous messages)";

/// Renders turns as `Speaker: text` lines in arrival order.
pub fn render_transcript(history: &[Turn]) -> String {
    if history.is_empty() {
        return NO_HISTORY.to_string();
    }
    history
        .iter()
        .map(|t| format!("{}: {}", t.sender().label(), t.text()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the judgement prompt for one turn.
pub fn build_judgement_prompt(
    history: &[Turn],
    new_message: &str,
    schema: &serde_json::Value,
) -> Vec<Message> {
    let user = format!(
        "Conversation history:\n{}\n\nNew message from scammer:\n{}\n\n---\n\
         Respond with one JSON object matching this schema, and nothing else:\n{}",
        render_transcript(history),
        new_message,
        schema
    );
    vec![Message::system(SYSTEM_INSTRUCTION), Message::user(user)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::{Sender, Turn};

    #[test]
    fn empty_history_renders_placeholder() {
        assert_eq!(render_transcript(&[]), NO_HISTORY);
    }

    #[test]
    fn transcript_uses_speaker_labels_in_order() {
        let history = vec![
            Turn::scammer("You won!"),
            Turn::from_parts(Sender::Agent, "Really? How?"),
        ];
        assert_eq!(
            render_transcript(&history),
            "Scammer: You won!\nAgent: Really? How?"
        );
    }

    #[test]
    fn prompt_has_system_then_user_with_message_and_schema() {
        let schema = serde_json::json!({"type": "object"});
        let msgs = build_judgement_prompt(&[], "Pay ₹500 now", &schema);
        assert_eq!(msgs.len(), 2);
        assert!(matches!(&msgs[0], Message::System(s) if s == SYSTEM_INSTRUCTION));
        let user = msgs[1].content();
        assert!(user.contains("Pay ₹500 now"));
        assert!(user.contains(NO_HISTORY));
        assert!(user.contains("\"type\":\"object\""));
    }
}
