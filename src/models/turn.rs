use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// One speaker's contiguous utterance: consecutive same-sender messages
/// within the turn gap, plus any continuation lines that followed them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    /// Sender name as written in the transcript
    pub sender: String,
    /// Time of the first message in the turn (never moved by later merges)
    pub timestamp: NaiveDateTime,
    /// Message texts and continuation lines, in transcript order
    pub content: Vec<String>,
}

impl Turn {
    pub fn new(sender: String, timestamp: NaiveDateTime, content: String) -> Self {
        Self {
            sender,
            timestamp,
            content: vec![content],
        }
    }

    /// Number of content fragments in this turn
    pub fn fragment_count(&self) -> usize {
        self.content.len()
    }
}

/// A maximal run of turns with no inter-turn gap above the conversation gap.
/// Always holds at least one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Start a conversation with its opening turn
    pub fn new(first: Turn) -> Self {
        Self { turns: vec![first] }
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn first(&self) -> &Turn {
        &self.turns[0]
    }

    pub fn last(&self) -> &Turn {
        &self.turns[self.turns.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Last turn's timestamp minus the first turn's
    pub fn span(&self) -> Duration {
        self.last().timestamp - self.first().timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_conversation_span() {
        let mut conversation = Conversation::new(Turn::new("Alice".into(), at(1, 10, 0), "hi".into()));
        assert_eq!(conversation.span(), Duration::zero());

        conversation.push(Turn::new("Bob".into(), at(2, 12, 30), "hey".into()));
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.span(), Duration::hours(26) + Duration::minutes(30));
        assert_eq!(conversation.last().sender, "Bob");
    }
}
