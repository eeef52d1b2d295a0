use std::collections::BTreeMap;

use chrono::Duration;

use super::{Conversation, LineStats, Turn};

/// Fully reconstructed transcript: conversations of turns, plus what the
/// classifier and turn binder saw on the way
#[derive(Debug, Clone)]
pub struct Timeline {
    pub conversations: Vec<Conversation>,
    pub line_stats: LineStats,
    /// Continuation lines that appeared before any message and were dropped
    pub orphaned_continuations: usize,
}

impl Timeline {
    /// All turns across all conversations, in order
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.conversations.iter().flat_map(|c| c.turns().iter())
    }

    pub fn turn_count(&self) -> usize {
        self.conversations.iter().map(Conversation::len).sum()
    }

    /// Turn counts keyed by sender name
    pub fn turns_by_sender(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for turn in self.turns() {
            *counts.entry(turn.sender.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Span of the longest conversation, if there is one
    pub fn longest_span(&self) -> Option<Duration> {
        self.conversations.iter().map(Conversation::span).max()
    }
}
