use chrono::Duration;
use tracing::{debug, warn};

use crate::models::{TimestampedLine, Turn};

/// Result of turn binding
#[derive(Debug, Clone)]
pub struct TurnBindResult {
    /// Turns in the order of their opening message
    pub turns: Vec<Turn>,
    /// Continuation lines seen before any message, which have nothing to attach to
    pub orphaned_continuations: usize,
}

/// Running state of the binder: the turn currently being extended
#[derive(Debug, Clone)]
pub struct TurnCursor {
    active: Option<Turn>,
    turn_gap: Duration,
    orphaned: usize,
}

impl TurnCursor {
    pub fn new(turn_gap: Duration) -> Self {
        Self {
            active: None,
            turn_gap,
            orphaned: 0,
        }
    }

    /// Advance over one line, returning the turn it closed, if any
    pub fn step(mut self, line: TimestampedLine) -> (Self, Option<Turn>) {
        match line {
            TimestampedLine::Continuation { content } => {
                match self.active.as_mut() {
                    Some(turn) => turn.content.push(content),
                    None => {
                        warn!("Dropping continuation line with no preceding message: {:?}", content);
                        self.orphaned += 1;
                    }
                }
                (self, None)
            }
            TimestampedLine::Message {
                timestamp,
                sender,
                content,
            } => {
                let Some(active) = self.active.as_mut() else {
                    self.active = Some(Turn::new(sender, timestamp, content));
                    return (self, None);
                };

                // Merges keep the turn's opening timestamp
                if active.sender == sender && timestamp - active.timestamp <= self.turn_gap {
                    active.content.push(content);
                    return (self, None);
                }

                let closed = self.active.replace(Turn::new(sender, timestamp, content));
                (self, closed)
            }
        }
    }

    /// Flush the active turn at end of input
    pub fn finish(self) -> (Option<Turn>, usize) {
        (self.active, self.orphaned)
    }
}

/// Merge timestamped lines into turns
///
/// Consecutive messages from the same sender join one turn while they stay
/// within `turn_gap` of the turn's first message. A different sender, or a
/// longer gap, closes the turn. Continuations always join the active turn.
pub fn bind_turns(lines: Vec<TimestampedLine>, turn_gap: Duration) -> TurnBindResult {
    let mut turns = Vec::new();
    let cursor = lines.into_iter().fold(TurnCursor::new(turn_gap), |cursor, line| {
        let (cursor, closed) = cursor.step(line);
        turns.extend(closed);
        cursor
    });

    let (last, orphaned_continuations) = cursor.finish();
    turns.extend(last);

    debug!("Bound {} turns ({} orphaned continuations)", turns.len(), orphaned_continuations);

    TurnBindResult {
        turns,
        orphaned_continuations,
    }
}
