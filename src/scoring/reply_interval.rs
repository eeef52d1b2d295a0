use chrono::{Duration, NaiveDateTime};
use tracing::debug;

use crate::models::Conversation;

use super::{MetricScore, duration_ratio};

/// Reply interval: how quickly the other party answers the designated user
///
/// Pairs a user turn with the other-party turn immediately after it. Each pair
/// earns `max_score * (window - delay) / window`, floored at zero, so replies
/// slower than `window` count as a pair but earn nothing. Pairing restarts at
/// every conversation, and a conversation the other party opens contributes no
/// pair for that opening turn. `NoData` when no pair exists.
pub fn reply_interval(
    conversations: &[Conversation],
    user: &str,
    window: Duration,
    max_score: f64,
) -> MetricScore {
    let mut total = 0.0;
    let mut pairs = 0usize;

    for conversation in conversations {
        let mut pending: Option<NaiveDateTime> = None;

        for turn in conversation.turns() {
            if turn.sender == user {
                pending = Some(turn.timestamp);
                continue;
            }

            let Some(start) = pending.take() else {
                continue;
            };

            let delay = turn.timestamp - start;
            let credit = (1.0 - duration_ratio(delay, window)).clamp(0.0, 1.0);
            total += max_score * credit;
            pairs += 1;
        }
    }

    debug!("Reply interval: {} qualifying pairs", pairs);
    MetricScore::mean(total, pairs)
}
