use chrono::Duration;

use crate::models::Conversation;

use super::{MetricScore, duration_ratio};

/// Conversation persistence: how long conversations stay alive
///
/// Each conversation earns `max_score * min(1, span / horizon)`; the result is
/// the mean over conversations.
pub fn conversation_persistence(
    conversations: &[Conversation],
    horizon: Duration,
    max_score: f64,
) -> MetricScore {
    let total: f64 = conversations
        .iter()
        .map(|conversation| {
            let persistence = duration_ratio(conversation.span(), horizon).min(1.0);
            max_score * persistence
        })
        .sum();

    MetricScore::mean(total, conversations.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::test_support::*;

    #[test]
    fn test_persistence_mean_and_cap() {
        let conversations = vec![
            // Five days: half credit
            conversation(vec![
                turn("Alice", at(1, 0, 0), &["a"]),
                turn("Bob", at(2, 0, 0), &["b"]),
                turn("Alice", at(3, 0, 0), &["c"]),
                turn("Bob", at(4, 0, 0), &["d"]),
                turn("Alice", at(5, 0, 0), &["e"]),
                turn("Bob", at(6, 0, 0), &["f"]),
            ]),
            // Single turn: no span
            conversation(vec![turn("Alice", at(20, 0, 0), &["g"])]),
        ];

        let score = conversation_persistence(&conversations, Duration::days(10), 25.0);

        assert_eq!(score, MetricScore::Scored((12.5 + 0.0) / 2.0));
    }

    #[test]
    fn test_persistence_saturates_at_horizon() {
        let mut long = conversation(vec![turn("Alice", at(1, 0, 0), &["a"])]);
        for day in 2..=12 {
            long.push(turn("Bob", at(day, 0, 0), &["b"]));
        }

        let score = conversation_persistence(&[long], Duration::days(10), 25.0);

        assert_eq!(score, MetricScore::Scored(25.0));
    }

    #[test]
    fn test_persistence_without_conversations() {
        assert_eq!(
            conversation_persistence(&[], Duration::days(10), 25.0),
            MetricScore::NoData
        );
    }
}
