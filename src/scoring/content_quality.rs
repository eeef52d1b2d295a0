use std::sync::OnceLock;

use regex::Regex;

use crate::models::Conversation;

use super::MetricScore;

/// Full-width question mark used in the exports
const QUESTION_MARK: char = '？';

fn emoji_regex() -> &'static Regex {
    static EMOJI_REGEX: OnceLock<Regex> = OnceLock::new();
    EMOJI_REGEX.get_or_init(|| {
        Regex::new(r"[\p{Extended_Pictographic}\p{Emoji_Presentation}]")
            .expect("Failed to compile emoji regex")
    })
}

pub fn is_question(fragment: &str) -> bool {
    fragment.contains(QUESTION_MARK)
}

pub fn contains_emoji(fragment: &str) -> bool {
    emoji_regex().is_match(fragment)
}

/// Content quality: how engaged the other party's turns are
///
/// Every turn not sent by `user` is a target. A target earns `max_score` once
/// if any of its fragments asks a question or carries an emoji. The result is
/// the mean over targets, or `NoData` if the other party never spoke.
pub fn content_quality(conversations: &[Conversation], user: &str, max_score: f64) -> MetricScore {
    let targets: Vec<_> = conversations
        .iter()
        .flat_map(|c| c.turns().iter())
        .filter(|turn| turn.sender != user)
        .collect();

    let engaged = targets
        .iter()
        .filter(|turn| {
            turn.content
                .iter()
                .any(|fragment| is_question(fragment) || contains_emoji(fragment))
        })
        .count();

    MetricScore::mean(max_score * engaged as f64, targets.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::test_support::*;

    #[test]
    fn test_question_and_emoji_detection() {
        assert!(is_question("元気？"));
        assert!(!is_question("ascii question?"));
        assert!(contains_emoji("nice 😀"));
        assert!(contains_emoji("☎ 通話時間 5:00"));
        assert!(!contains_emoji("plain text 123 #"));
    }

    #[test]
    fn test_turn_earns_credit_once() {
        let conversations = vec![conversation(vec![
            turn("Alice", at(1, 9, 0), &["？？", "😀"]),
            turn("Bob", at(1, 9, 1), &["what？", "🎉", "🎉"]),
            turn("Alice", at(1, 9, 2), &["ok"]),
            turn("Bob", at(1, 9, 3), &["fine"]),
        ])];

        let score = content_quality(&conversations, "Alice", 25.0);

        // One of Bob's two turns qualifies; Alice's own turns are ignored
        assert_eq!(score, MetricScore::Scored(12.5));
    }

    #[test]
    fn test_no_other_party_turns() {
        let conversations = vec![conversation(vec![turn("Alice", at(1, 9, 0), &["？"])])];
        assert_eq!(content_quality(&conversations, "Alice", 25.0), MetricScore::NoData);
    }
}
