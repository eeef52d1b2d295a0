pub mod stage0_classify;
pub mod stage1_timestamp;
pub mod stage2_turns;
pub mod stage3_segment;

pub use stage0_classify::*;
pub use stage1_timestamp::*;
pub use stage2_turns::*;
pub use stage3_segment::*;

use chrono::Duration;
use tracing::info;

use crate::error::Result;
use crate::models::{RawLine, Timeline};

/// Thresholds for timeline reconstruction
#[derive(Debug, Clone)]
pub struct TimelineConfig {
    /// Fixed header lines at the top of an export, skipped before classification
    pub header_lines: usize,
    /// Longest gap between same-sender messages that still merge into one turn
    pub turn_gap: Duration,
    /// Longest gap between turns that still belong to one conversation
    pub conversation_gap: Duration,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            header_lines: 3,
            turn_gap: Duration::hours(1),
            conversation_gap: Duration::hours(24),
        }
    }
}

/// Run every reconstruction stage over the transcript lines
///
/// 1. Classify lines (date marker / message / continuation)
/// 2. Propagate dates into message timestamps
/// 3. Bind messages into turns
/// 4. Segment turns into conversations
pub fn build_timeline(lines: &[RawLine], config: &TimelineConfig) -> Result<Timeline> {
    let (classified, line_stats) = classify_lines(lines);
    info!(
        "Classified {} lines: {} date markers, {} messages, {} continuations",
        classified.len(),
        line_stats.date_markers,
        line_stats.messages,
        line_stats.continuations
    );

    let timestamped = propagate(&classified)?;

    let bound = bind_turns(timestamped, config.turn_gap);
    let turn_count = bound.turns.len();

    let conversations = segment_conversations(bound.turns, config.conversation_gap);
    info!("Reconstructed {} turns in {} conversations", turn_count, conversations.len());

    Ok(Timeline {
        conversations,
        line_stats,
        orphaned_continuations: bound.orphaned_continuations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(texts: &[&str]) -> Vec<RawLine> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| RawLine::new(i + 4, t))
            .collect()
    }

    #[test]
    fn test_build_timeline() {
        let lines = raw(&[
            "2023/01/01(Sun)",
            "10:00\tAlice\tHi？",
            "10:05\tBob\tHello",
            "2023/01/02(Mon)",
            "09:00\tAlice\t☎ 通話時間 10:00",
        ]);

        let timeline = build_timeline(&lines, &TimelineConfig::default()).unwrap();

        assert_eq!(timeline.conversations.len(), 1);
        assert_eq!(timeline.turn_count(), 3);
        assert_eq!(timeline.turns_by_sender().get("Alice"), Some(&2));
        assert_eq!(timeline.longest_span(), Some(Duration::hours(23)));
    }

    #[test]
    fn test_build_timeline_reports_missing_date_line() {
        let lines = raw(&["10:00\tAlice\thi"]);
        let err = build_timeline(&lines, &TimelineConfig::default()).unwrap_err();
        assert!(err.to_string().contains("line 4"));
    }
}
