pub mod call_duration;
pub mod content_quality;
pub mod persistence;
pub mod reply_interval;

pub use call_duration::*;
pub use content_quality::*;
pub use persistence::*;
pub use reply_interval::*;

use std::fmt;

use chrono::Duration;
use serde::Serialize;
use tracing::{debug, info};

use crate::models::Conversation;

/// Configuration for the four compatibility metrics
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Ceiling for conversation persistence
    pub persistence_max_score: f64,
    /// Ceiling for reply interval
    pub interval_max_score: f64,
    /// Ceiling for content quality
    pub content_max_score: f64,
    /// Ceiling for call duration
    pub call_max_score: f64,
    /// Conversation span that earns full persistence credit
    pub persistence_horizon: Duration,
    /// Reply delay at which interval credit reaches zero
    pub reply_window: Duration,
    /// Call length that earns full call credit
    pub call_saturation: Duration,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            persistence_max_score: 25.0,
            interval_max_score: 25.0,
            content_max_score: 25.0,
            call_max_score: 25.0,
            persistence_horizon: Duration::days(10),
            reply_window: Duration::hours(6),
            call_saturation: Duration::hours(1),
        }
    }
}

/// Outcome of a single metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricScore {
    /// Mean credit over the metric's qualifying items
    Scored(f64),
    /// Nothing qualified (no reply pairs, no calls, ...)
    NoData,
}

impl MetricScore {
    /// Mean of `total` over `count` items, or `NoData` when there are none
    pub fn mean(total: f64, count: usize) -> Self {
        if count == 0 {
            MetricScore::NoData
        } else {
            MetricScore::Scored(total / count as f64)
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            MetricScore::Scored(v) => Some(*v),
            MetricScore::NoData => None,
        }
    }
}

impl fmt::Display for MetricScore {
    /// Whole points, truncated, or `N/A`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricScore::Scored(v) => write!(f, "{}", v.trunc() as i64),
            MetricScore::NoData => write!(f, "N/A"),
        }
    }
}

/// All four metrics and their sum
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub persistence: MetricScore,
    pub reply_interval: MetricScore,
    pub content_quality: MetricScore,
    pub call_duration: MetricScore,
}

impl ScoreReport {
    /// Sum of the metrics that produced a score
    pub fn total(&self) -> f64 {
        self.metrics().iter().filter_map(MetricScore::value).sum()
    }

    pub fn metrics(&self) -> [MetricScore; 4] {
        [
            self.persistence,
            self.reply_interval,
            self.content_quality,
            self.call_duration,
        ]
    }
}

/// Compute every metric against the designated user
///
/// Metrics are independent: one without data never affects the others.
pub fn score_all(conversations: &[Conversation], user: &str, config: &ScoringConfig) -> ScoreReport {
    let report = ScoreReport {
        persistence: conversation_persistence(
            conversations,
            config.persistence_horizon,
            config.persistence_max_score,
        ),
        reply_interval: reply_interval(
            conversations,
            user,
            config.reply_window,
            config.interval_max_score,
        ),
        content_quality: content_quality(conversations, user, config.content_max_score),
        call_duration: call_duration(
            conversations,
            config.call_saturation,
            config.call_max_score,
        ),
    };

    debug!("Score report: {:?}", report);
    info!("Total compatibility score: {:.2}", report.total());

    report
}

/// Ratio of two durations, measured in milliseconds
pub(crate) fn duration_ratio(numerator: Duration, denominator: Duration) -> f64 {
    numerator.num_milliseconds() as f64 / denominator.num_milliseconds() as f64
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::models::{Conversation, Turn};

    pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    pub fn turn(sender: &str, timestamp: NaiveDateTime, content: &[&str]) -> Turn {
        Turn {
            sender: sender.to_string(),
            timestamp,
            content: content.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn conversation(turns: Vec<Turn>) -> Conversation {
        let mut turns = turns.into_iter();
        let mut conversation = Conversation::new(turns.next().unwrap());
        for turn in turns {
            conversation.push(turn);
        }
        conversation
    }
}
