use std::sync::OnceLock;

use chrono::Duration;
use regex::Regex;
use tracing::debug;

use crate::models::Conversation;

use super::{MetricScore, duration_ratio};

fn call_regex() -> &'static Regex {
    static CALL_REGEX: OnceLock<Regex> = OnceLock::new();
    CALL_REGEX.get_or_init(|| {
        Regex::new(r"☎ 通話時間\s([0-9]+:[0-9]+:[0-9]+|[0-9]+:[0-9]+|[0-9]+)")
            .expect("Failed to compile call marker regex")
    })
}

/// Parse the call length from a `☎ 通話時間 <H:MM:SS | M:SS | S>` marker
pub fn parse_call_duration(fragment: &str) -> Option<Duration> {
    let caps = call_regex().captures(fragment)?;
    let parts = caps[1]
        .split(':')
        .map(str::parse::<i64>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;

    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => (0, *m, *s),
        [s] => (0, 0, *s),
        _ => return None,
    };

    let total = hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)?;
    Duration::try_seconds(total)
}

/// Call duration: how long the two talk on the phone
///
/// Every call marker in any turn counts, whoever sent it. Each call earns
/// `max_score * min(1, length / saturation)`; the result is the mean over
/// calls, or `NoData` if there were none.
pub fn call_duration(
    conversations: &[Conversation],
    saturation: Duration,
    max_score: f64,
) -> MetricScore {
    let calls: Vec<Duration> = conversations
        .iter()
        .flat_map(|c| c.turns().iter())
        .flat_map(|turn| turn.content.iter())
        .filter_map(|fragment| parse_call_duration(fragment))
        .collect();

    debug!("Call duration: {} calls found", calls.len());

    let total: f64 = calls
        .iter()
        .map(|length| max_score * duration_ratio(*length, saturation).min(1.0))
        .sum();

    MetricScore::mean(total, calls.len())
}
