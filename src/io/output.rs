use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{LineStats, Timeline};
use crate::scoring::{MetricScore, ScoreReport, parse_call_duration};

const FRAME_WIDTH: usize = 40;

/// Machine-readable score report
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    /// Designated user the scores are computed against
    pub user: String,
    pub scores: ScoreReport,
    /// Sum of the metrics that had data
    pub total: f64,
    pub metadata: TimelineMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineMetadata {
    pub lines: LineStats,
    pub total_turns: usize,
    pub total_conversations: usize,
    pub total_calls: usize,
    pub orphaned_continuations: usize,
}

impl TimelineMetadata {
    pub fn from_timeline(timeline: &Timeline) -> Self {
        Self {
            lines: timeline.line_stats.clone(),
            total_turns: timeline.turn_count(),
            total_conversations: timeline.conversations.len(),
            total_calls: timeline
                .turns()
                .flat_map(|t| t.content.iter())
                .filter(|fragment| parse_call_duration(fragment).is_some())
                .count(),
            orphaned_continuations: timeline.orphaned_continuations,
        }
    }
}

impl JsonReport {
    pub fn new(user: &str, scores: ScoreReport, timeline: &Timeline) -> Self {
        Self {
            user: user.to_string(),
            total: scores.total(),
            scores,
            metadata: TimelineMetadata::from_timeline(timeline),
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Human-readable score table
pub struct ScoreTable<'a> {
    report: &'a ScoreReport,
}

impl<'a> ScoreTable<'a> {
    pub fn new(report: &'a ScoreReport) -> Self {
        Self { report }
    }

    /// Format the four sub-scores and their total, truncated to whole points
    pub fn format(&self) -> String {
        let frame = "*".repeat(FRAME_WIDTH);
        let rows = [
            ("Conversation length", self.report.persistence),
            ("Reply interval", self.report.reply_interval),
            ("Content quality", self.report.content_quality),
            ("Call duration", self.report.call_duration),
        ];

        let mut output = String::new();
        output.push_str(&frame);
        output.push('\n');
        for (label, score) in rows {
            output.push_str(&score_row(label, &score.to_string()));
        }
        output.push_str(&frame);
        output.push('\n');
        let total = MetricScore::Scored(self.report.total());
        output.push_str(&score_row("Total", &total.to_string()));
        output.push_str(&frame);
        output.push('\n');
        output
    }
}

fn score_row(label: &str, value: &str) -> String {
    format!("****  {:<20} {:>5} pts  ****\n", label, value)
}

/// Human-readable dump of the reconstructed conversations
pub struct TimelineText<'a> {
    timeline: &'a Timeline,
}

impl<'a> TimelineText<'a> {
    pub fn new(timeline: &'a Timeline) -> Self {
        Self { timeline }
    }

    pub fn format(&self) -> String {
        let mut output = String::new();

        for (index, conversation) in self.timeline.conversations.iter().enumerate() {
            output.push_str(&format!(
                "=== Conversation {} ({} .. {}) ===\n",
                index + 1,
                format_timestamp(&conversation.first().timestamp),
                format_timestamp(&conversation.last().timestamp)
            ));

            for turn in conversation.turns() {
                output.push_str(&format!(
                    "[{}] {}:\n",
                    format_timestamp(&turn.timestamp),
                    turn.sender
                ));
                for fragment in &turn.content {
                    output.push_str("    ");
                    output.push_str(fragment);
                    output.push('\n');
                }
            }
            output.push('\n');
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}
