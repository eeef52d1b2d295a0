use chrono::NaiveDateTime;
use serde::Serialize;

/// A single transcript line, trimmed, with its position in the source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based line number in the transcript file
    pub line_number: usize,
    /// Line text with surrounding whitespace removed
    pub text: String,
}

impl RawLine {
    pub fn new(line_number: usize, text: &str) -> Self {
        Self {
            line_number,
            text: text.trim().to_string(),
        }
    }
}

/// What a non-empty transcript line turned out to be
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifiedLine {
    /// `YYYY/MM/DD(weekday)` header opening a new day
    DateMarker { year: i32, month: u32, day: u32 },
    /// `HH:MM<TAB>sender<TAB>content`
    Message {
        hour: u32,
        minute: u32,
        sender: String,
        content: String,
    },
    /// Free text belonging to the previous message
    Continuation { content: String },
}

/// A classified line that remembers where it came from, for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub line_number: usize,
    pub text: String,
    pub line: ClassifiedLine,
}

/// Message or continuation line after date propagation.
/// Date markers never reach this stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampedLine {
    Message {
        timestamp: NaiveDateTime,
        sender: String,
        content: String,
    },
    Continuation { content: String },
}

/// Counts of each line kind seen during classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineStats {
    pub date_markers: usize,
    pub messages: usize,
    pub continuations: usize,
    /// Blank lines skipped by the classifier
    pub blank: usize,
}

impl LineStats {
    pub fn record(&mut self, line: &ClassifiedLine) {
        match line {
            ClassifiedLine::DateMarker { .. } => self.date_markers += 1,
            ClassifiedLine::Message { .. } => self.messages += 1,
            ClassifiedLine::Continuation { .. } => self.continuations += 1,
        }
    }
}
