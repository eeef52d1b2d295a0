use std::sync::OnceLock;

use regex::Regex;

use crate::models::{ClassifiedLine, LineStats, RawLine, SourceLine};

fn date_marker_regex() -> &'static Regex {
    static DATE_MARKER_REGEX: OnceLock<Regex> = OnceLock::new();
    DATE_MARKER_REGEX.get_or_init(|| {
        Regex::new(r"([0-9]{4})/([0-9]{2})/([0-9]{2})\(.*\)")
            .expect("Failed to compile date marker regex")
    })
}

fn message_regex() -> &'static Regex {
    static MESSAGE_REGEX: OnceLock<Regex> = OnceLock::new();
    MESSAGE_REGEX.get_or_init(|| {
        // Only the first two tabs delimit; the content keeps any further tabs
        Regex::new(r"^([0-9]{2}):([0-9]{2})\t([^\t]*)\t(.*)$")
            .expect("Failed to compile message regex")
    })
}

/// Classify a single transcript line
///
/// Returns `None` for blank lines. Every other line is exactly one of a date
/// marker, a message, or a continuation; a line that looks like both a date
/// marker and a message is a date marker.
pub fn classify(line: &str) -> Option<ClassifiedLine> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(caps) = date_marker_regex().captures(line) {
        if let (Ok(year), Ok(month), Ok(day)) = (
            caps[1].parse::<i32>(),
            caps[2].parse::<u32>(),
            caps[3].parse::<u32>(),
        ) {
            return Some(ClassifiedLine::DateMarker { year, month, day });
        }
    }

    if let Some(caps) = message_regex().captures(line) {
        if let (Ok(hour), Ok(minute)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) {
            return Some(ClassifiedLine::Message {
                hour,
                minute,
                sender: caps[3].to_string(),
                content: caps[4].to_string(),
            });
        }
    }

    Some(ClassifiedLine::Continuation {
        content: line.to_string(),
    })
}

/// Classify every line, dropping blanks and tallying what was seen
pub fn classify_lines(lines: &[RawLine]) -> (Vec<SourceLine>, LineStats) {
    let mut stats = LineStats::default();
    let mut classified = Vec::with_capacity(lines.len());

    for raw in lines {
        match classify(&raw.text) {
            Some(line) => {
                stats.record(&line);
                classified.push(SourceLine {
                    line_number: raw.line_number,
                    text: raw.text.clone(),
                    line,
                });
            }
            None => stats.blank += 1,
        }
    }

    (classified, stats)
}
