use std::path::Path;

use crate::error::{Error, Result};
use crate::models::RawLine;

/// Read a chat export, dropping its fixed header
pub fn read_transcript(path: &Path, header_lines: usize) -> Result<Vec<RawLine>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_transcript(&content, header_lines))
}

/// Split export text into trimmed lines, skipping the first `header_lines`
///
/// Line numbers stay 1-based relative to the whole file so errors point at
/// the right place.
pub fn parse_transcript(content: &str, header_lines: usize) -> Vec<RawLine> {
    let content = content.trim_start_matches('\u{FEFF}');
    content
        .lines()
        .enumerate()
        .skip(header_lines)
        .map(|(index, text)| RawLine::new(index + 1, text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transcript_skips_header() {
        let content = "\u{FEFF}[LINE] Chat history\nSaved on: 2023/01/03 10:00\n\n2023/01/01(Sun)\r\n10:00\tAlice\thi\n";

        let lines = parse_transcript(content, 3);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], RawLine::new(4, "2023/01/01(Sun)"));
        assert_eq!(lines[1].text, "10:00\tAlice\thi");
        assert_eq!(lines[1].line_number, 5);
    }

    #[test]
    fn test_parse_transcript_shorter_than_header() {
        assert!(parse_transcript("only\ntwo", 3).is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_transcript(Path::new("/nonexistent/chat.txt"), 3).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
