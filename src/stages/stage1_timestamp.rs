use chrono::{NaiveDate, NaiveTime};

use crate::error::{Error, Result};
use crate::models::{ClassifiedLine, SourceLine, TimestampedLine};

/// Running state of the propagator: the most recent date marker, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateCursor {
    current: Option<NaiveDate>,
}

impl DateCursor {
    /// Advance over one line, producing the timestamped line it becomes
    ///
    /// Date markers move the cursor and produce nothing. Messages take the
    /// cursor's date; continuations pass through untouched.
    pub fn step(self, source: &SourceLine) -> Result<(Self, Option<TimestampedLine>)> {
        match &source.line {
            ClassifiedLine::DateMarker { year, month, day } => {
                let date = NaiveDate::from_ymd_opt(*year, *month, *day)
                    .ok_or_else(|| invalid_timestamp(source))?;
                Ok((Self { current: Some(date) }, None))
            }
            ClassifiedLine::Message {
                hour,
                minute,
                sender,
                content,
            } => {
                let date = self.current.ok_or_else(|| Error::MissingDate {
                    line_number: source.line_number,
                    line: source.text.clone(),
                })?;
                let time =
                    NaiveTime::from_hms_opt(*hour, *minute, 0).ok_or_else(|| invalid_timestamp(source))?;
                let line = TimestampedLine::Message {
                    timestamp: date.and_time(time),
                    sender: sender.clone(),
                    content: content.clone(),
                };
                Ok((self, Some(line)))
            }
            ClassifiedLine::Continuation { content } => Ok((
                self,
                Some(TimestampedLine::Continuation {
                    content: content.clone(),
                }),
            )),
        }
    }
}

fn invalid_timestamp(source: &SourceLine) -> Error {
    Error::InvalidTimestamp {
        line_number: source.line_number,
        line: source.text.clone(),
    }
}

/// Fold date markers into the messages that follow them
///
/// Fails on the first message that has no date marker before it, or on a
/// date or time that does not exist.
pub fn propagate(lines: &[SourceLine]) -> Result<Vec<TimestampedLine>> {
    let mut output = Vec::with_capacity(lines.len());
    lines.iter().try_fold(DateCursor::default(), |cursor, source| {
        let (cursor, line) = cursor.step(source)?;
        output.extend(line);
        Ok::<_, Error>(cursor)
    })?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawLine;
    use crate::stages::classify_lines;

    fn source(texts: &[&str]) -> Vec<SourceLine> {
        let raw: Vec<RawLine> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| RawLine::new(i + 1, t))
            .collect();
        classify_lines(&raw).0
    }

    fn timestamp_of(line: &TimestampedLine) -> chrono::NaiveDateTime {
        match line {
            TimestampedLine::Message { timestamp, .. } => *timestamp,
            TimestampedLine::Continuation { .. } => panic!("expected a message"),
        }
    }

    #[test]
    fn test_messages_take_nearest_preceding_date() {
        let lines = source(&[
            "2023/01/01(Sun)",
            "10:00\tAlice\thi",
            "continued",
            "23:59\tBob\tlate",
            "2023/01/02(Mon)",
            "00:01\tAlice\tearly",
        ]);

        let output = propagate(&lines).unwrap();

        assert_eq!(output.len(), 4);
        let day1 = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let day2 = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        assert_eq!(timestamp_of(&output[0]).date(), day1);
        assert!(matches!(output[1], TimestampedLine::Continuation { .. }));
        assert_eq!(timestamp_of(&output[2]).date(), day1);
        assert_eq!(timestamp_of(&output[3]).date(), day2);
        assert_eq!(timestamp_of(&output[3]).time(), NaiveTime::from_hms_opt(0, 1, 0).unwrap());
    }

    #[test]
    fn test_missing_date_is_fatal() {
        let lines = source(&["header noise", "10:00\tAlice\thi"]);

        let err = propagate(&lines).unwrap_err();

        assert!(matches!(err, Error::MissingDate { line_number: 2, .. }));
    }

    #[test]
    fn test_continuation_before_date_passes_through() {
        let lines = source(&["header noise", "2023/01/01(Sun)"]);
        let output = propagate(&lines).unwrap();
        assert_eq!(output.len(), 1);
    }

    #[test]
    fn test_invalid_calendar_values() {
        let bad_date = source(&["2023/02/30(Thu)"]);
        assert!(matches!(
            propagate(&bad_date),
            Err(Error::InvalidTimestamp { line_number: 1, .. })
        ));

        let bad_time = source(&["2023/02/01(Wed)", "25:10\tAlice\thi"]);
        assert!(matches!(
            propagate(&bad_time),
            Err(Error::InvalidTimestamp { line_number: 2, .. })
        ));
    }
}
