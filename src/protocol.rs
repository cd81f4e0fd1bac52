use thiserror::Error;

use crate::event::Event;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid command string")]
    InvalidCommand,
    #[error("expected {expected} fields, got {got}")]
    FieldCount { expected: usize, got: usize },
    #[error("field {0:?} has no value")]
    MissingValue(String),
    #[error("not an integer: {0:?}")]
    BadInteger(String),
}

/// Parses one line of the driver's stdout protocol.
///
/// Two line shapes exist: `.x: <int>, y: <int>, pressure: <int>` and
/// `sent button: <int>, <int>`. Values are taken as the integer after each
/// field's colon; nothing beyond field count and integer conversion is
/// validated, so out-of-range coordinates pass through untouched.
pub fn parse_line(line: &str) -> Result<Event, ParseError> {
    let line = line.trim_end();
    if let Some(rest) = line.strip_prefix('.') {
        let fields: Vec<&str> = rest.split(',').collect();
        if fields.len() != 3 {
            return Err(ParseError::FieldCount {
                expected: 3,
                got: fields.len(),
            });
        }
        let x = field_value(fields[0])?;
        let y = field_value(fields[1])?;
        let pressure = field_value(fields[2])?;
        Ok(Event::Position { x, y, pressure })
    } else if line.starts_with("sent button") {
        let rest = line
            .split(':')
            .nth(1)
            .ok_or_else(|| ParseError::MissingValue(line.to_owned()))?;
        let fields: Vec<&str> = rest.split(',').collect();
        if fields.len() != 2 {
            return Err(ParseError::FieldCount {
                expected: 2,
                got: fields.len(),
            });
        }
        let id = parse_int(fields[0])?;
        let status = parse_int(fields[1])?;
        Ok(Event::Button { id, status })
    } else {
        Err(ParseError::InvalidCommand)
    }
}

fn field_value(field: &str) -> Result<i32, ParseError> {
    match field.split(':').nth(1) {
        Some(value) => parse_int(value),
        None => Err(ParseError::MissingValue(field.trim().to_owned())),
    }
}

fn parse_int(text: &str) -> Result<i32, ParseError> {
    let text = text.trim();
    text.parse()
        .map_err(|_| ParseError::BadInteger(text.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_position_line() {
        assert_eq!(
            parse_line(".x: 10, y: 20, pressure: 5"),
            Ok(Event::Position {
                x: 10,
                y: 20,
                pressure: 5
            })
        );
    }

    #[test]
    fn parses_button_line() {
        assert_eq!(
            parse_line("sent button: -1, 1"),
            Ok(Event::Button { id: -1, status: 1 })
        );
    }

    #[test]
    fn accepts_trailing_newline() {
        assert_eq!(
            parse_line(".x: 1, y: 2, pressure: 3\n"),
            Ok(Event::Position {
                x: 1,
                y: 2,
                pressure: 3
            })
        );
    }

    #[test]
    fn accepts_out_of_range_coordinates() {
        assert_eq!(
            parse_line(".x: 70000, y: -12, pressure: 0"),
            Ok(Event::Position {
                x: 70000,
                y: -12,
                pressure: 0
            })
        );
    }

    #[test]
    fn field_names_are_not_checked() {
        // Only field order matters; keys are never inspected.
        assert_eq!(
            parse_line(".a: 1, b: 2, c: 3"),
            Ok(Event::Position {
                x: 1,
                y: 2,
                pressure: 3
            })
        );
    }

    #[test]
    fn rejects_unknown_line() {
        assert_eq!(parse_line("garbage line"), Err(ParseError::InvalidCommand));
        assert_eq!(parse_line(""), Err(ParseError::InvalidCommand));
    }

    #[test]
    fn rejects_wrong_position_field_count() {
        assert_eq!(
            parse_line(".x: 1, y: 2"),
            Err(ParseError::FieldCount {
                expected: 3,
                got: 2
            })
        );
        assert_eq!(
            parse_line(".x: 1, y: 2, pressure: 3, tilt: 4"),
            Err(ParseError::FieldCount {
                expected: 3,
                got: 4
            })
        );
    }

    #[test]
    fn rejects_wrong_button_field_count() {
        assert_eq!(
            parse_line("sent button: 5"),
            Err(ParseError::FieldCount {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn rejects_missing_field_value() {
        assert_eq!(
            parse_line(".x 1, y: 2, pressure: 3"),
            Err(ParseError::MissingValue("x 1".to_owned()))
        );
    }

    #[test]
    fn rejects_non_integer_value() {
        assert_eq!(
            parse_line(".x: ten, y: 2, pressure: 3"),
            Err(ParseError::BadInteger("ten".to_owned()))
        );
        assert_eq!(
            parse_line("sent button: 0, down"),
            Err(ParseError::BadInteger("down".to_owned()))
        );
    }
}
