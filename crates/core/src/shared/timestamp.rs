use std::num::ParseIntError;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimestampError {
    #[error("timestamp is empty")]
    Empty,
    #[error("invalid timestamp '{input}': expected m:s or s")]
    Format { input: String },
    #[error("invalid number in timestamp '{input}': {source}")]
    Number {
        input: String,
        #[source]
        source: ParseIntError,
    },
    #[error("timestamp '{input}' is out of range")]
    Overflow { input: String },
}

/// Parses a user-supplied `m:s` or `s` timestamp into whole seconds.
pub fn parse_timestamp(text: &str) -> Result<u32, TimestampError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TimestampError::Empty);
    }

    let number = |part: &str| {
        part.trim()
            .parse::<u32>()
            .map_err(|source| TimestampError::Number {
                input: text.to_string(),
                source,
            })
    };

    if text.contains(':') {
        let parts: Vec<&str> = text.split(':').collect();
        let [minutes, seconds] = parts.as_slice() else {
            return Err(TimestampError::Format {
                input: text.to_string(),
            });
        };
        let (minutes, seconds) = (number(*minutes)?, number(*seconds)?);
        minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .ok_or_else(|| TimestampError::Overflow {
                input: text.to_string(),
            })
    } else {
        number(text)
    }
}

/// Formats whole seconds back into `m:ss` for console messages.
pub fn format_timestamp(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2:05", 125)]
    #[case("90", 90)]
    #[case("0:00", 0)]
    #[case("0", 0)]
    #[case("10:0", 600)]
    #[case("1:75", 135)]
    #[case("  3:15 ", 195)]
    #[case("45:30", 2730)]
    fn test_parse_valid(#[case] input: &str, #[case] expected: u32) {
        assert_eq!(parse_timestamp(input).unwrap(), expected);
    }

    #[test]
    fn test_minutes_seconds_identity() {
        for minutes in 0..120u32 {
            for seconds in [0u32, 1, 9, 30, 59] {
                let text = format!("{minutes}:{seconds}");
                assert_eq!(parse_timestamp(&text).unwrap(), minutes * 60 + seconds);
            }
        }
    }

    #[rstest]
    #[case("abc")]
    #[case("1:xx")]
    #[case("x:10")]
    #[case("-5")]
    #[case("1.5")]
    #[case(":")]
    fn test_parse_non_numeric_is_number_error(#[case] input: &str) {
        assert!(matches!(
            parse_timestamp(input),
            Err(TimestampError::Number { .. })
        ));
    }

    #[rstest]
    #[case("1:2:3")]
    #[case("::")]
    fn test_parse_wrong_part_count_is_format_error(#[case] input: &str) {
        assert!(matches!(
            parse_timestamp(input),
            Err(TimestampError::Format { .. })
        ));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_timestamp("   "), Err(TimestampError::Empty));
    }

    #[test]
    fn test_parse_overflow_is_error() {
        assert!(matches!(
            parse_timestamp("99999999:0"),
            Err(TimestampError::Overflow { .. })
        ));
    }

    #[rstest]
    #[case(0, "0:00")]
    #[case(125, "2:05")]
    #[case(3600, "60:00")]
    fn test_format_timestamp(#[case] seconds: u32, #[case] expected: &str) {
        assert_eq!(format_timestamp(seconds), expected);
    }
}
