//! Time parsing and formatting utilities

use crate::domain::errors::DomainError;

/// Largest value `HH:MM:SS` round-trips with two hour digits
pub const MAX_TWO_DIGIT_HOURS_SECONDS: u64 = 359_999;

/// Time parser for `HH:MM:SS` clip offsets
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeParser;

impl TimeParser {
    /// Create a new time parser
    pub fn new() -> Self {
        Self
    }

    /// Parse `HH:MM:SS` to whole seconds.
    ///
    /// Hours are unbounded; minutes and seconds must be in `0..60`. Every part
    /// must be a plain run of ASCII digits.
    pub fn parse_time(&self, time_str: &str) -> Result<u64, DomainError> {
        let parts: Vec<&str> = time_str.split(':').collect();
        if parts.len() != 3 {
            return Err(Self::malformed(time_str));
        }

        let hours = Self::parse_part(parts[0], time_str)?;
        let minutes = Self::parse_part(parts[1], time_str)?;
        let seconds = Self::parse_part(parts[2], time_str)?;

        if minutes >= 60 || seconds >= 60 {
            return Err(DomainError::Format(format!(
                "Minutes and seconds must be below 60 in '{}'",
                time_str
            )));
        }

        hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes * 60 + seconds))
            .ok_or_else(|| DomainError::Format(format!("Time out of range: '{}'", time_str)))
    }

    fn parse_part(part: &str, time_str: &str) -> Result<u64, DomainError> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Self::malformed(time_str));
        }
        part.parse::<u64>().map_err(|_| Self::malformed(time_str))
    }

    fn malformed(time_str: &str) -> DomainError {
        DomainError::Format(format!(
            "Invalid time '{}'. Expected HH:MM:SS",
            time_str
        ))
    }

    /// Format seconds as zero-padded `HH:MM:SS`
    pub fn format_time(&self, seconds: u64) -> String {
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let secs = seconds % 60;

        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }
}

/// Format whole seconds as `HH:MM:SS`
pub fn format_seconds_to_time(seconds: u64) -> String {
    TimeParser::new().format_time(seconds)
}

/// Parse `HH:MM:SS` into whole seconds
pub fn format_time_to_seconds(time_str: &str) -> Result<u64, DomainError> {
    TimeParser::new().parse_time(time_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds_to_time() {
        assert_eq!(format_seconds_to_time(0), "00:00:00");
        assert_eq!(format_seconds_to_time(3661), "01:01:01");
        assert_eq!(format_seconds_to_time(59), "00:00:59");
        assert_eq!(format_seconds_to_time(360_000), "100:00:00");
    }

    #[test]
    fn test_format_time_to_seconds() {
        assert_eq!(format_time_to_seconds("01:01:01").unwrap(), 3661);
        assert_eq!(format_time_to_seconds("00:00:00").unwrap(), 0);
        assert_eq!(format_time_to_seconds("123:00:05").unwrap(), 442_805);
        assert_eq!(format_time_to_seconds("1:2:3").unwrap(), 3723);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "10", "00:10", "00:00:00:00", "aa:bb:cc", "00:-1:00", "00:00:1.5", " 00:00:01"] {
            assert!(
                matches!(format_time_to_seconds(input), Err(DomainError::Format(_))),
                "expected format error for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range_fields() {
        assert!(format_time_to_seconds("00:60:00").is_err());
        assert!(format_time_to_seconds("00:00:60").is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(format_time_to_seconds("99999999999999999999:00:00").is_err());
        assert!(format_time_to_seconds("18446744073709551615:00:00").is_err());
    }

    #[test]
    fn test_round_trip_below_one_hundred_hours() {
        for seconds in (0..=MAX_TWO_DIGIT_HOURS_SECONDS).step_by(997) {
            let text = format_seconds_to_time(seconds);
            assert_eq!(format_time_to_seconds(&text).unwrap(), seconds);
        }
        let last = format_seconds_to_time(MAX_TWO_DIGIT_HOURS_SECONDS);
        assert_eq!(last, "99:59:59");
        assert_eq!(format_time_to_seconds(&last).unwrap(), MAX_TWO_DIGIT_HOURS_SECONDS);
    }
}
