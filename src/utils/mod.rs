//! Common utilities and helpers

use std::time::Duration;

pub mod time;

/// Utility functions for clipreel
pub struct Utils;

impl Utils {
    /// Format duration for display
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        let milliseconds = duration.subsec_millis();

        if hours > 0 {
            format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
        } else {
            format!("{:02}:{:02}.{:03}", minutes, seconds, milliseconds)
        }
    }

    /// Format an advisory playback position in seconds
    pub fn format_position(seconds: f64) -> String {
        if seconds.is_finite() && seconds >= 0.0 {
            format!("{:.2} seconds", seconds)
        } else {
            "unknown".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(Utils::format_duration(Duration::from_millis(5_250)), "00:05.250");
        assert_eq!(Utils::format_duration(Duration::from_secs(3725)), "01:02:05.000");
    }

    #[test]
    fn test_format_position() {
        assert_eq!(Utils::format_position(12.345), "12.35 seconds");
        assert_eq!(Utils::format_position(f64::NAN), "unknown");
        assert_eq!(Utils::format_position(-1.0), "unknown");
    }
}
