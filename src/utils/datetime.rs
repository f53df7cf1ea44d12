//! Timestamp formatting for sqlpal
//!
//! Two patterns are used everywhere: a short wall-clock stamp for transcript
//! lines and a filesystem-safe stamp for log file names.

use chrono::{DateTime, Local, NaiveDateTime};

use crate::error::{Result, SqlpalError};

/// Wall-clock pattern for transcript lines (`HH:mm:ss`).
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Filesystem-safe pattern for log file names (`yyyy-MM-dd_HH-mm-ss`).
pub const FILE_STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Format a timestamp for a transcript line.
pub fn time_stamp(at: DateTime<Local>) -> String {
    at.format(TIME_FORMAT).to_string()
}

/// Format a timestamp for a log file name (without the `.log` extension).
pub fn file_stamp(at: DateTime<Local>) -> String {
    at.format(FILE_STAMP_FORMAT).to_string()
}

/// Parse a log file stem back into a timestamp.
///
/// Retention sorts files chronologically by this value before pruning.
pub fn parse_file_stamp(stem: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(stem, FILE_STAMP_FORMAT).map_err(|e| {
        SqlpalError::invalid_argument(format!("'{stem}' is not a log file stamp: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_file_stamp_round_trip() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 30, 5).unwrap();
        let stem = file_stamp(at);
        assert_eq!(stem, "2024-03-09_14-30-05");

        let parsed = parse_file_stamp(&stem).unwrap();
        assert_eq!(parsed, at.naive_local());
    }

    #[test]
    fn test_time_stamp_shape() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 8, 9).unwrap();
        assert_eq!(time_stamp(at), "07:08:09");
    }

    #[test]
    fn test_parse_rejects_non_stamp() {
        assert!(parse_file_stamp("latest").is_err());
        assert!(parse_file_stamp("2024-03-09").is_err());
    }
}
