use std::path::PathBuf;
use thiserror::Error;

use crate::models::YearMonth;

/// All errors produced while reading a time series or aggregating it.
#[derive(Error, Debug)]
pub enum SeriesError {
    /// The named input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The input exists but could not be opened or read.
    #[error("Failed to read file {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row's year-month is not strictly after the previous parsed row.
    #[error(
        "Timestamp out of order or duplicated at {}:{line}: {timestamp} does not follow {previous}",
        .path.display()
    )]
    TimestampOrderViolation {
        path: PathBuf,
        line: usize,
        timestamp: String,
        previous: YearMonth,
    },

    /// A record's month is outside 1..=12.
    #[error("Invalid month {month} in timestamp {timestamp}")]
    InvalidMonth { timestamp: String, month: u32 },

    /// A year argument is not an integer, not four digits, or the range is empty.
    #[error("Invalid year argument: {0}")]
    InvalidYearArgument(String),

    /// One endpoint of the requested range has no record in the series.
    #[error("Year {year} is not present in the time series")]
    YearRangeNotPresent { year: i32 },
}

/// Convenience alias used throughout the series crates.
pub type Result<T> = std::result::Result<T, SeriesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_source_not_found() {
        let err = SeriesError::SourceNotFound(PathBuf::from("/missing/data.csv"));
        assert_eq!(err.to_string(), "Input file not found: /missing/data.csv");
    }

    #[test]
    fn test_error_display_source_unreadable() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SeriesError::SourceUnreadable {
            path: PathBuf::from("/locked/data.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/locked/data.csv"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_error_source_unreadable_keeps_io_source() {
        use std::error::Error as _;

        let err = SeriesError::SourceUnreadable {
            path: PathBuf::from("data.csv"),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8"),
        };
        let source = err.source().expect("io source");
        assert_eq!(source.to_string(), "bad utf-8");
    }

    #[test]
    fn test_error_display_order_violation_names_line() {
        let err = SeriesError::TimestampOrderViolation {
            path: PathBuf::from("data.csv"),
            line: 7,
            timestamp: "1949-03".to_string(),
            previous: YearMonth::new(1949, 5),
        };
        assert_eq!(
            err.to_string(),
            "Timestamp out of order or duplicated at data.csv:7: 1949-03 does not follow 1949-05"
        );
    }

    #[test]
    fn test_error_display_invalid_month() {
        let err = SeriesError::InvalidMonth {
            timestamp: "1949-13".to_string(),
            month: 13,
        };
        assert_eq!(err.to_string(), "Invalid month 13 in timestamp 1949-13");
    }

    #[test]
    fn test_error_display_invalid_year() {
        let err = SeriesError::InvalidYearArgument("first_year \"abcd\" is not an integer".into());
        assert_eq!(
            err.to_string(),
            "Invalid year argument: first_year \"abcd\" is not an integer"
        );
    }

    #[test]
    fn test_error_display_year_not_present() {
        let err = SeriesError::YearRangeNotPresent { year: 1000 };
        assert_eq!(err.to_string(), "Year 1000 is not present in the time series");
    }
}
