//! CSV loading for monthly time series.
//!
//! Reads a header line followed by `<timestamp>,<value>` rows and converts them
//! into a [`TimeSeries`]. Noisy rows are skipped; an out-of-order or repeated
//! year-month aborts the whole read.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use series_core::error::{Result, SeriesError};
use series_core::models::{TimeRecord, TimeSeries, YearMonth};
use tracing::{debug, trace};

// ── Public API ────────────────────────────────────────────────────────────────

/// Row counts gathered while reading one file. The header is not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    pub rows_read: usize,
    /// Rows that did not split into exactly two fields.
    pub skipped_field_count: usize,
    /// Rows whose timestamp had no parseable year and month.
    pub skipped_timestamp: usize,
    /// Rows whose value was not a non-negative integer.
    pub skipped_value: usize,
    pub accepted: usize,
}

impl ReadStats {
    pub fn skipped(&self) -> usize {
        self.skipped_field_count + self.skipped_timestamp + self.skipped_value
    }
}

/// A CSV file holding one monthly time series.
#[derive(Debug, Clone)]
pub struct CsvTimeSeriesFile {
    path: PathBuf,
}

impl CsvTimeSeriesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the whole file.
    pub fn get_data(&self) -> Result<TimeSeries> {
        self.get_data_with_stats().map(|(series, _)| series)
    }

    /// Same as [`get_data`](Self::get_data), also returning row counts.
    pub fn get_data_with_stats(&self) -> Result<(TimeSeries, ReadStats)> {
        let file = File::open(&self.path).map_err(|e| open_error(&self.path, e))?;
        let (series, stats) = parse_time_series(BufReader::new(file), &self.path)?;

        debug!(
            "File {}: {} rows read, {} skipped, {} accepted",
            self.path.display(),
            stats.rows_read,
            stats.skipped(),
            stats.accepted,
        );

        Ok((series, stats))
    }
}

/// Parse a time series from any buffered reader.
///
/// `source` is only used to label errors. Line 1 is the header and is always
/// skipped; line numbers in errors are 1-based and include the header.
pub fn parse_time_series<R: BufRead>(reader: R, source: &Path) -> Result<(TimeSeries, ReadStats)> {
    let mut stats = ReadStats::default();
    let mut records: Vec<TimeRecord> = Vec::new();
    // Last year-month that parsed, whether or not its value was accepted.
    let mut last_period: Option<YearMonth> = None;

    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|e| SeriesError::SourceUnreadable {
            path: source.to_path_buf(),
            source: e,
        })?;
        let line_no = idx + 1;
        if line_no == 1 {
            continue;
        }
        stats.rows_read += 1;

        let fields: Vec<&str> = line.trim().split(',').collect();
        let &[timestamp, raw_value] = fields.as_slice() else {
            trace!("line {}: expected 2 fields, got {}", line_no, fields.len());
            stats.skipped_field_count += 1;
            continue;
        };

        let Some(period) = parse_year_month(timestamp) else {
            trace!("line {}: malformed timestamp {:?}", line_no, timestamp);
            stats.skipped_timestamp += 1;
            continue;
        };

        if let Some(previous) = last_period {
            if period <= previous {
                return Err(SeriesError::TimestampOrderViolation {
                    path: source.to_path_buf(),
                    line: line_no,
                    timestamp: timestamp.to_string(),
                    previous,
                });
            }
        }
        last_period = Some(period);

        let Some(value) = parse_count(raw_value) else {
            trace!("line {}: invalid value {:?}", line_no, raw_value);
            stats.skipped_value += 1;
            continue;
        };

        records.push(TimeRecord::new(timestamp, period, value));
    }

    stats.accepted = records.len();
    let series = TimeSeries::from_records(records)?;
    Ok((series, stats))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn open_error(path: &Path, err: std::io::Error) -> SeriesError {
    if err.kind() == std::io::ErrorKind::NotFound {
        SeriesError::SourceNotFound(path.to_path_buf())
    } else {
        SeriesError::SourceUnreadable {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Year from characters 0..4, month from the (at most two) characters
/// starting at 5. The separator at position 4 is not checked.
fn parse_year_month(timestamp: &str) -> Option<YearMonth> {
    let year: i32 = parse_digits(timestamp.get(0..4)?)?;
    let month_end = timestamp.len().min(7);
    let month: u32 = parse_digits(timestamp.get(5..month_end)?)?;

    // Rejects month 0 and months past 12.
    NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(YearMonth::new(year, month))
}

/// Non-negative decimal count: digits only, no sign or decimal point.
fn parse_count(raw: &str) -> Option<u64> {
    parse_digits(raw)
}

fn parse_digits<T: FromStr>(text: &str) -> Option<T> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
