use std::fmt;
use std::ops::Index;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeriesError};

/// Number of calendar months in every per-month result.
pub const MONTHS_PER_YEAR: usize = 12;

/// A calendar year and month, ordered chronologically.
///
/// Field order matters: the derived `Ord` compares `year` first, then `month`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based month (1 = January).
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// `true` when `month` is a calendar month (1..=12).
    pub fn is_valid(&self) -> bool {
        (1..=MONTHS_PER_YEAR as u32).contains(&self.month)
    }

    /// Zero-based slot for this month in a 12-element array, or `None` when
    /// the month is not a calendar month.
    pub fn month_index(&self) -> Option<usize> {
        self.is_valid().then(|| self.month as usize - 1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A single observation read from the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecord {
    /// Timestamp text exactly as it appeared in the file.
    pub timestamp: String,
    /// Year and month parsed from the timestamp.
    pub period: YearMonth,
    /// Observed count.
    pub value: u64,
}

impl TimeRecord {
    pub fn new(timestamp: impl Into<String>, period: YearMonth, value: u64) -> Self {
        Self {
            timestamp: timestamp.into(),
            period,
            value,
        }
    }

    pub fn year(&self) -> i32 {
        self.period.year
    }

    pub fn month(&self) -> u32 {
        self.period.month
    }
}

/// Chronologically ordered records with no repeated year-month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimeSeries {
    records: Vec<TimeRecord>,
}

impl TimeSeries {
    /// Build a series from records that are already in strictly increasing
    /// year-month order.
    ///
    /// Returns [`SeriesError::InvalidMonth`] for a record whose month is
    /// outside 1..=12, and [`SeriesError::TimestampOrderViolation`] for the
    /// first record that does not follow its predecessor. `line` in the error
    /// is the 1-based position within `records`.
    pub fn from_records(records: Vec<TimeRecord>) -> Result<Self> {
        if let Some(bad) = records.iter().find(|r| !r.period.is_valid()) {
            return Err(SeriesError::InvalidMonth {
                timestamp: bad.timestamp.clone(),
                month: bad.period.month,
            });
        }
        for (idx, pair) in records.windows(2).enumerate() {
            if pair[1].period <= pair[0].period {
                return Err(SeriesError::TimestampOrderViolation {
                    path: PathBuf::new(),
                    line: idx + 2,
                    timestamp: pair[1].timestamp.clone(),
                    previous: pair[0].period,
                });
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[TimeRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last year covered by the series, if any.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some((first.year(), last.year()))
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a TimeRecord;
    type IntoIter = std::slice::Iter<'a, TimeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Mean year-over-year difference for each calendar month.
///
/// `averages[0]` is January. A month with no consecutive-year pair in the
/// requested range holds `0.0` and a pair count of zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAverages {
    pub first_year: i32,
    pub last_year: i32,
    pub averages: [f64; MONTHS_PER_YEAR],
    /// Number of year pairs that contributed to each month's average.
    pub pairs: [u32; MONTHS_PER_YEAR],
}

impl MonthlyAverages {
    /// Average for a 1-based month, or `None` when `month` is out of range.
    pub fn for_month(&self, month: u32) -> Option<f64> {
        let idx = (month as usize).checked_sub(1)?;
        self.averages.get(idx).copied()
    }

    /// `true` when the month's value is the "no data" zero rather than a mean.
    pub fn is_missing(&self, month_index: usize) -> bool {
        self.pairs.get(month_index).map_or(true, |&n| n == 0)
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.averages.to_vec()
    }
}

impl Index<usize> for MonthlyAverages {
    type Output = f64;

    fn index(&self, month_index: usize) -> &f64 {
        &self.averages[month_index]
    }
}
