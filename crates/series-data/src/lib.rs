//! Data layer for the monthly difference tools.
//!
//! Reads monthly time series from CSV files and computes the average
//! year-over-year difference for each calendar month.

pub mod aggregator;
pub mod reader;

pub use aggregator::{compute_avg_monthly_difference, MonthlyDifferenceAggregator};
pub use reader::{CsvTimeSeriesFile, ReadStats};
pub use series_core as core;
