//! Shared types for the monthly difference tools.
//!
//! Holds the data model, the error taxonomy, year-argument coercion,
//! command-line settings and output formatting used by `series-data` and the
//! `series-diff` binary.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod year;

pub use error::{Result, SeriesError};
