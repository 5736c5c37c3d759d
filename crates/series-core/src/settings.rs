use clap::{Parser, ValueEnum};
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Average year-over-year difference per month for a monthly time series
#[derive(Parser, Debug, Clone)]
#[command(
    name = "series-diff",
    about = "Average year-over-year difference per month for a monthly time series",
    version
)]
pub struct Settings {
    /// CSV file with a header line followed by `YYYY-MM,<count>` rows
    #[arg(default_value = "data.csv", env = "SERIES_DIFF_FILE")]
    pub file: PathBuf,

    /// First year of the range (inclusive)
    #[arg(long, env = "SERIES_DIFF_FIRST_YEAR")]
    pub first_year: String,

    /// Last year of the range (inclusive)
    #[arg(long, env = "SERIES_DIFF_LAST_YEAR")]
    pub last_year: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::List)]
    pub format: OutputFormat,

    /// Decimal places in table output (0-6)
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u32).range(0..=6))]
    pub precision: u32,

    /// Logging level
    #[arg(
        long,
        default_value = "WARNING",
        env = "SERIES_DIFF_LOG_LEVEL",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"]
    )]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// How the twelve monthly averages are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bracketed list of twelve numbers
    List,
    /// One row per month with its name and pair count
    Table,
    /// JSON document
    Json,
}

impl Settings {
    /// Parse settings from the process arguments and environment.
    pub fn load() -> Self {
        Self::parse()
    }

    /// Parse settings from an explicit argument list (first item is the
    /// program name).
    pub fn try_load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args)
    }

    /// Log level after applying `--debug`.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "DEBUG"
        } else {
            &self.log_level
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
