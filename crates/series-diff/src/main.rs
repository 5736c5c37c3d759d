mod bootstrap;

use anyhow::{Context, Result};
use series_core::formatting::{render_json, render_list, render_table};
use series_core::settings::{OutputFormat, Settings};
use series_data::{compute_avg_monthly_difference, CsvTimeSeriesFile};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(settings.effective_log_level())?;
    tracing::info!("series-diff v{} starting", env!("CARGO_PKG_VERSION"));

    let output = run(&settings)?;
    println!("{}", output);

    Ok(())
}

/// Read the series, average it over the requested years and render the result.
fn run(settings: &Settings) -> Result<String> {
    let source = CsvTimeSeriesFile::new(&settings.file);
    let (series, stats) = source
        .get_data_with_stats()
        .with_context(|| format!("Could not load time series from {}", source.path().display()))?;

    tracing::info!(
        "Loaded {} records from {} ({} rows skipped)",
        series.len(),
        source.path().display(),
        stats.skipped()
    );
    if let Some((first, last)) = series.year_span() {
        tracing::debug!("Series covers {}-{}", first, last);
    }

    let result = compute_avg_monthly_difference(
        &series,
        settings.first_year.as_str(),
        settings.last_year.as_str(),
    )
    .context("Could not compute monthly differences")?;

    let rendered = match settings.format {
        OutputFormat::List => render_list(&result),
        OutputFormat::Table => render_table(&result, settings.precision),
        OutputFormat::Json => render_json(&result)?,
    };

    Ok(rendered)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
