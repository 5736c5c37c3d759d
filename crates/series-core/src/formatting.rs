//! Text rendering of [`MonthlyAverages`] for the command line.

use std::fmt::Write as _;

use chrono::Month;

use crate::models::{MonthlyAverages, MONTHS_PER_YEAR};

/// Format a number with thousands separators and a fixed number of decimals.
///
/// # Examples
///
/// ```
/// use series_core::formatting::format_number;
///
/// assert_eq!(format_number(16.5, 2), "16.50");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(-9876.54, 1), "-9,876.5");
/// assert_eq!(format_number(-0.001, 2), "0.00");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let digits = format!("{:.*}", decimals as usize, value.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + int_part.len() / 3 + 1);
    // Suppress the sign when rounding produced zero.
    if value < 0.0 && digits.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// The twelve calendar months, January first.
pub fn months() -> impl Iterator<Item = Month> {
    std::iter::successors(Some(Month::January), |m| Some(m.succ())).take(MONTHS_PER_YEAR)
}

/// Render as a bracketed list, e.g. `[16.5, 0, 12.25, ...]`.
pub fn render_list(result: &MonthlyAverages) -> String {
    let items: Vec<String> = result.averages.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

/// Render one line per month: name, average, contributing year pairs.
pub fn render_table(result: &MonthlyAverages, decimals: u32) -> String {
    let values: Vec<String> = result
        .averages
        .iter()
        .map(|&v| format_number(v, decimals))
        .collect();
    let width = values.iter().map(String::len).max().unwrap_or(0).max(7);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Average monthly difference {}-{}",
        result.first_year, result.last_year
    );
    let _ = writeln!(out, "{:<10} {:>width$} {:>5}", "Month", "Average", "Pairs");
    for ((month, value), pairs) in months().zip(&values).zip(result.pairs.iter()) {
        let marker = if *pairs == 0 { " (no data)" } else { "" };
        let _ = writeln!(
            out,
            "{:<10} {:>width$} {:>5}{}",
            month.name(),
            value,
            pairs,
            marker
        );
    }
    out
}

/// Render as pretty-printed JSON.
pub fn render_json(result: &MonthlyAverages) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}
