//! Year-over-year difference averaging per calendar month.

use std::collections::BTreeMap;

use series_core::error::{Result, SeriesError};
use series_core::models::{MonthlyAverages, TimeSeries, MONTHS_PER_YEAR};
use series_core::year::{coerce_year_range, YearArgument};
use tracing::debug;

/// Values for one year, indexed by month - 1.
type MonthSlots = [Option<u64>; MONTHS_PER_YEAR];

// ── MonthlyDifferenceAggregator ───────────────────────────────────────────────

/// Stateless helper that averages year-over-year differences per month.
pub struct MonthlyDifferenceAggregator;

impl MonthlyDifferenceAggregator {
    /// Average of `value[y + 1] - value[y]` for each month, over every `y` in
    /// `[first_year, last_year - 1]` where both years have that month.
    ///
    /// Months without any such pair come back as `0.0`.
    pub fn compute<A, B>(series: &TimeSeries, first_year: A, last_year: B) -> Result<MonthlyAverages>
    where
        A: YearArgument,
        B: YearArgument,
    {
        let (first, last) = coerce_year_range(&first_year, &last_year)?;
        let table = Self::year_month_table(series, first, last);

        for year in [first, last] {
            if !table.contains_key(&year) {
                return Err(SeriesError::YearRangeNotPresent { year });
            }
        }

        let mut averages = [0.0; MONTHS_PER_YEAR];
        let mut pairs = [0u32; MONTHS_PER_YEAR];

        for month in 0..MONTHS_PER_YEAR {
            let mut sum: i128 = 0;
            let mut count: u32 = 0;

            for year in first..last {
                let current = table.get(&year).and_then(|slots| slots[month]);
                let next = table.get(&(year + 1)).and_then(|slots| slots[month]);
                if let (Some(current), Some(next)) = (current, next) {
                    sum += i128::from(next) - i128::from(current);
                    count += 1;
                }
            }

            if count > 0 {
                averages[month] = sum as f64 / f64::from(count);
            }
            pairs[month] = count;
        }

        debug!(
            "Averaged {}-{}: {} of 12 months had year pairs",
            first,
            last,
            pairs.iter().filter(|&&n| n > 0).count()
        );

        Ok(MonthlyAverages {
            first_year: first,
            last_year: last,
            averages,
            pairs,
        })
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Group the series into year -> month slots, keeping only years in range.
    fn year_month_table(series: &TimeSeries, first: i32, last: i32) -> BTreeMap<i32, MonthSlots> {
        let mut table: BTreeMap<i32, MonthSlots> = BTreeMap::new();

        for record in series.iter().filter(|r| (first..=last).contains(&r.year())) {
            let slots = table
                .entry(record.year())
                .or_insert([None; MONTHS_PER_YEAR]);
            if let Some(slot) = record.period.month_index().and_then(|m| slots.get_mut(m)) {
                *slot = Some(record.value);
            }
        }

        table
    }
}

/// Free-function form of [`MonthlyDifferenceAggregator::compute`].
pub fn compute_avg_monthly_difference<A, B>(
    time_series: &TimeSeries,
    first_year: A,
    last_year: B,
) -> Result<MonthlyAverages>
where
    A: YearArgument,
    B: YearArgument,
{
    MonthlyDifferenceAggregator::compute(time_series, first_year, last_year)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use series_core::models::{TimeRecord, YearMonth};

    fn make_series(rows: &[(i32, u32, u64)]) -> TimeSeries {
        let records = rows
            .iter()
            .map(|&(year, month, value)| {
                let period = YearMonth::new(year, month);
                TimeRecord::new(period.to_string(), period, value)
            })
            .collect();
        TimeSeries::from_records(records).unwrap()
    }

    /// Jan-Dec 1949-1951 from the classic airline passengers dataset.
    fn passengers() -> TimeSeries {
        let years: [(i32, [u64; 12]); 3] = [
            (1949, [112, 118, 132, 129, 121, 135, 148, 148, 136, 119, 104, 118]),
            (1950, [115, 126, 141, 135, 125, 149, 170, 170, 158, 133, 114, 140]),
            (1951, [145, 150, 178, 163, 172, 178, 199, 199, 184, 162, 146, 166]),
        ];
        let rows: Vec<(i32, u32, u64)> = years
            .iter()
            .flat_map(|(year, values)| {
                values
                    .iter()
                    .enumerate()
                    .map(move |(m, &v)| (*year, m as u32 + 1, v))
            })
            .collect();
        make_series(&rows)
    }

    // ── averages ──────────────────────────────────────────────────────────────

    #[test]
    fn test_january_average_over_two_pairs() {
        let series = make_series(&[(1949, 1, 112), (1950, 1, 115), (1951, 1, 145)]);
        let result = compute_avg_monthly_difference(&series, 1949, 1951).unwrap();

        assert_eq!(result[0], 16.5);
        assert_eq!(result.pairs[0], 2);
    }

    #[test]
    fn test_full_passenger_years() {
        let result = compute_avg_monthly_difference(&passengers(), 1949, 1951).unwrap();

        assert_eq!(result.averages[0], 16.5);
        assert_eq!(result.averages[1], 16.0);
        assert_eq!(result.averages[4], 25.5);
        assert_eq!(result.averages[11], 24.0);
        assert!(result.pairs.iter().all(|&n| n == 2));
    }

    #[test]
    fn test_month_without_pairs_is_zero() {
        let series = make_series(&[(1949, 1, 112), (1949, 2, 118), (1950, 1, 115), (1951, 3, 150)]);
        let result = compute_avg_monthly_difference(&series, 1949, 1951).unwrap();

        assert_eq!(result.averages[0], 3.0);
        assert_eq!(result.averages[1], 0.0);
        assert_eq!(result.averages[2], 0.0);
        assert!(result.is_missing(1));
        assert!(result.is_missing(2));
        for month in 3..12 {
            assert_eq!(result.averages[month], 0.0);
        }
    }

    #[test]
    fn test_gap_year_breaks_pairs() {
        // 1950 has no March, so neither 1949->1950 nor 1950->1951 counts.
        let series = make_series(&[(1949, 3, 100), (1950, 1, 1), (1951, 3, 300)]);
        let result = compute_avg_monthly_difference(&series, 1949, 1951).unwrap();
        assert_eq!(result.averages[2], 0.0);
        assert_eq!(result.pairs[2], 0);
    }

    #[test]
    fn test_negative_differences() {
        let series = make_series(&[(1949, 6, 200), (1950, 6, 150), (1951, 6, 140)]);
        let result = compute_avg_monthly_difference(&series, 1949, 1951).unwrap();
        assert_eq!(result.averages[5], -30.0);
    }

    #[test]
    fn test_years_outside_range_ignored() {
        let series = make_series(&[
            (1948, 1, 1),
            (1949, 1, 112),
            (1950, 1, 115),
            (1951, 1, 1000),
        ]);
        let result = compute_avg_monthly_difference(&series, 1949, 1950).unwrap();
        assert_eq!(result.averages[0], 3.0);
        assert_eq!(result.pairs[0], 1);
        assert_eq!(result.first_year, 1949);
        assert_eq!(result.last_year, 1950);
    }

    #[test]
    fn test_large_counts_do_not_overflow() {
        let series = make_series(&[(1949, 1, 0), (1950, 1, u64::MAX)]);
        let result = compute_avg_monthly_difference(&series, 1949, 1950).unwrap();
        assert_eq!(result.averages[0], u64::MAX as f64);
    }

    #[test]
    fn test_text_year_arguments() {
        let result = compute_avg_monthly_difference(&passengers(), "1949", "1951").unwrap();
        assert_eq!(result.averages[0], 16.5);

        let owned = String::from(" 1950 ");
        let result = compute_avg_monthly_difference(&passengers(), "1949", owned).unwrap();
        assert_eq!(result.averages[0], 3.0);
    }

    #[test]
    fn test_month_zero_series_cannot_reach_january() {
        let records = vec![
            TimeRecord::new("1949-00", YearMonth::new(1949, 0), 100),
            TimeRecord::new("1950-00", YearMonth::new(1950, 0), 500),
        ];
        assert!(matches!(
            TimeSeries::from_records(records),
            Err(SeriesError::InvalidMonth { month: 0, .. })
        ));
    }

    #[test]
    fn test_idempotent() {
        let series = passengers();
        let a = compute_avg_monthly_difference(&series, 1949, 1951).unwrap();
        let b = compute_avg_monthly_difference(&series, 1949, 1951).unwrap();
        assert_eq!(a, b);
    }

    // ── argument validation ───────────────────────────────────────────────────

    #[test]
    fn test_last_year_not_after_first() {
        let series = passengers();
        assert!(matches!(
            compute_avg_monthly_difference(&series, 1951, 1949),
            Err(SeriesError::InvalidYearArgument(_))
        ));
        assert!(matches!(
            compute_avg_monthly_difference(&series, 1950, 1950),
            Err(SeriesError::InvalidYearArgument(_))
        ));
    }

    #[test]
    fn test_non_numeric_year() {
        assert!(matches!(
            compute_avg_monthly_difference(&passengers(), "abcd", 1951),
            Err(SeriesError::InvalidYearArgument(_))
        ));
        assert!(matches!(
            compute_avg_monthly_difference(&passengers(), 1949, "abcd"),
            Err(SeriesError::InvalidYearArgument(_))
        ));
    }

    #[test]
    fn test_year_not_four_digits() {
        assert!(matches!(
            compute_avg_monthly_difference(&passengers(), 949, 1951),
            Err(SeriesError::InvalidYearArgument(_))
        ));
        assert!(matches!(
            compute_avg_monthly_difference(&passengers(), 1949, 19510),
            Err(SeriesError::InvalidYearArgument(_))
        ));
    }

    #[test]
    fn test_argument_errors_take_precedence_over_missing_data() {
        let empty = TimeSeries::default();
        assert!(matches!(
            compute_avg_monthly_difference(&empty, 1951, 1949),
            Err(SeriesError::InvalidYearArgument(_))
        ));
    }

    // ── presence checks ───────────────────────────────────────────────────────

    #[test]
    fn test_range_not_present() {
        let err = compute_avg_monthly_difference(&passengers(), 1000, 2000).unwrap_err();
        assert!(matches!(err, SeriesError::YearRangeNotPresent { year: 1000 }));
    }

    #[test]
    fn test_last_year_not_present() {
        let err = compute_avg_monthly_difference(&passengers(), 1949, 1955).unwrap_err();
        assert!(matches!(err, SeriesError::YearRangeNotPresent { year: 1955 }));
    }

    #[test]
    fn test_empty_series_not_present() {
        let err = compute_avg_monthly_difference(&TimeSeries::default(), 1949, 1951).unwrap_err();
        assert!(matches!(err, SeriesError::YearRangeNotPresent { year: 1949 }));
    }

    #[test]
    fn test_middle_year_may_be_missing() {
        let series = make_series(&[(1949, 1, 100), (1951, 1, 200)]);
        let result = compute_avg_monthly_difference(&series, 1949, 1951).unwrap();
        assert_eq!(result.averages, [0.0; 12]);
    }
}
