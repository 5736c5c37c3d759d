//! Coercion of caller-supplied year arguments.
//!
//! Years may arrive as integers or as integer-like text (for example straight
//! from the command line). Both are validated to the four-digit range.

use std::ops::RangeInclusive;

use crate::error::{Result, SeriesError};

/// Years accepted as range endpoints.
pub const VALID_YEARS: RangeInclusive<i64> = 1000..=9999;

/// A value that can be coerced into a calendar year.
pub trait YearArgument {
    /// Convert to an integer without range checks.
    fn to_year(&self) -> std::result::Result<i64, String>;
}

macro_rules! impl_year_argument_for_int {
    ($($ty:ty),*) => {
        $(
            impl YearArgument for $ty {
                fn to_year(&self) -> std::result::Result<i64, String> {
                    i64::try_from(*self).map_err(|_| format!("{} does not fit in a year", self))
                }
            }
        )*
    };
}

impl_year_argument_for_int!(i16, i32, i64, u16, u32, u64, isize, usize);

impl YearArgument for str {
    fn to_year(&self) -> std::result::Result<i64, String> {
        self.trim()
            .parse::<i64>()
            .map_err(|_| format!("{:?} is not an integer", self))
    }
}

impl YearArgument for String {
    fn to_year(&self) -> std::result::Result<i64, String> {
        self.as_str().to_year()
    }
}

impl<T: YearArgument + ?Sized> YearArgument for &T {
    fn to_year(&self) -> std::result::Result<i64, String> {
        (**self).to_year()
    }
}

/// Coerce `arg` to a four-digit year.
///
/// `name` identifies the argument in the error message (`"first_year"`).
pub fn coerce_year<A: YearArgument + ?Sized>(name: &str, arg: &A) -> Result<i32> {
    let year = arg
        .to_year()
        .map_err(|reason| SeriesError::InvalidYearArgument(format!("{name} {reason}")))?;

    if !VALID_YEARS.contains(&year) {
        return Err(SeriesError::InvalidYearArgument(format!(
            "{name} {year} is not a four-digit year"
        )));
    }

    // Range check above guarantees the value fits.
    Ok(year as i32)
}

/// Validate both endpoints and require `last_year > first_year`.
pub fn coerce_year_range<A, B>(first_year: &A, last_year: &B) -> Result<(i32, i32)>
where
    A: YearArgument + ?Sized,
    B: YearArgument + ?Sized,
{
    let first = coerce_year("first_year", first_year)?;
    let last = coerce_year("last_year", last_year)?;

    if last <= first {
        return Err(SeriesError::InvalidYearArgument(format!(
            "last_year {last} must be greater than first_year {first}"
        )));
    }

    Ok((first, last))
}
