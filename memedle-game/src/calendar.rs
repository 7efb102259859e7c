//! Date-to-puzzle arithmetic.
//!
//! Puzzle selection is anchored on a fixed epoch date: whole local-calendar
//! days since the epoch give the day index, and the index maps back to a
//! date for history rendering. Time zones and wall-clock time never enter
//! the math; the caller supplies plain calendar dates.

use chrono::{Days, NaiveDate};
use thiserror::Error;

/// Wire and CLI date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date string that does not parse as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date {input:?}, expected YYYY-MM-DD")]
pub struct InvalidDate {
    pub input: String,
}

/// Whole calendar days from `epoch` to `date`, clamped to zero for dates
/// before the epoch. Dates far in the future stay valid; the index simply
/// keeps growing.
#[must_use]
pub fn day_index(date: NaiveDate, epoch: NaiveDate) -> u32 {
    let days = date.signed_duration_since(epoch).num_days();
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}

/// Calendar date for a day index. Inverse of [`day_index`] for every
/// representable index.
#[must_use]
pub fn date_for_index(index: u32, epoch: NaiveDate) -> NaiveDate {
    epoch
        .checked_add_days(Days::new(u64::from(index)))
        .unwrap_or(NaiveDate::MAX)
}

/// Parse a `YYYY-MM-DD` string into a date.
///
/// # Errors
///
/// Returns [`InvalidDate`] when the input does not match the format or
/// names a nonexistent calendar day.
pub fn parse_date(input: &str) -> Result<NaiveDate, InvalidDate> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| InvalidDate {
        input: input.to_string(),
    })
}
