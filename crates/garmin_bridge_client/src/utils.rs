//! Calendar date helpers shared by the client and the sync driver.

use chrono::{Duration, NaiveDate};

/// Parse a strict ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
}

/// Every calendar day from `start` to `end`, both inclusive.
///
/// Returns an empty list when `start` is after `end`.
pub fn expand_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// The seven days before `today` plus `today` itself.
pub fn last_week(today: NaiveDate) -> Vec<NaiveDate> {
    expand_range(today - Duration::days(7), today)
}
