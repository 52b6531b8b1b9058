//! Lenient date and time parsing for text input.
//!
//! Both helpers return `None` on failure so callers choose their own fallback.

use chrono::{NaiveDate, NaiveTime};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const TIME_FORMATS: [&str; 3] = ["%H:%M:%S", "%H:%M", "%I:%M %p"];

/// Parses `YYYY-MM-DD` or `MM/DD/YYYY`.
///
/// ```
/// use payroll_engine::parsing::parse_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2026, 3, 2);
/// assert_eq!(parse_date("2026-03-02"), expected);
/// assert_eq!(parse_date("03/02/2026"), expected);
/// assert_eq!(parse_date("yesterday"), None);
/// ```
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
}

/// Parses `HH:MM`, `HH:MM:SS` or `HH:MM AM`; single-digit hours are accepted.
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(input, format).ok())
}
