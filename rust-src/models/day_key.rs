//! Day keys addressing a single calendar cell.
//!
//! Keys render as `"{year}-{month}-{day}"` where `month` is zero-based,
//! matching the format persisted by earlier releases.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;


/// Errors raised when building or parsing a day key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DayKeyError {
    #[error("month index {0} is out of range (expected 0-11)")]
    MonthOutOfRange(u32),

    #[error("month {0} is out of range (expected 1-12)")]
    MonthNumberOutOfRange(u32),

    #[error("day {day} does not exist in {year}-{month}")]
    DayOutOfRange { year: i32, month: u32, day: u32 },

    #[error("year {0} is outside the supported calendar range")]
    YearOutOfRange(i32),

    #[error("malformed day key: {0:?}")]
    Malformed(String),

    #[error("malformed date {0:?} (expected YYYY-MM-DD)")]
    MalformedDate(String),
}


/// Calendar coordinates of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey {
    pub year: i32,
    /// Zero-based month index (January = 0).
    pub month: u32,
    pub day: u32,
}


impl DayKey {
    /// Build a key, rejecting coordinates that are not a real date.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DayKeyError> {
        if month > 11 {
            return Err(DayKeyError::MonthOutOfRange(month));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(DayKeyError::DayOutOfRange { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Convert a calendar date (one-based month) into a key.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
            day: date.day(),
        }
    }

    /// Parse the human `YYYY-MM-DD` form used on the command line.
    pub fn parse_date(input: &str) -> Result<Self, DayKeyError> {
        NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
            .map(Self::from_date)
            .map_err(|_| DayKeyError::MalformedDate(input.to_string()))
    }

    /// The calendar date this key addresses.
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, self.day)
    }
}


impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}


impl FromStr for DayKey {
    type Err = DayKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DayKeyError::Malformed(s.to_string());

        // A leading '-' belongs to a negative year.
        let (sign, rest) = match s.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, s),
        };

        let mut parts = rest.split('-');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };

        let year: i32 = year.parse().map_err(|_| malformed())?;
        let month: u32 = month.parse().map_err(|_| malformed())?;
        let day: u32 = day.parse().map_err(|_| malformed())?;

        Self::new(sign * year, month, day)
    }
}


/// Key prefix selecting every day of a month.
///
/// The trailing separator keeps month 1 from matching months 10 and 11.
pub fn month_prefix(year: i32, month: u32) -> String {
    format!("{year}-{month}-")
}


/// Key prefix selecting every day of a year.
pub fn year_prefix(year: i32) -> String {
    format!("{year}-")
}


/// Number of days in a zero-based month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if month > 11 {
        return 0;
    }
    let Some(first) = NaiveDate::from_ymd_opt(year, month + 1, 1) else {
        return 0;
    };
    // December needs no lookahead, which also keeps the last representable year valid.
    if month == 11 {
        return 31;
    }
    match NaiveDate::from_ymd_opt(year, month + 2, 1) {
        Some(next) => (next - first).num_days() as u32,
        None => 0,
    }
}


/// First day of a zero-based month, or an error when chrono cannot represent it.
pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, DayKeyError> {
    if month > 11 {
        return Err(DayKeyError::MonthOutOfRange(month));
    }
    NaiveDate::from_ymd_opt(year, month + 1, 1).ok_or(DayKeyError::YearOutOfRange(year))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_unpadded_and_zero_based() {
        let key = DayKey::new(2024, 0, 5).unwrap();
        assert_eq!(key.to_string(), "2024-0-5");
    }

    #[test]
    fn test_parse_date_shifts_month() {
        let key = DayKey::parse_date("2024-03-09").unwrap();
        assert_eq!(key, DayKey { year: 2024, month: 2, day: 9 });
        assert_eq!(key.to_string(), "2024-2-9");
    }

    #[test]
    fn test_from_str_round_trip() {
        let key: DayKey = "2023-11-31".parse().unwrap();
        assert_eq!(key.to_date(), NaiveDate::from_ymd_opt(2023, 12, 31));
        assert_eq!(key.to_string().parse::<DayKey>().unwrap(), key);
    }

    #[test]
    fn test_rejects_invalid_coordinates() {
        assert_eq!(DayKey::new(2024, 12, 1), Err(DayKeyError::MonthOutOfRange(12)));
        assert!(DayKey::new(2023, 1, 29).is_err());
        assert!(DayKey::new(2024, 1, 29).is_ok());
        assert!("2024-0".parse::<DayKey>().is_err());
        assert!("2024-0-1-2".parse::<DayKey>().is_err());
        assert!(DayKey::parse_date("15/01/2024").is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 0), 31);
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(2024, 11), 31);
        assert_eq!(days_in_month(2024, 3), 30);
    }

    #[test]
    fn test_days_in_month_at_the_edges_of_the_calendar() {
        assert_eq!(days_in_month(i32::MAX, 11), 0);
        assert_eq!(days_in_month(i32::MIN, 0), 0);
        assert_eq!(days_in_month(2024, u32::MAX), 0);

        let last = NaiveDate::MAX;
        assert_eq!(days_in_month(last.year(), 11), 31);
        assert_eq!(first_of_month(i32::MAX, 11), Err(DayKeyError::YearOutOfRange(i32::MAX)));
        assert_eq!(first_of_month(2024, 12), Err(DayKeyError::MonthOutOfRange(12)));
        assert!(DayKey::new(i32::MAX, 11, 1).is_err());
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(month_prefix(2024, 1), "2024-1-");
        assert!(!"2024-10-3".starts_with(&month_prefix(2024, 1)));
        assert!("2024-10-3".starts_with(&year_prefix(2024)));
    }
}
