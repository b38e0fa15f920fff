//! Date ranges and the windows the mileage endpoint accepts.
//!
//! The upstream mileage endpoint refuses requests spanning more than
//! [`MAX_WINDOW_DAYS`] days, so a caller's range is split into consecutive
//! windows measured from the start of whatever remains of the range.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Wire format for dates, both in user input and in request bodies.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Maximum length of a single window, inclusive of both ends.
pub const MAX_WINDOW_DAYS: u64 = 7;

/// Parses a `YYYY-MM-DD` date. Surrounding whitespace is rejected.
fn parse_date(input: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|source| {
        CoreError::InvalidDate {
            input: input.to_string(),
            source,
        }
    })
}

// ============================================================================
// Date Range
// ============================================================================

/// A closed interval `[start, end]` of calendar dates.
///
/// A range with `start > end` is empty: it yields no windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range from two dates.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parses a range from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDate`] if either string is malformed or
    /// names a date that does not exist.
    pub fn parse(start: &str, end: &str) -> Result<Self, CoreError> {
        Ok(Self::new(parse_date(start)?, parse_date(end)?))
    }

    /// Returns true if the range contains no days.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Number of days in the range, inclusive.
    pub fn days(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_days() + 1
        }
    }

    /// Splits the range into windows of at most [`MAX_WINDOW_DAYS`] days.
    pub fn windows(&self) -> DateWindows {
        DateWindows {
            next_start: Some(self.start),
            end: self.end,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

// ============================================================================
// Date Window
// ============================================================================

/// A sub-range sent to the mileage endpoint in a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window (inclusive).
    pub end: NaiveDate,
}

impl DateWindow {
    /// Number of days covered, inclusive.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Start date in wire format.
    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// End date in wire format.
    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_param(), self.end_param())
    }
}

/// Iterator over the windows of a [`DateRange`], in chronological order.
#[derive(Debug, Clone)]
pub struct DateWindows {
    next_start: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DateWindows {
    type Item = DateWindow;

    fn next(&mut self) -> Option<DateWindow> {
        let start = self.next_start?;
        if start > self.end {
            self.next_start = None;
            return None;
        }

        // Capped against the remaining range, not calendar weeks.
        let end = start
            .checked_add_days(Days::new(MAX_WINDOW_DAYS - 1))
            .map_or(self.end, |candidate| candidate.min(self.end));

        self.next_start = end.succ_opt();
        Some(DateWindow { start, end })
    }
}

impl std::iter::FusedIterator for DateWindows {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid_range() {
        let range = DateRange::parse("2024-03-01", "2024-03-10").unwrap();
        assert_eq!(range.start, date(2024, 3, 1));
        assert_eq!(range.end, date(2024, 3, 10));
        assert_eq!(range.days(), 10);
    }

    #[test]
    fn test_parse_rejects_impossible_date() {
        let err = DateRange::parse("2024-13-40", "2024-12-31").unwrap_err();
        assert!(matches!(err, CoreError::InvalidDate { ref input, .. } if input == "2024-13-40"));
    }

    #[test]
    fn test_parse_rejects_garbage_end() {
        let err = DateRange::parse("2024-01-01", "yesterday").unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_parse_rejects_padded_date() {
        assert!(DateRange::parse(" 2024-01-01 ", "2024-01-02").is_err());
        assert!(DateRange::parse("2024-01-01", "2024-01-02\n").is_err());
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = DateRange::parse("2024-03-10", "2024-03-01").unwrap();
        assert!(range.is_empty());
        assert_eq!(range.days(), 0);
        assert_eq!(range.windows().count(), 0);
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        let range = DateRange::new(date(2024, 2, 27), date(2024, 3, 6));
        let windows: Vec<_> = range.windows().collect();

        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].start, date(2024, 2, 27));
        assert_eq!(windows[0].end, date(2024, 3, 4));
        assert_eq!(windows[1].start, date(2024, 3, 5));
        assert_eq!(windows[1].end, date(2024, 3, 6));
    }

    #[test]
    fn test_window_params() {
        let range = DateRange::new(date(2024, 1, 5), date(2024, 1, 5));
        let window = range.windows().next().unwrap();
        assert_eq!(window.start_param(), "2024-01-05");
        assert_eq!(window.end_param(), "2024-01-05");
        assert_eq!(window.to_string(), "2024-01-05..2024-01-05");
    }

    #[test]
    fn test_range_ending_at_max_date_terminates() {
        let range = DateRange::new(NaiveDate::MAX - Days::new(2), NaiveDate::MAX);
        let windows: Vec<_> = range.windows().collect();

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].end, NaiveDate::MAX);
    }
}
