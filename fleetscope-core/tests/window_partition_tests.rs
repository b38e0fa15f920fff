//! Integration tests for splitting date ranges into mileage windows.

use chrono::{Days, NaiveDate};
use fleetscope_core::{DateRange, DateWindow, MAX_WINDOW_DAYS};

fn range_of(days: u64) -> DateRange {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    DateRange::new(start, start + Days::new(days - 1))
}

fn lengths(range: &DateRange) -> Vec<i64> {
    range.windows().map(|w| w.days()).collect()
}

#[test]
fn test_window_count_examples() {
    assert_eq!(lengths(&range_of(1)), vec![1]);
    assert_eq!(lengths(&range_of(7)), vec![7]);
    assert_eq!(lengths(&range_of(8)), vec![7, 1]);
    assert_eq!(lengths(&range_of(14)), vec![7, 7]);
    assert_eq!(lengths(&range_of(15)), vec![7, 7, 1]);
}

#[test]
fn test_windows_partition_the_range() {
    for days in 1..=60 {
        let range = range_of(days);
        let windows: Vec<DateWindow> = range.windows().collect();

        assert_eq!(windows.first().unwrap().start, range.start, "{days} days");
        assert_eq!(windows.last().unwrap().end, range.end, "{days} days");

        for window in &windows {
            assert!(window.start <= window.end);
            assert!(window.days() <= MAX_WINDOW_DAYS as i64);
        }

        // Contiguous and non-overlapping
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end.succ_opt().unwrap(), pair[1].start);
        }

        let covered: i64 = windows.iter().map(DateWindow::days).sum();
        assert_eq!(covered, range.days());
    }
}

#[test]
fn test_windows_ignore_calendar_weeks() {
    // 2024-01-03 is a Wednesday; the first window still runs seven days.
    let range = DateRange::parse("2024-01-03", "2024-01-12").unwrap();
    let windows: Vec<_> = range.windows().map(|w| w.to_string()).collect();

    assert_eq!(windows, vec!["2024-01-03..2024-01-09", "2024-01-10..2024-01-12"]);
}

#[test]
fn test_inverted_range_yields_no_windows() {
    let range = DateRange::parse("2024-02-01", "2024-01-01").unwrap();
    assert!(range.windows().next().is_none());
}
