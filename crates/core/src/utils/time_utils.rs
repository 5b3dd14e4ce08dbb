use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::errors::{Error, Result, ValidationError};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Resolves a `YYYY-MM` month into its inclusive reporting window:
/// the first day at 00:00:00 through the last day at 23:59:59.
pub fn month_bounds(month: &str) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let month = month.trim();
    let first_day = if month.len() == 7 {
        NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d").ok()
    } else {
        None
    }
    .ok_or_else(|| {
        Error::Validation(ValidationError::InvalidInput(format!(
            "Invalid month '{}', expected YYYY-MM",
            month
        )))
    })?;

    month_window(first_day)
}

/// Returns the inclusive reporting window of the month containing `date`.
pub fn month_window_for(date: NaiveDateTime) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let first_day = date.date().with_day(1).ok_or_else(|| {
        Error::Unexpected(format!("Cannot resolve first day of month for {}", date))
    })?;
    month_window(first_day)
}

fn month_window(first_day: NaiveDate) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let (next_year, next_month) = if first_day.month() == 12 {
        (first_day.year() + 1, 1)
    } else {
        (first_day.year(), first_day.month() + 1)
    };
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1).ok_or_else(|| {
        Error::Unexpected(format!("Month after {} is out of range", first_day))
    })?;

    let start = first_day.and_time(chrono::NaiveTime::MIN);
    let end = next_first.and_time(chrono::NaiveTime::MIN) - Duration::seconds(1);
    Ok((start, end))
}

/// Whole days from `now` until `target`, rounded up. Negative once `target` has passed.
pub fn days_until_ceil(now: NaiveDateTime, target: NaiveDateTime) -> i64 {
    let millis = (target - now).num_milliseconds();
    -((-millis).div_euclid(MILLIS_PER_DAY))
}

/// True when both timestamps fall on the same wall-clock calendar day.
pub fn is_same_calendar_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_month_bounds_regular_month() {
        let (start, end) = month_bounds("2024-04").unwrap();
        assert_eq!(start, at(2024, 4, 1, 0, 0, 0));
        assert_eq!(end, at(2024, 4, 30, 23, 59, 59));
    }

    #[test]
    fn test_month_bounds_leap_february() {
        let (_, end) = month_bounds("2024-02").unwrap();
        assert_eq!(end, at(2024, 2, 29, 23, 59, 59));
    }

    #[test]
    fn test_month_bounds_december_rolls_year() {
        let (start, end) = month_bounds("2023-12").unwrap();
        assert_eq!(start, at(2023, 12, 1, 0, 0, 0));
        assert_eq!(end, at(2023, 12, 31, 23, 59, 59));
    }

    #[test]
    fn test_month_bounds_rejects_garbage() {
        assert!(month_bounds("2024-13").is_err());
        assert!(month_bounds("2024").is_err());
        assert!(month_bounds("april").is_err());
        assert!(month_bounds("2024-04-01").is_err());
    }

    #[test]
    fn test_month_window_for_mid_month() {
        let (start, end) = month_window_for(at(2025, 1, 17, 13, 5, 0)).unwrap();
        assert_eq!(start, at(2025, 1, 1, 0, 0, 0));
        assert_eq!(end, at(2025, 1, 31, 23, 59, 59));
    }

    #[test]
    fn test_days_until_ceil_rounds_partial_days_up() {
        let now = at(2024, 5, 1, 12, 0, 0);
        assert_eq!(days_until_ceil(now, at(2024, 5, 3, 12, 0, 0)), 2);
        assert_eq!(days_until_ceil(now, at(2024, 5, 3, 12, 0, 1)), 3);
        assert_eq!(days_until_ceil(now, at(2024, 5, 1, 13, 0, 0)), 1);
        assert_eq!(days_until_ceil(now, now), 0);
    }

    #[test]
    fn test_days_until_ceil_past_target_is_negative_or_zero() {
        let now = at(2024, 5, 3, 12, 0, 0);
        // Less than a day in the past still rounds up to zero.
        assert_eq!(days_until_ceil(now, at(2024, 5, 3, 6, 0, 0)), 0);
        assert_eq!(days_until_ceil(now, at(2024, 5, 1, 12, 0, 0)), -2);
    }

    #[test]
    fn test_is_same_calendar_day() {
        assert!(is_same_calendar_day(
            at(2024, 5, 3, 0, 0, 0),
            at(2024, 5, 3, 23, 59, 59)
        ));
        assert!(!is_same_calendar_day(
            at(2024, 5, 3, 23, 59, 59),
            at(2024, 5, 4, 0, 0, 0)
        ));
    }
}
