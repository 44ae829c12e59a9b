use anyhow::{anyhow, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const DATE_FMT: &str = "%Y-%m-%d";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FMT).map_err(|e| anyhow!("Bad date '{}': {}", s, e))
}

pub fn date_str(d: NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

/// Whole days between two dates, always non-negative.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs()
}

/// The Monday that starts the calendar week containing `d`.
pub fn week_monday(d: NaiveDate) -> NaiveDate {
    let offset = d.weekday().num_days_from_monday() as i64;
    d - Duration::days(offset)
}

/// All seven dates of the Monday–Sunday week containing `d`.
pub fn week_days(d: NaiveDate) -> Vec<String> {
    let monday = week_monday(d);
    (0..7).map(|i| date_str(monday + Duration::days(i))).collect()
}

pub fn is_monday(d: NaiveDate) -> bool {
    d.weekday() == Weekday::Mon
}

/// "YYYY-MM" prefix of a date string.
pub fn month_key(date: &str) -> &str {
    if date.len() >= 7 { &date[..7] } else { date }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monday_of_week() {
        // 2025-06-11 is a Wednesday
        let wed = parse_date("2025-06-11").unwrap();
        assert_eq!(date_str(week_monday(wed)), "2025-06-09");
        // A Monday maps to itself
        let mon = parse_date("2025-06-09").unwrap();
        assert_eq!(week_monday(mon), mon);
        // A Sunday belongs to the preceding Monday's week
        let sun = parse_date("2025-06-15").unwrap();
        assert_eq!(date_str(week_monday(sun)), "2025-06-09");
    }

    #[test]
    fn week_days_span_mon_to_sun() {
        let days = week_days(parse_date("2025-06-11").unwrap());
        assert_eq!(days.first().unwrap(), "2025-06-09");
        assert_eq!(days.last().unwrap(), "2025-06-15");
        assert_eq!(days.len(), 7);
    }

    #[test]
    fn day_gaps() {
        let a = parse_date("2025-06-09").unwrap();
        let b = parse_date("2025-06-12").unwrap();
        assert_eq!(days_between(a, b), 3);
        assert_eq!(days_between(b, a), 3);
        assert_eq!(days_between(a, a), 0);
    }
}
