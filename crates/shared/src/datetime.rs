//! Indonesian date and datetime handling.
//!
//! Upstream documents and API callers use Indonesian month names
//! (e.g. "25 Oktober 2025 10:30:00"); report cells want the same format
//! back. Trip-level dates travel as ISO `YYYY-MM-DD`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;

/// Errors from date/datetime parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateTimeError {
    /// The value does not match the expected shape.
    #[error("invalid datetime format: {0} (expected '25 Oktober 2025 10:30:00')")]
    InvalidFormat(String),

    /// Unknown Indonesian month name.
    #[error("invalid month: {0}")]
    InvalidMonth(String),

    /// A numeric component failed to parse or is out of range.
    #[error("invalid {component}: {value}")]
    InvalidComponent {
        /// Which component failed (day, year, hour, ...).
        component: &'static str,
        /// The offending value.
        value: String,
    },

    /// ISO date failed to parse.
    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Indonesian month name to month number mapping.
static INDONESIAN_MONTHS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("Januari", 1),
        ("Februari", 2),
        ("Maret", 3),
        ("April", 4),
        ("Mei", 5),
        ("Juni", 6),
        ("Juli", 7),
        ("Agustus", 8),
        ("September", 9),
        ("Oktober", 10),
        ("November", 11),
        ("Desember", 12),
    ])
});

/// Month number to Indonesian month name.
const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

fn parse_component(component: &'static str, value: &str) -> Result<u32, DateTimeError> {
    value
        .parse()
        .map_err(|_| DateTimeError::InvalidComponent {
            component,
            value: value.to_string(),
        })
}

/// Parses an Indonesian datetime such as `25 Oktober 2025 10:30:00`.
pub fn parse_indonesian_datetime(value: &str) -> Result<NaiveDateTime, DateTimeError> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let [day, month, year, time] = parts.as_slice() else {
        return Err(DateTimeError::InvalidFormat(value.to_string()));
    };

    let day = parse_component("day", day)?;
    let month = *INDONESIAN_MONTHS
        .get(month)
        .ok_or_else(|| DateTimeError::InvalidMonth((*month).to_string()))?;
    let year: i32 = year
        .parse()
        .map_err(|_| DateTimeError::InvalidComponent {
            component: "year",
            value: (*year).to_string(),
        })?;

    let hms: Vec<&str> = time.split(':').collect();
    let [hour, minute, second] = hms.as_slice() else {
        return Err(DateTimeError::InvalidFormat(value.to_string()));
    };
    let hour = parse_component("hour", hour)?;
    let minute = parse_component("minute", minute)?;
    let second = parse_component("second", second)?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        DateTimeError::InvalidComponent {
            component: "day",
            value: day.to_string(),
        }
    })?;
    let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| {
        DateTimeError::InvalidComponent {
            component: "hour",
            value: hour.to_string(),
        }
    })?;

    Ok(NaiveDateTime::new(date, time))
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, DateTimeError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| DateTimeError::InvalidDate(value.to_string()))
}

/// Formats a date with the Indonesian month name, e.g. `25 Oktober 2025`.
#[must_use]
pub fn format_indonesian_date(date: NaiveDate) -> String {
    use chrono::Datelike;

    let month = MONTH_NAMES[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("25 Oktober 2025 10:30:00", 2025, 10, 25, 10, 30, 0)]
    #[case("1 Januari 2024 00:00:00", 2024, 1, 1, 0, 0, 0)]
    #[case("17 Agustus 2025 23:59:59", 2025, 8, 17, 23, 59, 59)]
    fn test_parse_indonesian_datetime(
        #[case] input: &str,
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] hour: u32,
        #[case] minute: u32,
        #[case] second: u32,
    ) {
        use chrono::{Datelike, Timelike};

        let parsed = parse_indonesian_datetime(input).expect("should parse");
        assert_eq!(parsed.date().year(), year);
        assert_eq!(parsed.date().month(), month);
        assert_eq!(parsed.date().day(), day);
        assert_eq!(parsed.time().hour(), hour);
        assert_eq!(parsed.time().minute(), minute);
        assert_eq!(parsed.time().second(), second);
    }

    #[rstest]
    #[case("25 October 2025 10:30:00")] // English month
    #[case("25 Oktober 2025")] // no time
    #[case("Oktober 25 2025 10:30:00")] // wrong order
    #[case("25 Oktober 2025 10:30")] // missing seconds
    #[case("")]
    fn test_parse_indonesian_datetime_rejects(#[case] input: &str) {
        assert!(parse_indonesian_datetime(input).is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range_day() {
        let err = parse_indonesian_datetime("32 Oktober 2025 10:30:00").unwrap_err();
        assert!(matches!(
            err,
            DateTimeError::InvalidComponent { component: "day", .. }
        ));
    }

    #[test]
    fn test_parse_iso_date() {
        let date = parse_iso_date("2025-10-25").expect("should parse");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 10, 25).unwrap());
        assert!(parse_iso_date("25-10-2025").is_err());
        assert!(parse_iso_date("not a date").is_err());
    }

    #[test]
    fn test_format_indonesian_date() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 2).unwrap();
        assert_eq!(format_indonesian_date(date), "2 Oktober 2025");
    }

    #[test]
    fn test_format_parse_round_trip() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let formatted = format!("{} 08:00:00", format_indonesian_date(date));
        let parsed = parse_indonesian_datetime(&formatted).expect("round trip");
        assert_eq!(parsed.date(), date);
    }
}
