//! ISO-8601 date parsing to epoch milliseconds.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse the date forms found in feature `dateTimes` and timeline windows.
///
/// Accepts a bare year (`1850`), year-month (`1850-06`), a calendar date
/// (`1850-06-01`), a date-time without offset (read as UTC) and a full
/// RFC 3339 timestamp. Returns `None` for anything else.
pub fn parse_iso_millis(input: &str) -> Option<i64> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.and_utc().timestamp_millis());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return midnight_millis(date);
    }

    let (year, month) = match s.split_once('-') {
        Some((y, m)) if is_year(y) && m.len() == 2 => (y, m.parse::<u32>().ok()?),
        None if is_year(s) => (s, 1),
        _ => return None,
    };
    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)?;
    midnight_millis(date)
}

fn is_year(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit())
}

fn midnight_millis(date: NaiveDate) -> Option<i64> {
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}
