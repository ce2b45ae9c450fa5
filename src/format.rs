//! Korean-locale display formatting used across the dashboard.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::{DashboardError, Result};

/// Format a KRW amount with thousands separators: `150000` → `"150,000원"`.
pub fn format_currency(amount: i64) -> String {
    format!("{}원", group_thousands(amount))
}

/// Insert a comma every three digits from the right.
pub fn group_thousands(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        grouped.push('-');
    }
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && i % 3 == lead % 3 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Long-form Korean date: `"2024-07-15"` → `"2024년 7월 15일"`.
///
/// Accepts bare ISO dates, RFC 3339 timestamps, and naive date-times;
/// stable for any valid ISO date (formatting the timestamp a formatted
/// date denotes yields the same string).
pub fn format_date(input: &str) -> Result<String> {
    let date = parse_iso_date(input)?;
    Ok(format!(
        "{}년 {}월 {}일",
        date.year(),
        date.month(),
        date.day()
    ))
}

/// Zero-padded variant for compact captions: `"2024년 07월 15일"`.
pub fn format_date_padded(input: &str) -> Result<String> {
    let date = parse_iso_date(input)?;
    Ok(format!(
        "{}년 {:02}월 {:02}일",
        date.year(),
        date.month(),
        date.day()
    ))
}

/// Normalize a bare `YYYY-MM-DD` date to the UTC day-start timestamp the
/// backend expects as a range endpoint: `"2024-07-15T00:00:00.000Z"`.
pub fn day_start_utc(date: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        DashboardError::InvalidArgument(format!("expected YYYY-MM-DD date, got '{date}'"))
    })?;
    Ok(format!("{}T00:00:00.000Z", date.format("%Y-%m-%d")))
}

fn parse_iso_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| DashboardError::InvalidArgument(format!("unrecognized date '{input}'")))
}
