//! Lenient numeric and datetime coercion.
//!
//! Coercion never fails: a value that cannot be interpreted is reported as
//! `None` and callers treat it as missing data.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::dataset::Value;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Interpret a cell as a float
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) if !n.is_nan() => Some(*n),
        Value::Text(text) => text.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
        _ => None,
    }
}

/// Interpret a cell as a timestamp.
///
/// Integers between 1000 and 9999 are read as the first of January of that
/// year; other numbers are not dates.
pub fn to_datetime(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Number(n) => year_start(*n),
        Value::Text(text) => parse_datetime(text.trim()),
        Value::Missing => None,
    }
}

/// Coerce a whole column positionally; uncoercible cells become `None`
pub fn numbers(values: &[Value]) -> Vec<Option<f64>> {
    values.iter().map(to_number).collect()
}

/// Coerce a whole column positionally; uncoercible cells become `None`
pub fn datetimes(values: &[Value]) -> Vec<Option<NaiveDateTime>> {
    values.iter().map(to_datetime).collect()
}

/// Only the values that coerced successfully
pub fn present_numbers(values: &[Value]) -> Vec<f64> {
    values.iter().filter_map(to_number).collect()
}

fn year_start(n: f64) -> Option<NaiveDateTime> {
    if n.fract() != 0.0 || !(1000.0..=9999.0).contains(&n) {
        return None;
    }
    NaiveDate::from_ymd_opt(n as i32, 1, 1).map(|date| date.and_time(NaiveTime::MIN))
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    if text.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    // Year-month, e.g. 2024-03
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    text.parse::<f64>().ok().and_then(year_start)
}
