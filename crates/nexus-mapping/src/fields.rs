// SPDX-FileCopyrightText: 2026 Nexus Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data-driven field extraction.
//!
//! Upstream field names vary by platform, so each domain field is described by
//! an ordered table of [`Extract`] strategies. The first strategy producing a
//! non-default value wins; the mapper supplies the default.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// A key path into a record; numeric segments index into arrays.
pub type Path = &'static [&'static str];

/// One way of reading a field out of a raw record.
#[derive(Debug, Clone, Copy)]
pub enum Extract {
    /// The value at a key path.
    At(Path),
    /// String values at several paths joined by a space, then trimmed.
    Joined(&'static [Path]),
    /// Length of the list at a key path.
    Len(Path),
}

/// Follow `path` through objects and arrays.
pub fn lookup<'a>(record: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(record, |current, segment| match current {
        Value::Object(map) => map.get(*segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Lenient numeric coercion: numbers, numeric strings and booleans.
///
/// Returns `None` for anything that is not a finite number.
pub fn to_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().ok()?
            }
        }
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First non-empty string.
pub fn text(record: &Value, rules: &[Extract]) -> Option<String> {
    rules.iter().find_map(|rule| match rule {
        Extract::At(path) => lookup(record, path).and_then(to_text),
        Extract::Joined(paths) => {
            let joined = paths
                .iter()
                .filter_map(|path| lookup(record, path).and_then(to_text))
                .collect::<Vec<_>>()
                .join(" ");
            let trimmed = joined.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Extract::Len(path) => lookup(record, path)
            .and_then(Value::as_array)
            .map(|items| items.len().to_string()),
    })
}

/// First finite, non-zero number.
pub fn number(record: &Value, rules: &[Extract]) -> Option<f64> {
    rules.iter().find_map(|rule| {
        let n = match rule {
            Extract::At(path) => lookup(record, path).and_then(to_number),
            Extract::Len(path) => lookup(record, path)
                .and_then(Value::as_array)
                .map(|items| items.len() as f64),
            Extract::Joined(_) => None,
        };
        n.filter(|n| *n != 0.0)
    })
}

/// First present count; a list counts even when empty.
pub fn count(record: &Value, rules: &[Extract]) -> Option<u64> {
    rules.iter().find_map(|rule| match rule {
        Extract::Len(path) => lookup(record, path)
            .and_then(Value::as_array)
            .map(|items| items.len() as u64),
        Extract::At(path) => lookup(record, path)
            .and_then(to_number)
            .filter(|n| *n > 0.0)
            .map(|n| n.floor() as u64),
        Extract::Joined(_) => None,
    })
}

/// First explicit boolean (`true`/`false`, or the strings `"true"`/`"false"`).
pub fn flag(record: &Value, rules: &[Extract]) -> Option<bool> {
    rules.iter().find_map(|rule| match rule {
        Extract::At(path) => match lookup(record, path)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// First value that parses as a point in time.
pub fn timestamp(record: &Value, rules: &[Extract]) -> Option<DateTime<Utc>> {
    rules.iter().find_map(|rule| match rule {
        Extract::At(path) => lookup(record, path).and_then(parse_timestamp),
        _ => None,
    })
}

/// Parse RFC 3339, naive `YYYY-MM-DD[ HH:MM:SS]` (as UTC) or epoch numbers.
///
/// Epoch values above 10^11 are taken as milliseconds.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(Utc.from_utc_datetime(&naive));
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
        }
        Value::Number(n) => {
            let raw = n.as_f64()?;
            if !raw.is_finite() || raw <= 0.0 {
                return None;
            }
            let millis = if raw > 1e11 { raw } else { raw * 1000.0 };
            DateTime::from_timestamp_millis(millis as i64)
        }
        _ => None,
    }
}

/// Clamp to a non-negative amount.
pub fn non_negative(n: f64) -> f64 {
    if n > 0.0 { n } else { 0.0 }
}
