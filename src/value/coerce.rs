//! Raw-value coercion.
//!
//! Cells come out of CSV/XLSX import as strings more often than not, and
//! the strings carry human notation: currency symbols, thousands
//! separators, percent signs, accounting-style parenthetical negatives.
//! The normalizer here is the single source of truth for turning those
//! into numbers; filters, aggregation, and the rolling/yoy transforms all
//! go through it.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::Value;

use super::{format_number, Scalar};
use crate::model::FieldType;

/// Signed decimal remainder after notation stripping.
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\d*\.?\d+$").unwrap());

/// ISO-ish date prefix: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, with an optional
/// time tail after `T` or whitespace.
static ISO_DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})(?:-(\d{1,2})(?:-(\d{1,2}))?)?(?:[Tt\s].*)?$").unwrap());

/// Coerce a raw cell value to the field's declared type.
///
/// Anything that cannot be represented in the target type becomes
/// [`Scalar::Null`]; this function never fails.
pub fn coerce(raw: &Value, ty: FieldType) -> Scalar {
    match ty {
        FieldType::Number => parse_number(raw)
            .map(Scalar::Number)
            .unwrap_or(Scalar::Null),
        FieldType::Date => parse_date(&text_of(raw))
            .map(Scalar::Date)
            .unwrap_or(Scalar::Null),
        FieldType::Bool => match text_of(raw).trim().to_lowercase().as_str() {
            "true" | "yes" | "y" => Scalar::Bool(true),
            "false" | "no" | "n" => Scalar::Bool(false),
            _ => Scalar::Null,
        },
        FieldType::String => Scalar::Text(text_of(raw).trim().to_string()),
    }
}

/// Parse a raw cell into a finite number, tolerating human notation.
///
/// `"(1,234.50)"` → `-1234.5`, `"12%"` → `0.12`, `"$1,000"` → `1000`,
/// `"abc"` and `""` → `None`.
pub fn parse_number(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_number_str(s),
        _ => None,
    }
}

fn parse_number_str(raw: &str) -> Option<f64> {
    let mut s = raw.trim();
    if s.is_empty() {
        return None;
    }

    // Accounting convention: (123) means -123.
    let mut negative = false;
    if s.starts_with('(') && s.ends_with(')') && s.len() >= 2 {
        s = &s[1..s.len() - 1];
        negative = true;
    }

    let mut percent = false;
    if let Some(stripped) = s.strip_suffix('%') {
        s = stripped;
        percent = true;
    }

    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | '¥' | ','))
        .collect();
    let cleaned = cleaned.trim();
    if !NUMBER_PATTERN.is_match(cleaned) {
        return None;
    }

    let mut value: f64 = cleaned.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    if percent {
        value /= 100.0;
    }
    if negative {
        value = -value;
    }
    Some(value)
}

/// Parse an ISO-ish date string. Accepts full RFC 3339 timestamps as well
/// as `YYYY`, `YYYY-MM`, and `YYYY-MM-DD` prefixes; missing components
/// default to the start of the period.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    let (year, month, day) = parse_date_parts(s)?;
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}

/// Split an ISO-ish date string into (year, month, day), defaulting the
/// month and day to 1. Returns `None` when the string doesn't start with
/// a four-digit year.
pub(crate) fn parse_date_parts(raw: &str) -> Option<(i32, u32, u32)> {
    let caps = ISO_DATE_PREFIX.captures(raw.trim())?;
    let year = caps.get(1)?.as_str().parse().ok()?;
    let month = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(1);
    let day = caps
        .get(3)
        .and_then(|d| d.as_str().parse().ok())
        .unwrap_or(1);
    Some((year, month, day))
}

/// The string form of a raw cell. JSON null stringifies to `""` so that
/// string-typed fields treat missing data as empty rather than "null".
pub(crate) fn text_of(raw: &Value) -> String {
    match raw {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n
            .as_f64()
            .map(format_number)
            .unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}
