//! Typed cell values.
//!
//! Dataset cells arrive as raw JSON values (strings, numbers, booleans,
//! nulls). Before a filter or aggregate can look at them they are coerced
//! into a [`Scalar`] according to the field's declared type; comparisons
//! then happen on the coerced form, never on raw strings.

mod coerce;

pub use coerce::{coerce, parse_date, parse_number};
pub(crate) use coerce::{parse_date_parts, text_of};

use chrono::NaiveDateTime;
use serde_json::Value;
use std::cmp::Ordering;

/// A coerced cell value.
///
/// `Null` stands in for anything that failed coercion — downstream stages
/// treat it as "absent", not as zero or an empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Number(f64),
    Bool(bool),
    Date(NaiveDateTime),
    Text(String),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// String form used by CONTAINS filters and display fallbacks.
    pub fn display(&self) -> String {
        match self {
            Scalar::Null => String::new(),
            Scalar::Number(n) => format_number(*n),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Date(d) => d.format("%Y-%m-%dT%H:%M:%S").to_string(),
            Scalar::Text(s) => s.clone(),
        }
    }
}

/// Type-aware ordering: numeric for numbers, timestamp for dates, string
/// order for text. Returns `None` when either side is null or the kinds
/// don't line up — callers treat that as a failed comparison, so a null
/// cell never satisfies a range filter.
pub fn compare(a: &Scalar, b: &Scalar) -> Option<Ordering> {
    match (a, b) {
        (Scalar::Number(x), Scalar::Number(y)) => x.partial_cmp(y),
        (Scalar::Date(x), Scalar::Date(y)) => Some(x.cmp(y)),
        (Scalar::Text(x), Scalar::Text(y)) => Some(x.cmp(y)),
        (Scalar::Bool(x), Scalar::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Format a number the way a spreadsheet cell would show it: integers
/// without a decimal point, everything else via the shortest float form.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

/// Wrap a finite float back into a JSON number.
pub(crate) fn number_value(n: f64) -> Value {
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
