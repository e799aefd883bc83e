//! Post-aggregation row transforms.
//!
//! Transforms reshape already-shaped row lists for presentation — they
//! know nothing about datasets, semantic layers, or query specs, and
//! compose freely with query output or any other row source. Dispatch is
//! a plain sum type: no registry, no shared state, nothing to set up in
//! tests.
//!
//! [`apply`] never fails. A [`Transform::Unknown`] type or a transform
//! missing a required option passes rows through untouched; strict-mode
//! callers use [`validate`] to surface those conditions first.

mod pivot;
mod rolling;
mod sort;
mod yoy;

pub use pivot::PivotOptions;
pub use rolling::RollingOptions;
pub use sort::{sort_rows_with, SortOptions};
pub use yoy::YoyOptions;

use std::cmp::Ordering;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::ValidationError;
use crate::model::Row;
use crate::value::format_number;

/// Sort direction. Nulls sort last regardless of direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub(crate) fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    }
}

/// A named post-processing step, as configured on a dashboard panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    Sort(SortOptions),
    Pivot(PivotOptions),
    Rolling(RollingOptions),
    YearOverYear(YoyOptions),
    /// Unrecognized `type` tag, kept for diagnostics. Applies as a no-op.
    Unknown(String),
}

impl<'de> Deserialize<'de> for Transform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let parsed = match kind.as_str() {
            "sort" => SortOptions::deserialize(&value).map(Transform::Sort),
            "pivot" => PivotOptions::deserialize(&value).map(Transform::Pivot),
            "rolling" => RollingOptions::deserialize(&value).map(Transform::Rolling),
            "yoy" => YoyOptions::deserialize(&value).map(Transform::YearOverYear),
            _ => return Ok(Transform::Unknown(kind)),
        };
        parsed.map_err(D::Error::custom)
    }
}

#[derive(Serialize)]
struct Tagged<'a, T: Serialize> {
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(flatten)]
    options: &'a T,
}

impl Serialize for Transform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Transform::Sort(o) => Tagged { kind: "sort", options: o }.serialize(serializer),
            Transform::Pivot(o) => Tagged { kind: "pivot", options: o }.serialize(serializer),
            Transform::Rolling(o) => Tagged { kind: "rolling", options: o }.serialize(serializer),
            Transform::YearOverYear(o) => Tagged { kind: "yoy", options: o }.serialize(serializer),
            Transform::Unknown(kind) => {
                #[derive(Serialize)]
                struct KindOnly<'a> {
                    #[serde(rename = "type")]
                    kind: &'a str,
                }
                KindOnly { kind }.serialize(serializer)
            }
        }
    }
}

/// Apply one transform, returning new rows. Never fails: unknown types
/// and missing required options pass the input through as a copy.
pub fn apply(rows: &[Row], transform: &Transform) -> Vec<Row> {
    match transform {
        Transform::Sort(o) => sort::apply(rows, o),
        Transform::Pivot(o) => pivot::apply(rows, o),
        Transform::Rolling(o) => rolling::apply(rows, o),
        Transform::YearOverYear(o) => yoy::apply(rows, o),
        Transform::Unknown(_) => rows.to_vec(),
    }
}

/// Apply an ordered sequence of transforms (left fold). An empty
/// sequence returns a copy of the input.
pub fn apply_all(rows: &[Row], transforms: &[Transform]) -> Vec<Row> {
    let mut current = rows.to_vec();
    for transform in transforms {
        current = apply(&current, transform);
    }
    current
}

/// Report what [`apply`] would silently tolerate: an unknown transform
/// type or a missing required option.
pub fn validate(transform: &Transform) -> Result<(), ValidationError> {
    fn require(
        opt: &Option<String>,
        kind: &'static str,
        option: &'static str,
    ) -> Result<(), ValidationError> {
        match opt {
            Some(_) => Ok(()),
            None => Err(ValidationError::MissingTransformOption { kind, option }),
        }
    }
    match transform {
        Transform::Sort(o) => require(&o.field, "sort", "field"),
        Transform::Pivot(o) => {
            require(&o.index, "pivot", "index")?;
            require(&o.column, "pivot", "column")?;
            require(&o.value, "pivot", "value")
        }
        Transform::Rolling(o) => require(&o.field, "rolling", "field"),
        Transform::YearOverYear(o) => {
            require(&o.field, "yoy", "field")?;
            require(&o.date_field, "yoy", "dateField")
        }
        Transform::Unknown(kind) => Err(ValidationError::UnknownTransform(kind.clone())),
    }
}

/// Display label of a raw cell, used for pivot column names and string
/// comparisons.
pub(crate) fn cell_label(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n
            .as_f64()
            .map(format_number)
            .unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}

/// Cell comparator shared by the sort and rolling transforms: nulls and
/// missing fields sort last in either direction; numbers compare
/// numerically, everything else by label.
pub(crate) fn cmp_cells(a: Option<&Value>, b: Option<&Value>, order: SortDir) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => order.apply(raw_cmp(x, y)),
    }
}

fn raw_cmp(a: &Value, b: &Value) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => cell_label(a).cmp(&cell_label(b)),
    }
}
