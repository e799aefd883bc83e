// src/transform/yoy.rs
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::Row;
use crate::value::{number_value, parse_date_parts, parse_number};

/// Options for the year-over-year delta transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct YoyOptions {
    pub field: Option<String>,
    pub date_field: Option<String>,
    /// Output field; defaults to `<field>_yoy`.
    pub result_field: Option<String>,
    /// Relative change `(current - previous) / previous` when true,
    /// absolute `current - previous` otherwise.
    pub percent: bool,
}

impl Default for YoyOptions {
    fn default() -> Self {
        YoyOptions {
            field: None,
            date_field: None,
            result_field: None,
            percent: true,
        }
    }
}

/// Year-over-year delta: each row is matched with the row one year
/// earlier that shares its month-day signature. The result is null when
/// the date doesn't parse, either value is missing, or (in percent mode)
/// the previous value is exactly zero.
pub(crate) fn apply(rows: &[Row], opts: &YoyOptions) -> Vec<Row> {
    let (Some(field), Some(date_field)) = (opts.field.as_deref(), opts.date_field.as_deref())
    else {
        return rows.to_vec();
    };
    let result_field = opts
        .result_field
        .clone()
        .unwrap_or_else(|| format!("{field}_yoy"));

    // "{year}-{signature}" → numeric value; a later duplicate wins.
    let mut by_period: HashMap<String, f64> = HashMap::new();
    for row in rows {
        if let Some((year, sig)) = year_signature(row.get(date_field).unwrap_or(&Value::Null)) {
            if let Some(v) = row.get(field).and_then(parse_number) {
                by_period.insert(format!("{year}-{sig}"), v);
            }
        }
    }

    rows.iter()
        .map(|row| {
            let mut out = row.clone();
            let delta = year_signature(row.get(date_field).unwrap_or(&Value::Null)).and_then(
                |(year, sig)| {
                    let current = row.get(field).and_then(parse_number)?;
                    let previous = *by_period.get(&format!("{}-{}", year - 1, sig))?;
                    if opts.percent {
                        if previous == 0.0 {
                            None
                        } else {
                            Some((current - previous) / previous)
                        }
                    } else {
                        Some(current - previous)
                    }
                },
            );
            out.insert(
                result_field.clone(),
                delta.map(number_value).unwrap_or(Value::Null),
            );
            out
        })
        .collect()
}

/// Year plus a year-independent month-day signature, so Jan 15 2023 and
/// Jan 15 2024 line up. Accepts bare year numbers and ISO-ish strings
/// (`YYYY`, `YYYY-MM`, `YYYY-MM-DD` prefix); missing components default
/// to the start of the period.
fn year_signature(raw: &Value) -> Option<(i32, String)> {
    match raw {
        Value::Number(n) => {
            let year = n.as_i64()?;
            if (1..=9999).contains(&year) {
                Some((year as i32, "01-01".to_string()))
            } else {
                None
            }
        }
        Value::String(s) => {
            let (year, month, day) = parse_date_parts(s)?;
            // Reject impossible dates the prefix pattern lets through.
            NaiveDate::from_ymd_opt(year, month, day)?;
            Some((year, format!("{month:02}-{day:02}")))
        }
        _ => None,
    }
}
