// src/transform/rolling.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SortDir;
use crate::model::Row;
use crate::value::{number_value, parse_number};

/// Options for the rolling-average transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RollingOptions {
    pub field: Option<String>,
    pub window: usize,
    /// Sort field; defaults to `field`.
    pub sort_by: Option<String>,
    pub order: SortDir,
    /// Output field; defaults to `<field>_rolling_<window>`.
    pub result_field: Option<String>,
}

impl Default for RollingOptions {
    fn default() -> Self {
        RollingOptions {
            field: None,
            window: 3,
            sort_by: None,
            order: SortDir::Asc,
            result_field: None,
        }
    }
}

/// Trailing-window mean: for the row at index `i`, the mean of `field`
/// over the up-to-`window` rows ending at `i` (clipped at the start).
/// Only values that parse as finite numbers participate; a window with
/// none yields null.
pub(crate) fn apply(rows: &[Row], opts: &RollingOptions) -> Vec<Row> {
    let Some(field) = opts.field.as_deref() else {
        return rows.to_vec();
    };
    let window = opts.window.max(1);
    let sort_key = opts.sort_by.as_deref().unwrap_or(field);
    let result_field = opts
        .result_field
        .clone()
        .unwrap_or_else(|| format!("{field}_rolling_{window}"));

    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| super::cmp_cells(a.get(sort_key), b.get(sort_key), opts.order));

    let parsed: Vec<Option<f64>> = sorted
        .iter()
        .map(|row| row.get(field).and_then(parse_number))
        .collect();

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, mut row)| {
            let start = (i + 1).saturating_sub(window);
            let mut sum = 0.0;
            let mut count = 0u32;
            for v in parsed[start..=i].iter().flatten() {
                sum += v;
                count += 1;
            }
            let mean = if count == 0 {
                Value::Null
            } else {
                number_value(sum / f64::from(count))
            };
            row.insert(result_field.clone(), mean);
            row
        })
        .collect()
}
