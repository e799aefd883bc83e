// src/transform/pivot.rs
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::cell_label;
use crate::model::Row;

/// Options for the pivot (wide-reshape) transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PivotOptions {
    /// Field whose distinct values become output rows.
    pub index: Option<String>,
    /// Field whose distinct values become output columns.
    pub column: Option<String>,
    /// Field supplying the cell values.
    pub value: Option<String>,
    /// Fill for absent (index, column) combinations.
    pub fill: Value,
    /// Sort column labels alphabetically; otherwise first-seen order.
    pub sort_columns: bool,
}

impl Default for PivotOptions {
    fn default() -> Self {
        PivotOptions {
            index: None,
            column: None,
            value: None,
            fill: Value::from(0),
            sort_columns: true,
        }
    }
}

/// Wide-reshape: one output row per distinct index value, one field per
/// distinct column value. Cells are not aggregated — a later duplicate
/// overwrites an earlier one for the same (index, column) pair.
pub(crate) fn apply(rows: &[Row], opts: &PivotOptions) -> Vec<Row> {
    let (Some(index), Some(column), Some(value)) = (
        opts.index.as_deref(),
        opts.column.as_deref(),
        opts.value.as_deref(),
    ) else {
        return rows.to_vec();
    };

    // Distinct column labels, first-seen order.
    let mut labels: Vec<String> = Vec::new();
    let mut seen = HashSet::new();
    for row in rows {
        let label = cell_label(row.get(column).unwrap_or(&Value::Null));
        if seen.insert(label.clone()) {
            labels.push(label);
        }
    }
    if opts.sort_columns {
        labels.sort();
    }

    // Group rows by index value, last write wins per cell.
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, (Value, HashMap<String, Value>)> = HashMap::new();
    for row in rows {
        let index_raw = row.get(index).cloned().unwrap_or(Value::Null);
        let key = cell_label(&index_raw);
        if !groups.contains_key(&key) {
            order.push(key.clone());
            groups.insert(key.clone(), (index_raw, HashMap::new()));
        }
        if let Some((_, cells)) = groups.get_mut(&key) {
            cells.insert(
                cell_label(row.get(column).unwrap_or(&Value::Null)),
                row.get(value).cloned().unwrap_or(Value::Null),
            );
        }
    }

    order
        .into_iter()
        .filter_map(|key| groups.remove(&key))
        .map(|(index_raw, cells)| {
            let mut out = Row::new();
            out.insert(index.to_string(), index_raw);
            for label in &labels {
                out.insert(
                    label.clone(),
                    cells.get(label).cloned().unwrap_or_else(|| opts.fill.clone()),
                );
            }
            out
        })
        .collect()
}
