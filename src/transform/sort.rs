// src/transform/sort.rs
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::SortDir;
use crate::model::Row;

/// Options for the sort transform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SortOptions {
    pub field: Option<String>,
    pub order: SortDir,
}

impl SortOptions {
    pub fn by(field: impl Into<String>, order: SortDir) -> Self {
        SortOptions {
            field: Some(field.into()),
            order,
        }
    }
}

/// Stable sort by one field; nulls last regardless of direction.
pub(crate) fn apply(rows: &[Row], opts: &SortOptions) -> Vec<Row> {
    let Some(field) = opts.field.as_deref() else {
        return rows.to_vec();
    };
    let mut out = rows.to_vec();
    out.sort_by(|a, b| super::cmp_cells(a.get(field), b.get(field), opts.order));
    out
}

/// Stable sort with a caller-supplied comparator, scaled by direction.
/// The programmatic counterpart to [`SortOptions`] for orderings that
/// can't be expressed as a single field.
pub fn sort_rows_with<F>(rows: &[Row], order: SortDir, mut compare: F) -> Vec<Row>
where
    F: FnMut(&Row, &Row) -> Ordering,
{
    let mut out = rows.to_vec();
    out.sort_by(|a, b| order.apply(compare(a, b)));
    out
}
