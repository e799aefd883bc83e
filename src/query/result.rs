// src/query/result.rs
use serde::{Deserialize, Serialize};

use crate::model::Row;

/// Row counts observed at each pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMeta {
    /// Rows actually returned, after pagination.
    pub row_count: usize,
    /// Aggregated rows before pagination.
    pub total_rows: usize,
    /// Rows surviving the filter stage, before aggregation.
    pub filtered_rows: usize,
}

/// The result of one query execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub rows: Vec<Row>,
    pub meta: QueryMeta,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
