// src/model/dataset.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Column, FieldType};

/// One table row: field id → raw cell value.
///
/// Rows are treated as immutable snapshots — every engine stage returns
/// new rows rather than mutating the ones it was given.
pub type Row = serde_json::Map<String, Value>;

/// An in-memory table: rows plus the column descriptors that drive
/// coercion. This is the shape dataset import produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Dataset { columns, rows }
    }

    /// Declared/inferred type of a field, defaulting to string for
    /// unknown fields.
    pub fn field_type(&self, field: &str) -> FieldType {
        self.columns
            .iter()
            .find(|c| c.id == field)
            .map(Column::field_type)
            .unwrap_or_default()
    }

    pub fn has_column(&self, field: &str) -> bool {
        self.columns.iter().any(|c| c.id == field)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
