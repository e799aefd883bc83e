// src/model/semantics.rs
use serde::{Deserialize, Serialize};

use super::{Dimension, Metric};

/// The optional mapping of friendly metric/dimension ids onto raw dataset
/// columns, authored in the composer. An empty model makes every lookup
/// fall back to raw field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticModel {
    pub dimensions: Vec<Dimension>,
    pub metrics: Vec<Metric>,
}

impl SemanticModel {
    pub fn new(dimensions: Vec<Dimension>, metrics: Vec<Metric>) -> Self {
        SemanticModel {
            dimensions,
            metrics,
        }
    }

    pub fn dimension(&self, id: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.id == id)
    }

    pub fn metric(&self, id: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.id == id)
    }

    /// Resolve a query-facing field id to the row key it reads from:
    /// the dimension's source field when the id names a dimension,
    /// otherwise the id itself.
    pub fn resolve_field<'a>(&'a self, field: &'a str) -> &'a str {
        self.dimension(field)
            .map(Dimension::source_key)
            .unwrap_or(field)
    }
}
