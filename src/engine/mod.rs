//! The query engine core: filter evaluation and streaming aggregation.
//!
//! Both stages are pure functions over borrowed rows. They share a
//! [`QueryContext`] that bundles the dataset (for column types), the
//! semantic layer (for dimension aliases), and the engine options.

mod aggregate;
mod filter;

pub use aggregate::{aggregate_rows, MeasureSpec};
pub use filter::filter_rows;

use crate::config::EngineOptions;
use crate::model::{Dataset, FieldType, SemanticModel};

/// Everything clause evaluation and aggregation need to resolve fields.
#[derive(Debug, Clone, Copy)]
pub struct QueryContext<'a> {
    pub dataset: &'a Dataset,
    pub semantics: &'a SemanticModel,
    pub options: &'a EngineOptions,
}

impl<'a> QueryContext<'a> {
    pub fn new(
        dataset: &'a Dataset,
        semantics: &'a SemanticModel,
        options: &'a EngineOptions,
    ) -> Self {
        QueryContext {
            dataset,
            semantics,
            options,
        }
    }

    /// Row key behind a query-facing field id (dimension alias or raw
    /// field name).
    pub fn resolve_row_key<'b>(&self, field: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.semantics.resolve_field(field)
    }

    /// Declared type of a row key, defaulting to string.
    pub fn field_type(&self, row_key: &str) -> FieldType {
        self.dataset.field_type(row_key)
    }

    pub(crate) fn strict(&self) -> bool {
        self.options.is_strict()
    }
}
