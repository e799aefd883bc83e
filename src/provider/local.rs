// src/provider/local.rs
//! The local in-memory provider: the query executor behind editor
//! previews and exported bundles alike.

use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::Value;

use super::{DataProvider, ProviderResult};
use crate::config::EngineOptions;
use crate::engine::{aggregate_rows, filter_rows, MeasureSpec, QueryContext};
use crate::error::ValidationError;
use crate::model::{Dataset, Row, SemanticModel};
use crate::query::{QueryMeta, QuerySpec, ResultSet};

/// Executes query specs against one immutable in-memory dataset.
///
/// Pipeline: filter → aggregate → paginate. Pagination applies strictly
/// after aggregation so `totalRows` reports grouped counts, never raw
/// ones.
#[derive(Debug, Clone, Default)]
pub struct LocalProvider {
    dataset: Dataset,
    semantics: SemanticModel,
    options: EngineOptions,
}

impl LocalProvider {
    pub fn new(dataset: Dataset) -> Self {
        LocalProvider {
            dataset,
            ..LocalProvider::default()
        }
    }

    /// Attach a semantic layer for metric/dimension id resolution.
    pub fn with_semantics(mut self, semantics: SemanticModel) -> Self {
        self.semantics = semantics;
        self
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Distinct raw values of a field (dimension alias or raw name), in
    /// first-seen order. What a filter editor offers as its value list.
    pub fn distinct_values(&self, field: &str) -> Vec<Value> {
        let key = self.semantics.resolve_field(field);
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for row in &self.dataset.rows {
            let value = row.get(key).cloned().unwrap_or(Value::Null);
            if seen.insert(value.to_string()) {
                out.push(value);
            }
        }
        out
    }

    fn run(&self, spec: &QuerySpec) -> ProviderResult<ResultSet> {
        let ctx = QueryContext::new(&self.dataset, &self.semantics, &self.options);
        let measures: Vec<MeasureSpec> = spec
            .measures
            .iter()
            .map(|id| MeasureSpec::resolve(id, &self.semantics))
            .collect();
        if ctx.options.is_strict() {
            self.validate(spec)?;
        }

        let filtered = filter_rows(&self.dataset.rows, &spec.filters, &ctx)?;
        let filtered_rows = filtered.len();
        let aggregated = aggregate_rows(&filtered, &measures, &spec.dimensions, &ctx)?;
        let total_rows = aggregated.len();
        let rows = paginate(aggregated, spec.offset, spec.limit);

        tracing::debug!(
            total = self.dataset.rows.len(),
            filtered = filtered_rows,
            aggregated = total_rows,
            returned = rows.len(),
            "executed local query"
        );

        Ok(ResultSet {
            meta: QueryMeta {
                row_count: rows.len(),
                total_rows,
                filtered_rows,
            },
            rows,
        })
    }

    /// Strict-mode spec validation: every measure and dimension id must
    /// resolve through the semantic layer or name a real column.
    fn validate(&self, spec: &QuerySpec) -> ProviderResult<()> {
        for id in &spec.measures {
            if self.semantics.metric(id).is_none() && !self.dataset.has_column(id) {
                return Err(ValidationError::UnknownMeasure(id.clone()).into());
            }
        }
        for id in &spec.dimensions {
            if self.semantics.dimension(id).is_none() && !self.dataset.has_column(id) {
                return Err(ValidationError::UnknownDimension(id.clone()).into());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DataProvider for LocalProvider {
    async fn execute(&self, spec: &QuerySpec) -> ProviderResult<ResultSet> {
        self.run(spec)
    }
}

fn paginate(rows: Vec<Row>, offset: Option<u64>, limit: Option<u64>) -> Vec<Row> {
    let start = offset.unwrap_or(0) as usize;
    match limit {
        Some(limit) => rows
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .collect(),
        None => rows.into_iter().skip(start).collect(),
    }
}
