//! Dataset binding and the semantic layer.
//!
//! A [`Dataset`] is the raw material a query runs against: rows plus the
//! column descriptors that tell coercion what each field holds. The
//! semantic layer on top of it — [`Dimension`] aliases and named
//! [`Metric`] aggregations — lets query specs reference stable ids that
//! survive dataset re-imports.

mod column;
mod dataset;
mod dimension;
mod metric;
mod semantics;

pub use column::{Column, FieldType};
pub use dataset::{Dataset, Row};
pub use dimension::Dimension;
pub use metric::{Metric, MetricQuery};
pub use semantics::SemanticModel;
