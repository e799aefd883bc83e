//! # Quarry
//!
//! An in-memory query engine and row-transform pipeline for dashboard
//! previews.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        QuerySpec (measures, dimensions, filters)         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [provider]
//! ┌─────────────────────────────────────────────────────────┐
//! │   LocalProvider: filter → aggregate → paginate           │
//! │   (value coercion + semantic-layer resolution inside)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │            ResultSet { rows, meta }                      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [transform]  (optional)
//! ┌─────────────────────────────────────────────────────────┐
//! │     sort / pivot / rolling average / year-over-year      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is deliberately small: a single in-memory table, a fixed
//! operator set, no joins. Queries are pure functions over an immutable
//! row snapshot; every stage produces new rows. By default the engine is
//! lenient — dirty cells coerce to null, unknown operators fail open —
//! so a live editor preview always renders something. Strict mode turns
//! each silent degradation into a [`error::ValidationError`].

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod provider;
pub mod query;
pub mod transform;
pub mod value;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{EngineOptions, ExecutionMode};
    pub use crate::error::{EngineError, EngineResult, ValidationError};
    pub use crate::model::{
        Column, Dataset, Dimension, FieldType, Metric, MetricQuery, Row, SemanticModel,
    };
    pub use crate::provider::{CachingProvider, DataProvider, LocalProvider, ProviderResult};
    pub use crate::query::{
        fingerprint, AggregateOp, FilterClause, FilterOp, QueryMeta, QuerySpec, ResultSet,
    };
    pub use crate::transform::{
        apply, apply_all, sort_rows_with, PivotOptions, RollingOptions, SortDir, SortOptions,
        Transform, YoyOptions,
    };
    pub use crate::value::{coerce, compare, parse_date, parse_number, Scalar};
}
