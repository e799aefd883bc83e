//! Crate-wide error types.
//!
//! The engine is lenient by default and almost never errors: dirty cells
//! coerce to null, unknown operators follow the fail-open policy, and
//! malformed transforms pass rows through untouched. Every variant here is
//! only surfaced when [`ExecutionMode::Strict`](crate::config::ExecutionMode)
//! is selected.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while executing a query.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A query spec, filter clause, or transform failed strict validation.
    #[error("invalid query: {0}")]
    Validation(#[from] ValidationError),

    /// A query spec or group key could not be serialized to JSON.
    #[error("failed to serialize query state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A strict-mode validation failure, naming the offending input.
///
/// In lenient mode each of these conditions degrades silently instead
/// (null values, fail-open filters, passthrough transforms).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A filter clause used an operator outside the supported set.
    #[error("unknown filter operator `{op}` on field `{field}`")]
    UnknownOperator { field: String, op: String },

    /// A measure id resolved to neither a metric nor a dataset column.
    #[error("unknown measure `{0}`")]
    UnknownMeasure(String),

    /// A dimension id resolved to neither a semantic dimension nor a column.
    #[error("unknown dimension `{0}`")]
    UnknownDimension(String),

    /// A non-null value failed coercion to the field's declared type.
    #[error("value `{value}` is not a valid {expected} for field `{field}`")]
    Uncoercible {
        field: String,
        value: String,
        expected: &'static str,
    },

    /// A transform carried an unrecognized `type` tag.
    #[error("unknown transform type `{0}`")]
    UnknownTransform(String),

    /// A transform was missing an option it cannot run without.
    #[error("transform `{kind}` is missing required option `{option}`")]
    MissingTransformOption {
        kind: &'static str,
        option: &'static str,
    },
}
