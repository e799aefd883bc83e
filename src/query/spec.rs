// src/query/spec.rs
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Aggregation operators for measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AggregateOp {
    #[default]
    Sum,
    Avg,
    Min,
    Max,
    Count,
}

/// Filter operators.
///
/// Operators arrive over the wire as uppercase strings. Unrecognized
/// spellings are preserved in [`FilterOp::Unknown`] rather than rejected
/// at parse time — whether such a clause passes or fails rows is decided
/// at evaluation time by the engine's fail-open policy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterOp {
    #[default]
    In,
    Eq,
    Neq,
    Contains,
    Between,
    Gt,
    Gte,
    Lt,
    Lte,
    Unknown(String),
}

impl FilterOp {
    pub fn parse(raw: &str) -> FilterOp {
        match raw {
            "IN" => FilterOp::In,
            "EQ" => FilterOp::Eq,
            "NEQ" => FilterOp::Neq,
            "CONTAINS" => FilterOp::Contains,
            "BETWEEN" => FilterOp::Between,
            "GT" => FilterOp::Gt,
            "GTE" => FilterOp::Gte,
            "LT" => FilterOp::Lt,
            "LTE" => FilterOp::Lte,
            other => FilterOp::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilterOp::In => "IN",
            FilterOp::Eq => "EQ",
            FilterOp::Neq => "NEQ",
            FilterOp::Contains => "CONTAINS",
            FilterOp::Between => "BETWEEN",
            FilterOp::Gt => "GT",
            FilterOp::Gte => "GTE",
            FilterOp::Lt => "LT",
            FilterOp::Lte => "LTE",
            FilterOp::Unknown(s) => s,
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FilterOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FilterOp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(FilterOp::parse(&raw))
    }
}

/// One filter clause. Clauses combine with logical AND; there is no OR.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterClause {
    /// Dimension id or raw field name. A clause with no field is a no-op.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    pub op: FilterOp,

    /// Value list for IN/BETWEEN; single-operator clauses read the first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,

    /// Single-value shorthand, used when `values` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FilterClause {
    pub fn new(field: impl Into<String>, op: FilterOp, values: Vec<Value>) -> Self {
        FilterClause {
            field: Some(field.into()),
            op,
            values: Some(values),
            value: None,
        }
    }

    /// The effective value list: `values`, or `value` as a one-element
    /// list when `values` is absent.
    pub fn value_list(&self) -> &[Value] {
        match (&self.values, &self.value) {
            (Some(vs), _) => vs,
            (None, Some(v)) => std::slice::from_ref(v),
            (None, None) => &[],
        }
    }
}

/// The declarative description of what to fetch.
///
/// `measures` and `dimensions` are id lists resolved against the semantic
/// layer, falling back to raw field names. With neither, aggregation
/// collapses to a pass-through of the filtered rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuerySpec {
    pub measures: Vec<String>,
    pub dimensions: Vec<String>,
    pub filters: Vec<FilterClause>,

    /// Rows to skip after aggregation. Defaults to 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,

    /// Maximum rows to return; absent means "to the end".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}
