// src/model/metric.rs
use serde::{Deserialize, Serialize};

use crate::query::AggregateOp;

/// A semantic-layer metric: a named aggregation over a source field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub id: String,
    pub query: MetricQuery,
}

/// The aggregation a metric stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricQuery {
    pub field: String,
    #[serde(default)]
    pub op: AggregateOp,
}

impl Metric {
    pub fn new(id: impl Into<String>, field: impl Into<String>, op: AggregateOp) -> Self {
        Metric {
            id: id.into(),
            query: MetricQuery {
                field: field.into(),
                op,
            },
        }
    }
}
