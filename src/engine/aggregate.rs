// src/engine/aggregate.rs
//! Grouping and aggregation.
//!
//! Accumulation is single-pass: one accumulator per (group, measure),
//! updated as rows stream by, finalized at the end. No intermediate
//! per-group row lists are materialized, so memory stays proportional to
//! the number of groups rather than the number of rows.

use std::collections::HashMap;

use serde_json::Value;

use super::QueryContext;
use crate::error::{EngineResult, ValidationError};
use crate::model::{Row, SemanticModel};
use crate::query::AggregateOp;
use crate::value::{number_value, parse_number, text_of};

/// A measure resolved to its source field and operator.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureSpec {
    pub id: String,
    pub field: String,
    pub op: AggregateOp,
}

impl MeasureSpec {
    /// Resolve a query measure id through the semantic layer. Ids without
    /// a metric definition fall back to the id as a raw field name with
    /// an implicit SUM.
    pub fn resolve(id: &str, semantics: &SemanticModel) -> Self {
        match semantics.metric(id) {
            Some(metric) => MeasureSpec {
                id: id.to_string(),
                field: metric.query.field.clone(),
                op: metric.query.op,
            },
            None => MeasureSpec {
                id: id.to_string(),
                field: id.to_string(),
                op: AggregateOp::Sum,
            },
        }
    }
}

/// Streaming accumulator state for one (group, measure) pair.
#[derive(Debug, Default)]
struct Accumulator {
    rows: u64,
    numeric: u64,
    sum: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.numeric += 1;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    fn finish(&self, op: AggregateOp) -> Value {
        match op {
            AggregateOp::Count => Value::from(self.rows),
            AggregateOp::Avg => {
                if self.numeric == 0 {
                    Value::Null
                } else {
                    number_value(self.sum / self.numeric as f64)
                }
            }
            AggregateOp::Min => self.min.map(number_value).unwrap_or(Value::Null),
            AggregateOp::Max => self.max.map(number_value).unwrap_or(Value::Null),
            AggregateOp::Sum => number_value(self.sum),
        }
    }
}

/// Group filtered rows by dimension values and fold measures over each
/// group.
///
/// Cases by shape: no dimensions and no measures is the identity; measures
/// alone produce a single aggregate row; dimensions alone are a per-row
/// projection; both group by the dimension tuple, output in first-seen
/// group order.
pub fn aggregate_rows(
    rows: &[&Row],
    measures: &[MeasureSpec],
    dimensions: &[String],
    ctx: &QueryContext,
) -> EngineResult<Vec<Row>> {
    if dimensions.is_empty() && measures.is_empty() {
        return Ok(rows.iter().map(|r| (*r).clone()).collect());
    }

    if dimensions.is_empty() {
        let mut accs: Vec<Accumulator> = measures.iter().map(|_| Accumulator::default()).collect();
        for row in rows {
            accumulate_row(&mut accs, measures, row, ctx)?;
        }
        let mut out = Row::new();
        for (measure, acc) in measures.iter().zip(&accs) {
            out.insert(measure.id.clone(), acc.finish(measure.op));
        }
        return Ok(vec![out]);
    }

    // Resolve each dimension id to its row key once, up front.
    let dims: Vec<(&str, &str)> = dimensions
        .iter()
        .map(|d| (d.as_str(), ctx.resolve_row_key(d)))
        .collect();

    if measures.is_empty() {
        // Distinct projection: one output row per input row, keyed by
        // dimension id. No de-duplication.
        return Ok(rows
            .iter()
            .map(|row| {
                let mut out = Row::new();
                for (id, key) in &dims {
                    out.insert((*id).to_string(), row.get(*key).cloned().unwrap_or(Value::Null));
                }
                out
            })
            .collect());
    }

    // Group key = serialized tuple of raw dimension values, in dimension
    // order. Output preserves first-seen group order.
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(Vec<Value>, Vec<Accumulator>)> = Vec::new();
    for row in rows {
        let key_values: Vec<Value> = dims
            .iter()
            .map(|(_, key)| row.get(*key).cloned().unwrap_or(Value::Null))
            .collect();
        let key = serde_json::to_string(&key_values)?;
        let slot = match index.get(&key) {
            Some(&i) => i,
            None => {
                groups.push((
                    key_values,
                    measures.iter().map(|_| Accumulator::default()).collect(),
                ));
                index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };
        accumulate_row(&mut groups[slot].1, measures, row, ctx)?;
    }

    Ok(groups
        .into_iter()
        .map(|(values, accs)| {
            let mut out = Row::new();
            for ((id, _), value) in dims.iter().zip(values) {
                out.insert((*id).to_string(), value);
            }
            for (measure, acc) in measures.iter().zip(&accs) {
                out.insert(measure.id.clone(), acc.finish(measure.op));
            }
            out
        })
        .collect())
}

fn accumulate_row(
    accs: &mut [Accumulator],
    measures: &[MeasureSpec],
    row: &Row,
    ctx: &QueryContext,
) -> EngineResult<()> {
    for (measure, acc) in measures.iter().zip(accs.iter_mut()) {
        acc.rows += 1;
        let cell = row.get(&measure.field);
        match cell.and_then(parse_number) {
            Some(value) => acc.push(value),
            None => {
                // COUNT doesn't need a numeric value; for everything else
                // an unparseable row is skipped — or surfaced in strict
                // mode when the raw value wasn't null to begin with.
                if ctx.strict() && measure.op != AggregateOp::Count {
                    if let Some(raw) = cell {
                        if !raw.is_null() {
                            return Err(ValidationError::Uncoercible {
                                field: measure.field.clone(),
                                value: text_of(raw),
                                expected: "number",
                            }
                            .into());
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
