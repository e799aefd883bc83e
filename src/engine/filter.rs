// src/engine/filter.rs
//! Filter evaluation.
//!
//! A row is retained iff every clause matches (logical AND). Both the
//! row's cell and the clause's values are coerced to the field's declared
//! type before comparing, so `"$1,000"` in a number column matches a
//! filter value of `1000`.

use serde_json::Value;

use super::QueryContext;
use crate::error::{EngineResult, ValidationError};
use crate::model::{FieldType, Row};
use crate::query::{FilterClause, FilterOp};
use crate::value::{coerce, compare, text_of, Scalar};

/// Apply every clause to every row, returning the survivors.
pub fn filter_rows<'r>(
    rows: &'r [Row],
    filters: &[FilterClause],
    ctx: &QueryContext,
) -> EngineResult<Vec<&'r Row>> {
    if filters.is_empty() {
        return Ok(rows.iter().collect());
    }
    let mut kept = Vec::new();
    'rows: for row in rows {
        for clause in filters {
            if !clause_matches(row, clause, ctx)? {
                continue 'rows;
            }
        }
        kept.push(row);
    }
    Ok(kept)
}

fn clause_matches(row: &Row, clause: &FilterClause, ctx: &QueryContext) -> EngineResult<bool> {
    // A clause with no field is a no-op.
    let Some(field) = clause.field.as_deref() else {
        return Ok(true);
    };
    let row_key = ctx.resolve_row_key(field);
    let ty = ctx.field_type(row_key);
    let raw = row.get(row_key).unwrap_or(&Value::Null);
    let actual = coerce_checked(raw, ty, row_key, ctx)?;

    match &clause.op {
        FilterOp::In => {
            for v in clause.value_list() {
                if coerce_checked(v, ty, field, ctx)? == actual {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        FilterOp::Eq => Ok(first_value(clause, ty, field, ctx)? == actual),
        FilterOp::Neq => Ok(first_value(clause, ty, field, ctx)? != actual),
        FilterOp::Contains => {
            let needle = first_value(clause, ty, field, ctx)?;
            Ok(actual.display().contains(&needle.display()))
        }
        FilterOp::Between => {
            let list = clause.value_list();
            let low = coerce_opt(list.first(), ty, field, ctx)?;
            let high = coerce_opt(list.get(1), ty, field, ctx)?;
            if low.is_null() || high.is_null() {
                return Ok(false);
            }
            let above = matches!(compare(&actual, &low), Some(o) if o.is_ge());
            let below = matches!(compare(&actual, &high), Some(o) if o.is_le());
            Ok(above && below)
        }
        FilterOp::Gt => ordered(clause, ty, field, ctx, &actual, |o| o.is_gt()),
        FilterOp::Gte => ordered(clause, ty, field, ctx, &actual, |o| o.is_ge()),
        FilterOp::Lt => ordered(clause, ty, field, ctx, &actual, |o| o.is_lt()),
        FilterOp::Lte => ordered(clause, ty, field, ctx, &actual, |o| o.is_le()),
        FilterOp::Unknown(op) => {
            if ctx.strict() {
                return Err(ValidationError::UnknownOperator {
                    field: field.to_string(),
                    op: op.clone(),
                }
                .into());
            }
            Ok(ctx.options.fail_open_operators)
        }
    }
}

fn ordered(
    clause: &FilterClause,
    ty: FieldType,
    field: &str,
    ctx: &QueryContext,
    actual: &Scalar,
    test: impl Fn(std::cmp::Ordering) -> bool,
) -> EngineResult<bool> {
    let bound = first_value(clause, ty, field, ctx)?;
    Ok(matches!(compare(actual, &bound), Some(o) if test(o)))
}

fn first_value(
    clause: &FilterClause,
    ty: FieldType,
    field: &str,
    ctx: &QueryContext,
) -> EngineResult<Scalar> {
    coerce_opt(clause.value_list().first(), ty, field, ctx)
}

fn coerce_opt(
    raw: Option<&Value>,
    ty: FieldType,
    field: &str,
    ctx: &QueryContext,
) -> EngineResult<Scalar> {
    match raw {
        Some(v) => coerce_checked(v, ty, field, ctx),
        None => Ok(Scalar::Null),
    }
}

/// Coerce, surfacing a validation error in strict mode when a non-null
/// value fails. Null and missing cells stay "absent" in every mode.
fn coerce_checked(
    raw: &Value,
    ty: FieldType,
    field: &str,
    ctx: &QueryContext,
) -> EngineResult<Scalar> {
    let coerced = coerce(raw, ty);
    if ctx.strict() && coerced.is_null() && !raw.is_null() {
        return Err(ValidationError::Uncoercible {
            field: field.to_string(),
            value: text_of(raw),
            expected: ty.name(),
        }
        .into());
    }
    Ok(coerced)
}
