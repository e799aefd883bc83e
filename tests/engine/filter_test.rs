use quarry::config::EngineOptions;
use quarry::engine::{filter_rows, QueryContext};
use quarry::error::{EngineError, ValidationError};
use quarry::model::{Column, Dataset, Dimension, FieldType, Row, SemanticModel};
use quarry::query::{FilterClause, FilterOp};
use serde_json::{json, Value};

fn rows_of(value: Value) -> Vec<Row> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => map,
                other => panic!("expected object row, got {other}"),
            })
            .collect(),
        other => panic!("expected array of rows, got {other}"),
    }
}

fn dataset() -> Dataset {
    Dataset::new(
        vec![
            Column::typed("amount", FieldType::Number),
            Column::typed("region", FieldType::String),
            Column::typed("active", FieldType::Bool),
            Column::typed("signup", FieldType::Date),
        ],
        rows_of(json!([
            { "amount": "$1,000", "region": "north", "active": "yes", "signup": "2023-01-15" },
            { "amount": 250,      "region": "south", "active": "no",  "signup": "2023-06-01" },
            { "amount": "(50)",   "region": "north", "active": "y",   "signup": "2024-02-20" },
            { "amount": "n/a",    "region": "east",  "active": "",    "signup": "" }
        ])),
    )
}

fn clause(field: &str, op: FilterOp, values: Value) -> FilterClause {
    FilterClause::new(
        field,
        op,
        match values {
            Value::Array(vs) => vs,
            single => vec![single],
        },
    )
}

#[test]
fn between_is_inclusive_and_excludes_unparseable() {
    let dataset = dataset();
    let semantics = SemanticModel::default();
    let options = EngineOptions::default();
    let ctx = QueryContext::new(&dataset, &semantics, &options);

    let filters = vec![clause("amount", FilterOp::Between, json!([250, 1000]))];
    let kept = filter_rows(&dataset.rows, &filters, &ctx).unwrap();
    // "$1,000" and 250 are in range; "(50)" is below; "n/a" never compares.
    assert_eq!(kept.len(), 2);
}

#[test]
fn between_with_missing_bound_matches_nothing() {
    let dataset = dataset();
    let semantics = SemanticModel::default();
    let options = EngineOptions::default();
    let ctx = QueryContext::new(&dataset, &semantics, &options);

    let filters = vec![clause("amount", FilterOp::Between, json!([250]))];
    assert!(filter_rows(&dataset.rows, &filters, &ctx).unwrap().is_empty());
}

#[test]
fn in_compares_coerced_values() {
    let dataset = dataset();
    let semantics = SemanticModel::default();
    let options = EngineOptions::default();
    let ctx = QueryContext::new(&dataset, &semantics, &options);

    // "$1,000" coerces to 1000, so a numeric filter value matches it.
    let filters = vec![clause("amount", FilterOp::In, json!([1000, 250]))];
    let kept = filter_rows(&dataset.rows, &filters, &ctx).unwrap();
    assert_eq!(kept.len(), 2);
}

#[test]
fn single_value_shorthand_acts_as_one_element_list() {
    let dataset = dataset();
    let semantics = SemanticModel::default();
    let options = EngineOptions::default();
    let ctx = QueryContext::new(&dataset, &semantics, &options);

    let filters = vec![FilterClause {
        field: Some("region".into()),
        op: FilterOp::In,
        values: None,
        value: Some(json!("south")),
    }];
    let kept = filter_rows(&dataset.rows, &filters, &ctx).unwrap();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].get("region"), Some(&json!("south")));
}

#[test]
fn eq_and_neq_use_first_value() {
    let dataset = dataset();
    let semantics = SemanticModel::default();
    let options = EngineOptions::default();
    let ctx = QueryContext::new(&dataset, &semantics, &options);

    let eq = vec![clause("region", FilterOp::Eq, json!(["north"]))];
    assert_eq!(filter_rows(&dataset.rows, &eq, &ctx).unwrap().len(), 2);

    let neq = vec![clause("region", FilterOp::Neq, json!(["north"]))];
    assert_eq!(filter_rows(&dataset.rows, &neq, &ctx).unwrap().len(), 2);
}

#[test]
fn contains_checks_stringified_values() {
    let dataset = dataset();
    let semantics = SemanticModel::default();
    let options = EngineOptions::default();
    let ctx = QueryContext::new(&dataset, &semantics, &options);

    let filters = vec![clause("region", FilterOp::Contains, json!(["orth"]))];
    assert_eq!(filter_rows(&dataset.rows, &filters, &ctx).unwrap().len(), 2);
}

#[test]
fn ordered_operators_use_typed_comparison() {
    let dataset = dataset();
    let semantics = SemanticModel::default();
    let options = EngineOptions::default();
    let ctx = QueryContext::new(&dataset, &semantics, &options);

    let gt = vec![clause("amount", FilterOp::Gt, json!([250]))];
    assert_eq!(filter_rows(&dataset.rows, &gt, &ctx).unwrap().len(), 1);

    let gte = vec![clause("amount", FilterOp::Gte, json!([250]))];
    assert_eq!(filter_rows(&dataset.rows, &gte, &ctx).unwrap().len(), 2);

    let lt = vec![clause("signup", FilterOp::Lt, json!(["2023-12-31"]))];
    assert_eq!(filter_rows(&dataset.rows, &lt, &ctx).unwrap().len(), 2);
}

#[test]
fn clauses_combine_with_and() {
    let dataset = dataset();
    let semantics = SemanticModel::default();
    let options = EngineOptions::default();
    let ctx = QueryContext::new(&dataset, &semantics, &options);

    let filters = vec![
        clause("region", FilterOp::Eq, json!(["north"])),
        clause("amount", FilterOp::Gt, json!([0])),
    ];
    let kept = filter_rows(&dataset.rows, &filters, &ctx).unwrap();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].get("amount"), Some(&json!("$1,000")));
}

#[test]
fn clause_without_field_is_a_noop() {
    let dataset = dataset();
    let semantics = SemanticModel::default();
    let options = EngineOptions::default();
    let ctx = QueryContext::new(&dataset, &semantics, &options);

    let filters = vec![FilterClause::default()];
    assert_eq!(filter_rows(&dataset.rows, &filters, &ctx).unwrap().len(), 4);
}

#[test]
fn dimension_alias_resolves_to_source_field() {
    let dataset = dataset();
    let semantics = SemanticModel::new(
        vec![Dimension::new("Sales Region", "region")],
        Vec::new(),
    );
    let options = EngineOptions::default();
    let ctx = QueryContext::new(&dataset, &semantics, &options);

    let filters = vec![clause("Sales Region", FilterOp::Eq, json!(["south"]))];
    assert_eq!(filter_rows(&dataset.rows, &filters, &ctx).unwrap().len(), 1);
}

#[test]
fn unknown_operator_fails_open_by_default() {
    let dataset = dataset();
    let semantics = SemanticModel::default();
    let options = EngineOptions::default();
    let ctx = QueryContext::new(&dataset, &semantics, &options);

    let filters = vec![clause("region", FilterOp::parse("MATCHES"), json!(["north"]))];
    assert_eq!(filter_rows(&dataset.rows, &filters, &ctx).unwrap().len(), 4);
}

#[test]
fn unknown_operator_can_fail_closed() {
    let dataset = dataset();
    let semantics = SemanticModel::default();
    let options = EngineOptions {
        fail_open_operators: false,
        ..EngineOptions::default()
    };
    let ctx = QueryContext::new(&dataset, &semantics, &options);

    let filters = vec![clause("region", FilterOp::parse("MATCHES"), json!(["north"]))];
    assert!(filter_rows(&dataset.rows, &filters, &ctx).unwrap().is_empty());
}

#[test]
fn strict_mode_rejects_unknown_operator() {
    let dataset = dataset();
    let semantics = SemanticModel::default();
    let options = EngineOptions::strict();
    let ctx = QueryContext::new(&dataset, &semantics, &options);

    let filters = vec![clause("region", FilterOp::parse("MATCHES"), json!(["north"]))];
    let err = filter_rows(&dataset.rows, &filters, &ctx).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::UnknownOperator { ref op, .. }) if op == "MATCHES"
    ));
}

#[test]
fn strict_mode_rejects_uncoercible_filter_value() {
    let dataset = dataset();
    let semantics = SemanticModel::default();
    let options = EngineOptions::strict();
    let ctx = QueryContext::new(&dataset, &semantics, &options);

    let filters = vec![clause("signup", FilterOp::Gt, json!(["not a date"]))];
    let err = filter_rows(&dataset.rows, &filters, &ctx).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::Uncoercible { .. })
    ));
}

#[test]
fn filtering_does_not_mutate_input_rows() {
    let dataset = dataset();
    let snapshot = dataset.rows.clone();
    let semantics = SemanticModel::default();
    let options = EngineOptions::default();
    let ctx = QueryContext::new(&dataset, &semantics, &options);

    let filters = vec![clause("amount", FilterOp::Gt, json!([0]))];
    let _ = filter_rows(&dataset.rows, &filters, &ctx).unwrap();
    assert_eq!(dataset.rows, snapshot);
}
