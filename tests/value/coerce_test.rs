use chrono::{NaiveDate, Timelike};
use quarry::model::FieldType;
use quarry::value::{coerce, compare, parse_date, parse_number, Scalar};
use serde_json::json;

#[test]
fn normalizer_handles_human_notation() {
    assert_eq!(parse_number(&json!("(1,234.50)")), Some(-1234.5));
    assert_eq!(parse_number(&json!("12%")), Some(0.12));
    assert_eq!(parse_number(&json!("$1,000")), Some(1000.0));
    assert_eq!(parse_number(&json!("-5")), Some(-5.0));
    assert_eq!(parse_number(&json!("+3.25")), Some(3.25));
    assert_eq!(parse_number(&json!("¥1,500")), Some(1500.0));
    assert_eq!(parse_number(&json!("abc")), None);
    assert_eq!(parse_number(&json!("")), None);
    assert_eq!(parse_number(&json!("  ")), None);
}

#[test]
fn normalizer_accepts_plain_json_numbers() {
    assert_eq!(parse_number(&json!(42)), Some(42.0));
    assert_eq!(parse_number(&json!(-1.5)), Some(-1.5));
    assert_eq!(parse_number(&json!(null)), None);
    assert_eq!(parse_number(&json!(true)), None);
}

#[test]
fn normalizer_rejects_partial_matches() {
    assert_eq!(parse_number(&json!("12px")), None);
    assert_eq!(parse_number(&json!("1.2.3")), None);
    assert_eq!(parse_number(&json!("1e5")), None);
}

#[test]
fn number_coercion_wraps_normalizer() {
    assert_eq!(
        coerce(&json!("$1,000"), FieldType::Number),
        Scalar::Number(1000.0)
    );
    assert_eq!(coerce(&json!("abc"), FieldType::Number), Scalar::Null);
}

#[test]
fn bool_coercion_recognizes_yes_no_forms() {
    for truthy in ["true", "yes", "y", " TRUE ", "Yes"] {
        assert_eq!(
            coerce(&json!(truthy), FieldType::Bool),
            Scalar::Bool(true),
            "{truthy:?} should coerce to true"
        );
    }
    for falsy in ["false", "no", "n", "FALSE"] {
        assert_eq!(coerce(&json!(falsy), FieldType::Bool), Scalar::Bool(false));
    }
    assert_eq!(coerce(&json!("maybe"), FieldType::Bool), Scalar::Null);
    assert_eq!(coerce(&json!(""), FieldType::Bool), Scalar::Null);
    assert_eq!(coerce(&json!(true), FieldType::Bool), Scalar::Bool(true));
}

#[test]
fn date_coercion_parses_iso_prefixes() {
    let expected = NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(
        coerce(&json!("2024-03-15"), FieldType::Date),
        Scalar::Date(expected)
    );
    assert_eq!(coerce(&json!("definitely not a date"), FieldType::Date), Scalar::Null);
    assert_eq!(coerce(&json!(""), FieldType::Date), Scalar::Null);
    assert_eq!(coerce(&json!(null), FieldType::Date), Scalar::Null);
}

#[test]
fn date_parser_keeps_time_components() {
    let dt = parse_date("2024-03-15T10:30:00").unwrap();
    assert_eq!(dt.hour(), 10);
    assert_eq!(dt.minute(), 30);

    let from_rfc3339 = parse_date("2024-03-15T10:30:00Z").unwrap();
    assert_eq!(from_rfc3339, dt);
}

#[test]
fn date_parser_defaults_missing_components() {
    assert_eq!(
        parse_date("2024"),
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0)
    );
    assert_eq!(
        parse_date("2024-06"),
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(0, 0, 0)
    );
    assert_eq!(parse_date("2024-13-01"), None);
}

#[test]
fn string_coercion_trims_and_empties_null() {
    assert_eq!(
        coerce(&json!("  hello  "), FieldType::String),
        Scalar::Text("hello".into())
    );
    assert_eq!(coerce(&json!(null), FieldType::String), Scalar::Text(String::new()));
    assert_eq!(
        coerce(&json!(1000), FieldType::String),
        Scalar::Text("1000".into())
    );
}

#[test]
fn compare_orders_dates_by_timestamp() {
    let earlier = coerce(&json!("2023-01-15"), FieldType::Date);
    let later = coerce(&json!("2024-01-15"), FieldType::Date);
    assert_eq!(compare(&earlier, &later), Some(std::cmp::Ordering::Less));
    assert_eq!(compare(&earlier, &earlier), Some(std::cmp::Ordering::Equal));
}

#[test]
fn compare_fails_on_null_and_mixed_kinds() {
    assert_eq!(compare(&Scalar::Null, &Scalar::Number(1.0)), None);
    assert_eq!(compare(&Scalar::Number(1.0), &Scalar::Text("1".into())), None);
}
