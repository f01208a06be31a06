//! Tests for whole-schema validation through the process-wide registry.

use chrono::Utc;
use hashcheck::{validate, FieldPath, Schema, Value};
use serde_json::json;

fn check(data: serde_json::Value, schema: serde_json::Value) -> hashcheck::ValidationReport {
    let schema = Schema::from_json(&schema).unwrap();
    validate(&Value::from(data), &schema).unwrap()
}

fn simple_hash() -> serde_json::Value {
    json!({ "foo": 1, "bar": "baz" })
}

fn invalid_simple_hash() -> serde_json::Value {
    json!({ "foo": 1, "bar": 2 })
}

fn complex_hash() -> serde_json::Value {
    json!({
        "foo": 1,
        "bar": "baz",
        "user": {
            "first_name": "James",
            "last_name": "Brooks",
            "age": 27,
            "likes": ["Ruby", "Kendo", "Board Games"]
        }
    })
}

fn invalid_complex_hash() -> serde_json::Value {
    json!({
        "foo": 1,
        "bar": 2,
        "user": {
            "first_name": "James",
            "last_name": "Brooks",
            "likes": "Ruby, Kendo, Board Games"
        }
    })
}

#[test]
fn test_hash_rule() {
    assert!(check(json!({ "v": {} }), json!({ "v": {} })).is_valid());

    let report = check(json!({ "v": "" }), json!({ "v": {} }));
    assert!(!report.is_valid());
    assert_eq!(report.errors().to_json(), json!({ "v": "hash required" }));
}

#[test]
fn test_required_rule() {
    assert!(check(json!({ "v": "test" }), json!({ "v": "required" })).is_valid());
    assert!(check(json!({ "v": 1234 }), json!({ "v": "required" })).is_valid());

    for data in [json!({ "v": null }), json!({ "x": "test" }), json!({ "x": 1234 })] {
        let report = check(data, json!({ "v": "required" }));
        assert!(!report.is_valid());
        assert_eq!(report.errors().to_json(), json!({ "v": "is required" }));
    }
}

#[test]
fn test_string_rule() {
    assert!(check(json!({ "v": "test" }), json!({ "v": "string" })).is_valid());

    let report = check(json!({ "v": 123456 }), json!({ "v": "string" }));
    assert_eq!(report.errors().to_json(), json!({ "v": "string required" }));
}

#[test]
fn test_numeric_rule() {
    assert!(check(json!({ "v": 1234 }), json!({ "v": "numeric" })).is_valid());
    assert!(check(json!({ "v": 12.75 }), json!({ "v": "numeric" })).is_valid());
    assert!(!check(json!({ "v": "12" }), json!({ "v": "numeric" })).is_valid());
}

#[test]
fn test_array_rule() {
    assert!(check(json!({ "v": [1, 2, 3] }), json!({ "v": "array" })).is_valid());
    assert!(!check(json!({ "v": " 1,2,3 " }), json!({ "v": "array" })).is_valid());
}

#[test]
fn test_time_rule() {
    let schema = Schema::new().rule("v", "time");

    let now: Value = [("v", Value::from(Utc::now()))].into_iter().collect();
    assert!(validate(&now, &schema).unwrap().is_valid());

    let text = Value::from(json!({ "v": "2013-04-12 13:18:05 +0930" }));
    let report = validate(&text, &schema).unwrap();
    assert_eq!(report.errors().to_json(), json!({ "v": "time required" }));
}

#[test]
fn test_type_rules_report_missing_fields_by_type() {
    for rule in ["string", "numeric", "array", "time", "hash"] {
        let report = check(json!({}), json!({ "k": rule }));
        assert_eq!(
            report.error_at(&FieldPath::from_field("k")),
            Some(format!("{} required", rule).as_str())
        );
    }
}

#[test]
fn test_no_validations_accepts_everything() {
    for data in [
        json!({}),
        simple_hash(),
        invalid_simple_hash(),
        complex_hash(),
        invalid_complex_hash(),
        json!("not a hash"),
        json!(null),
        json!([1, 2, 3]),
    ] {
        let report = check(data, json!({}));
        assert!(report.is_valid());
        assert!(report.errors().is_empty());
    }
}

#[test]
fn test_simple_validations() {
    let validations = json!({ "foo": "numeric", "bar": "string" });

    let report = check(json!({}), validations.clone());
    assert!(!report.is_valid());
    assert_eq!(
        report.errors().to_json(),
        json!({ "foo": "numeric required", "bar": "string required" })
    );

    assert!(check(simple_hash(), validations.clone()).is_valid());
    assert!(check(complex_hash(), validations.clone()).is_valid());

    let report = check(invalid_simple_hash(), validations.clone());
    assert_eq!(report.errors().to_json(), json!({ "bar": "string required" }));

    let report = check(invalid_complex_hash(), validations);
    assert_eq!(report.errors().to_json(), json!({ "bar": "string required" }));
}

#[test]
fn test_nested_validations() {
    let validations = json!({
        "foo": "numeric",
        "bar": "string",
        "user": { "first_name": "string", "age": "required", "likes": "array" }
    });

    let report = check(complex_hash(), validations.clone());
    assert!(report.is_valid());
    assert!(report.errors().is_empty());

    let report = check(invalid_complex_hash(), validations);
    assert!(!report.is_valid());
    assert_eq!(
        report.errors().to_json(),
        json!({
            "bar": "string required",
            "user": { "age": "is required", "likes": "array required" }
        })
    );
}

#[test]
fn test_unknown_data_fields_never_reported() {
    let report = check(
        json!({ "extra": 1, "user": { "extra": null, "name": 3 } }),
        json!({ "user": { "name": "string" }, "other": "string" }),
    );

    assert!(report.errors().get("extra").is_none());
    assert_eq!(
        report.errors().to_json(),
        json!({ "user": { "name": "string required" }, "other": "string required" })
    );
}

#[test]
fn test_error_order_follows_schema() {
    let schema = Schema::new()
        .rule("zeta", "string")
        .rule("alpha", "numeric")
        .rule("mid", "required");
    let report = validate(&Value::from(json!({})), &schema).unwrap();

    let fields: Vec<_> = report.errors().iter().map(|(field, _)| field).collect();
    assert_eq!(fields, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_valid_deep_structure_has_no_empty_branches() {
    let report = check(
        json!({ "a": { "b": { "c": { "d": "x" } } }, "e": { "f": 1 } }),
        json!({ "a": { "b": { "c": { "d": "string" } } }, "e": { "f": "numeric" } }),
    );
    assert!(report.is_valid());
    assert_eq!(report.errors().to_json(), json!({}));
}

#[test]
fn test_validation_is_idempotent() {
    let schema = Schema::from_json(&json!({ "bar": "string", "user": { "age": "required" } }))
        .unwrap();
    let data = Value::from(invalid_complex_hash());

    let first = validate(&data, &schema).unwrap();
    let second = validate(&data, &schema).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_flatten_report() {
    let report = check(
        invalid_complex_hash(),
        json!({ "bar": "string", "user": { "age": "required" } }),
    );
    let flat: Vec<_> = report
        .errors()
        .flatten()
        .into_iter()
        .map(|(path, message)| format!("{}: {}", path, message))
        .collect();

    assert_eq!(flat, vec!["bar: string required", "user.age: is required"]);
}

#[test]
fn test_deeply_nested_schema() {
    const DEPTH: usize = 5_000;
    let mut schema = Schema::new().rule("name", "string").rule("age", "required");
    let mut data: Value = [("name", Value::from(7))].into_iter().collect();
    for _ in 0..DEPTH {
        schema = Schema::new().nested("child", schema);
        data = [("child", data)].into_iter().collect();
    }

    let report = validate(&data, &schema).unwrap();
    assert!(!report.is_valid());

    let base: Vec<&str> = std::iter::repeat("child").take(DEPTH).collect();
    let name: FieldPath = base.iter().copied().chain(["name"]).collect();
    let age: FieldPath = base.iter().copied().chain(["age"]).collect();
    assert_eq!(report.error_at(&name), Some("string required"));
    assert_eq!(report.error_at(&age), Some("is required"));
}
