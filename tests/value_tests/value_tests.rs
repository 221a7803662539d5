//! Tests for value auto-parsing

use notekv::value::{auto_parse, is_empty_value, Value, ValueKind};
use serde_json::json;

// =============================================================================
// Auto-Parse Tests
// =============================================================================

#[test]
fn test_parse_integers() {
    assert_eq!(auto_parse("5"), json!(5));
    assert_eq!(auto_parse("-12"), json!(-12));
    assert_eq!(auto_parse(" 2021 "), json!(2021));
}

#[test]
fn test_parse_floats() {
    assert_eq!(auto_parse("1.5"), json!(1.5));
    assert_eq!(auto_parse("1e3"), json!(1000.0));
}

#[test]
fn test_non_finite_stays_text() {
    assert_eq!(auto_parse("inf"), json!("inf"));
    assert_eq!(auto_parse("NaN"), json!("NaN"));
}

#[test]
fn test_parse_booleans_and_null() {
    assert_eq!(auto_parse("true"), json!(true));
    assert_eq!(auto_parse("false"), json!(false));
    assert_eq!(auto_parse("null"), Value::Null);
    assert_eq!(auto_parse("True"), json!("True"));
}

#[test]
fn test_parse_structured() {
    assert_eq!(auto_parse("[1, 2, 3]"), json!([1, 2, 3]));
    assert_eq!(auto_parse(r#"{"a": [true]}"#), json!({"a": [true]}));
}

#[test]
fn test_malformed_structured_stays_text() {
    assert_eq!(auto_parse("[1, 2"), json!("[1, 2"));
    assert_eq!(auto_parse("{oops}"), json!("{oops}"));
}

#[test]
fn test_text_passthrough() {
    assert_eq!(auto_parse("hello world"), json!("hello world"));
    assert_eq!(auto_parse(""), json!(""));
    assert_eq!(auto_parse("  padded "), json!("  padded "));
}

// =============================================================================
// Kind / Emptiness Tests
// =============================================================================

#[test]
fn test_value_kind() {
    assert_eq!(ValueKind::of(&json!(1)), ValueKind::Number);
    assert_eq!(ValueKind::of(&json!("x")), ValueKind::String);
    assert_eq!(ValueKind::of(&json!(false)), ValueKind::Bool);
    assert_eq!(ValueKind::of(&Value::Null), ValueKind::Null);
    assert_eq!(ValueKind::of(&json!([])), ValueKind::Array);
    assert_eq!(ValueKind::of(&json!({})), ValueKind::Object);
}

#[test]
fn test_value_kind_display() {
    assert_eq!(ValueKind::Number.to_string(), "number");
    assert_eq!(ValueKind::Object.to_string(), "object");
    assert_eq!(serde_json::to_string(&ValueKind::Bool).unwrap(), "\"bool\"");
}

#[test]
fn test_is_empty_value() {
    assert!(is_empty_value(&json!("")));
    assert!(is_empty_value(&json!([])));
    assert!(is_empty_value(&Value::Null));
    assert!(!is_empty_value(&json!("x")));
    assert!(!is_empty_value(&json!(0)));
    assert!(!is_empty_value(&json!({})));
}
