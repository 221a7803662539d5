//! Value Module
//!
//! Best-guess typing of stored strings.
//!
//! Values live on disk as plain text. When auto-parse is enabled, reads pass
//! the text through [`auto_parse`]:
//!
//! | text              | result            |
//! |-------------------|-------------------|
//! | `42`, `-1.5`      | `Value::Number`   |
//! | `true`, `false`   | `Value::Bool`     |
//! | `null`            | `Value::Null`     |
//! | `[1,2]`, `{"a":1}`| `Value::Array` / `Value::Object` (valid JSON only) |
//! | anything else     | `Value::String` (verbatim) |

use std::fmt;

use serde::{Deserialize, Serialize};
pub use serde_json::Value;

/// Convert raw stored text into an inferred value
pub fn auto_parse(raw: &str) -> Value {
    let trimmed = raw.trim();

    match trimmed {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }

    if let Some(number) = parse_number(trimmed) {
        return number;
    }

    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        if let Ok(structured) = serde_json::from_str::<Value>(trimmed) {
            return structured;
        }
    }

    Value::String(raw.to_string())
}

fn parse_number(text: &str) -> Option<Value> {
    if text.is_empty() {
        return None;
    }

    if let Ok(int) = text.parse::<i64>() {
        return Some(Value::from(int));
    }

    // f64 parsing accepts "inf"/"NaN"; those stay text.
    let float = text.parse::<f64>().ok().filter(|f| f.is_finite())?;
    serde_json::Number::from_f64(float).map(Value::Number)
}

/// Runtime type tag of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Number,
    Bool,
    Null,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Bool,
            Value::Null => ValueKind::Null,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Bool => "bool",
            ValueKind::Null => "null",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a value counts as empty (zero-length text or array, or null)
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Null => true,
        _ => false,
    }
}
