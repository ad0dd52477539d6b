// ABOUTME: The recursive Value enum flowing through variables and filters
// ABOUTME: Implements cross-type coercions, truthiness, structural equality and hashing

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Hash written for `Nil` so it never collides with a tagged payload hash.
const NIL_HASH_SENTINEL: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    String(String),
    Integer(i64),
    Decimal(Decimal),
    Array(Vec<Value>),
    Dictionary(BTreeMap<String, Value>),
    Range(RangeInclusive<i64>),
}

impl Value {
    /// Render the value as template output text.
    ///
    /// Numbers use their plain decimal form, arrays concatenate their
    /// elements, and everything without a textual form renders empty.
    pub fn as_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Integer(n) => n.to_string(),
            Value::Decimal(d) => d.normalize().to_string(),
            Value::Array(items) => items.iter().map(Value::as_string).collect(),
            Value::Nil | Value::Bool(_) | Value::Dictionary(_) | Value::Range(_) => String::new(),
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(d) => Some(*d),
            Value::Integer(n) => Some(Decimal::from(*n)),
            Value::String(s) => parse_decimal(s),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Decimal(d) => d.to_f64(),
            Value::Integer(n) => Some(*n as f64),
            Value::String(s) => s.parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Decimals are truncated toward zero; out-of-range values yield `None`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Decimal(d) => d.trunc().to_i64(),
            Value::Integer(n) => Some(*n),
            Value::String(s) => parse_integer(s),
            _ => None,
        }
    }

    /// Liquid truthiness: only `nil` and `false` are falsy.
    pub fn is_falsy(&self) -> bool {
        matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn is_truthy(&self) -> bool {
        !self.is_falsy()
    }

    pub fn is_empty_string(&self) -> bool {
        matches!(self, Value::String(s) if s.is_empty())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Name of the variant, used in log messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::Array(_) => "array",
            Value::Dictionary(_) => "dictionary",
            Value::Range(_) => "range",
        }
    }

    /// Convert to JSON for hand-off to serializers and external renderers.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Nil => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Integer(n) => JsonValue::from(*n),
            Value::Decimal(d) => {
                let text = d.normalize().to_string();
                text.parse::<serde_json::Number>()
                    .map(JsonValue::Number)
                    .unwrap_or(JsonValue::String(text))
            }
            Value::Array(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Dictionary(entries) => JsonValue::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            Value::Range(range) => {
                JsonValue::Array(vec![JsonValue::from(*range.start()), JsonValue::from(*range.end())])
            }
        }
    }
}

/// Strict integer parse: optional sign followed by ASCII digits only.
pub fn parse_integer(text: &str) -> Option<i64> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<i64>().ok()
}

/// Strict decimal parse: optional sign, digits, and at most one decimal point.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    let mut digits = 0usize;
    let mut points = 0usize;
    for b in body.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => points += 1,
            _ => return None,
        }
    }
    if digits == 0 || points > 1 {
        return None;
    }
    Decimal::from_str(text.strip_prefix('+').unwrap_or(text)).ok()
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Nil => NIL_HASH_SENTINEL.hash(state),
            Value::Bool(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            Value::String(s) => {
                2u8.hash(state);
                s.hash(state);
            }
            Value::Integer(n) => {
                3u8.hash(state);
                n.hash(state);
            }
            Value::Decimal(d) => {
                4u8.hash(state);
                d.hash(state);
            }
            Value::Array(items) => {
                5u8.hash(state);
                items.hash(state);
            }
            Value::Dictionary(entries) => {
                6u8.hash(state);
                entries.hash(state);
            }
            Value::Range(range) => {
                7u8.hash(state);
                range.hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<RangeInclusive<i64>> for Value {
    fn from(value: RangeInclusive<i64>) -> Self {
        Value::Range(value)
    }
}

impl From<&JsonValue> for Value {
    fn from(json: &JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Nil,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n
                    .as_f64()
                    .and_then(Decimal::from_f64)
                    .map(Value::Decimal)
                    .unwrap_or(Value::Nil),
            },
            JsonValue::String(s) => Value::String(s.clone()),
            JsonValue::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            JsonValue::Object(entries) => Value::Dictionary(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        Value::from(&json)
    }
}
