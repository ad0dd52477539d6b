// ABOUTME: Native primitive ingestion into the Value model
// ABOUTME: Classifies the five recognised host primitive shapes at the call site

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;

use super::Value;

/// A host primitive accepted by `Context::set_native`.
///
/// Only these five shapes are recognised. Anything else never becomes a
/// `Native` in the first place, which is how unsupported input is ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum Native {
    Integer(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Absent,
}

impl Native {
    /// Classify a JSON scalar. Arrays, objects and numbers that fit neither
    /// `i64` nor `f64` are not native primitives.
    pub fn from_json(json: &JsonValue) -> Option<Self> {
        match json {
            JsonValue::Null => Some(Native::Absent),
            JsonValue::Bool(b) => Some(Native::Bool(*b)),
            JsonValue::Number(n) => n
                .as_i64()
                .map(Native::Integer)
                .or_else(|| n.as_f64().map(Native::Float)),
            JsonValue::String(s) => Some(Native::Text(s.clone())),
            JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }

    /// Floats go through `Decimal`; NaN and infinities have no value form.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Native::Integer(n) => Some(Value::Integer(n)),
            Native::Float(f) => Decimal::from_f64(f).map(Value::Decimal),
            Native::Text(s) => Some(Value::String(s)),
            Native::Bool(b) => Some(Value::Bool(b)),
            Native::Absent => Some(Value::Nil),
        }
    }
}

impl From<i64> for Native {
    fn from(value: i64) -> Self {
        Native::Integer(value)
    }
}

impl From<i32> for Native {
    fn from(value: i32) -> Self {
        Native::Integer(i64::from(value))
    }
}

impl From<f64> for Native {
    fn from(value: f64) -> Self {
        Native::Float(value)
    }
}

impl From<&str> for Native {
    fn from(value: &str) -> Self {
        Native::Text(value.to_string())
    }
}

impl From<String> for Native {
    fn from(value: String) -> Self {
        Native::Text(value)
    }
}

impl From<bool> for Native {
    fn from(value: bool) -> Self {
        Native::Bool(value)
    }
}

impl<T: Into<Native>> From<Option<T>> for Native {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Native::Absent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_native_into_value() {
        assert_eq!(Native::from(7).into_value(), Some(Value::Integer(7)));
        assert_eq!(
            Native::from(2.5).into_value(),
            Some(Value::Decimal(Decimal::new(25, 1)))
        );
        assert_eq!(Native::from("x").into_value(), Some(Value::from("x")));
        assert_eq!(Native::from(false).into_value(), Some(Value::Bool(false)));
        assert_eq!(Native::from(None::<i64>).into_value(), Some(Value::Nil));
        assert_eq!(Native::from(Some("y")).into_value(), Some(Value::from("y")));
    }

    #[test]
    fn test_non_finite_float_has_no_value() {
        assert_eq!(Native::Float(f64::NAN).into_value(), None);
        assert_eq!(Native::Float(f64::INFINITY).into_value(), None);
    }

    #[test]
    fn test_from_json_scalars_only() {
        assert_eq!(Native::from_json(&json!(1)), Some(Native::Integer(1)));
        assert_eq!(Native::from_json(&json!(1.5)), Some(Native::Float(1.5)));
        assert_eq!(Native::from_json(&json!("s")), Some(Native::Text("s".into())));
        assert_eq!(Native::from_json(&json!(true)), Some(Native::Bool(true)));
        assert_eq!(Native::from_json(&json!(null)), Some(Native::Absent));
        assert_eq!(Native::from_json(&json!([1, 2])), None);
        assert_eq!(Native::from_json(&json!({"a": 1})), None);
    }
}
