// ABOUTME: Filters that are not tied to one value kind
// ABOUTME: Implements default and size

use super::Services;
use crate::value::Value;

/// Substitute the first parameter for `nil`, `false` or an empty string.
pub fn default(input: &Value, params: &[Value], _services: &Services) -> Value {
    match params.first() {
        Some(fallback) if input.is_falsy() || input.is_empty_string() => fallback.clone(),
        _ => input.clone(),
    }
}

/// Grapheme count of a String or element count of an Array; `Nil` otherwise.
pub fn size(input: &Value, _params: &[Value], services: &Services) -> Value {
    match input {
        Value::String(s) => Value::Integer(services.text.graphemes(s).len() as i64),
        Value::Array(items) => Value::Integer(items.len() as i64),
        _ => Value::Nil,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(filter: crate::filters::FilterFn, input: Value, params: &[Value]) -> Value {
        filter(&input, params, &Services::default())
    }

    #[test]
    fn test_default() {
        let fallback = Value::from("fallback");
        assert_eq!(run(default, Value::Nil, &[fallback.clone()]), fallback);
        assert_eq!(run(default, Value::Bool(false), &[fallback.clone()]), fallback);
        assert_eq!(run(default, Value::from(""), &[fallback.clone()]), fallback);
        assert_eq!(run(default, Value::from("value"), &[fallback.clone()]), Value::from("value"));
        assert_eq!(run(default, Value::Integer(0), &[fallback.clone()]), Value::Integer(0));
        assert_eq!(run(default, Value::Array(vec![]), &[fallback]), Value::Array(vec![]));
        assert_eq!(run(default, Value::Nil, &[]), Value::Nil);
    }

    #[test]
    fn test_size() {
        assert_eq!(run(size, Value::from("Ground control"), &[]), Value::Integer(14));
        assert_eq!(run(size, Value::from("naïve"), &[]), Value::Integer(5));
        assert_eq!(run(size, Value::from("e\u{301}tude"), &[]), Value::Integer(5));
        assert_eq!(run(size, Value::from("\u{1F1FA}\u{1F1F8}"), &[]), Value::Integer(1));
        assert_eq!(
            run(size, Value::Array(vec![Value::Nil, Value::Nil]), &[]),
            Value::Integer(2)
        );
        assert_eq!(run(size, Value::Integer(100), &[]), Value::Nil);
    }
}
