// ABOUTME: Array filters: join, reverse, sorting and de-duplication
// ABOUTME: Sorting works on element strings, so non-string elements come back as strings

use std::collections::HashSet;

use super::Services;
use crate::value::Value;

pub fn join(input: &Value, params: &[Value], _services: &Services) -> Value {
    let (Value::Array(items), Some(Value::String(glue))) = (input, params.first()) else {
        return input.clone();
    };
    let parts: Vec<String> = items.iter().map(Value::as_string).collect();
    Value::String(parts.join(glue))
}

pub fn reverse(input: &Value, _params: &[Value], _services: &Services) -> Value {
    match input {
        Value::Array(items) => Value::Array(items.iter().rev().cloned().collect()),
        other => other.clone(),
    }
}

pub fn sort(input: &Value, _params: &[Value], _services: &Services) -> Value {
    let Value::Array(items) = input else {
        return input.clone();
    };
    let mut strings: Vec<String> = items.iter().map(Value::as_string).collect();
    strings.sort();
    Value::Array(strings.into_iter().map(Value::String).collect())
}

pub fn sort_natural(input: &Value, _params: &[Value], services: &Services) -> Value {
    let Value::Array(items) = input else {
        return input.clone();
    };
    let mut strings: Vec<String> = items.iter().map(Value::as_string).collect();
    strings.sort_by(|a, b| services.text.compare_case_insensitive(a, b));
    Value::Array(strings.into_iter().map(Value::String).collect())
}

/// Drop repeated elements, keeping the first occurrence of each.
pub fn uniq(input: &Value, _params: &[Value], _services: &Services) -> Value {
    let Value::Array(items) = input else {
        return input.clone();
    };
    let mut seen = HashSet::new();
    let unique = items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect();
    Value::Array(unique)
}
