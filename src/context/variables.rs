// ABOUTME: Mutable variable store consulted while evaluating template expressions
// ABOUTME: Handles upserts, native primitive ingestion and token-to-value resolution

use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use super::literal::parse_literal;
use crate::value::{Native, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    variables: HashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from JSON variables, e.g. the `variables` section of a config file
    pub fn from_json_variables(variables: &HashMap<String, JsonValue>) -> Self {
        let mut context = Self::new();
        for (name, json) in variables {
            context.set(name.clone(), Value::from(json));
        }
        context
    }

    /// Get a variable value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Add or replace a variable
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    /// Add or replace a variable from a host primitive.
    ///
    /// A primitive without a value form (a non-finite float) leaves the
    /// context untouched.
    pub fn set_native(&mut self, name: impl Into<String>, native: impl Into<Native>) {
        if let Some(value) = native.into().into_value() {
            self.set(name, value);
        }
    }

    /// Add or replace a variable from a JSON scalar; arrays and objects are ignored
    pub fn set_json(&mut self, name: impl Into<String>, json: &JsonValue) {
        let name = name.into();
        match Native::from_json(json) {
            Some(native) => self.set_native(name, native),
            None => debug!("Ignoring non-primitive JSON value for '{}'", name),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.variables.remove(name)
    }

    /// Add multiple variables
    pub fn extend(&mut self, variables: impl IntoIterator<Item = (String, Value)>) {
        self.variables.extend(variables);
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Resolve a raw token to a literal or a variable's value, defaulting to `Nil`
    pub fn resolve_token(&self, raw: &str) -> Value {
        match parse_literal(raw) {
            Some(literal) => literal,
            None => self.lookup(raw.trim()).unwrap_or(Value::Nil),
        }
    }

    /// Look up a variable, following `.`-separated segments into dictionaries
    /// and arrays when no binding has the full name.
    pub fn lookup(&self, path: &str) -> Option<Value> {
        if let Some(value) = self.variables.get(path) {
            return Some(value.clone());
        }

        let mut segments = path.split('.');
        let root = self.variables.get(segments.next()?)?;
        let mut current = root.clone();
        for segment in segments {
            current = member(&current, segment)?;
        }
        Some(current)
    }
}

fn member(value: &Value, segment: &str) -> Option<Value> {
    match (value, segment) {
        (Value::Dictionary(entries), key) => entries.get(key).cloned(),
        (Value::Array(items), "size") => Some(Value::Integer(items.len() as i64)),
        (Value::Array(items), "first") => items.first().cloned(),
        (Value::Array(items), "last") => items.last().cloned(),
        (Value::Array(items), index) => {
            let index: i64 = index.parse().ok()?;
            let index = if index < 0 {
                items.len() as i64 + index
            } else {
                index
            };
            usize::try_from(index).ok().and_then(|i| items.get(i)).cloned()
        }
        (Value::String(s), "size") => Some(Value::Integer(s.graphemes(true).count() as i64)),
        _ => None,
    }
}
