// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides context and config builders plus small value constructors

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::TempDir;

use droplet::filters::FilterRegistry;
use droplet::{Context, Value};
use rust_decimal::Decimal;

pub fn s(text: &str) -> Value {
    Value::from(text)
}

pub fn dec(text: &str) -> Value {
    Value::Decimal(Decimal::from_str(text).expect("valid decimal literal"))
}

pub fn strings(items: &[&str]) -> Value {
    Value::Array(items.iter().map(|item| Value::from(*item)).collect())
}

/// Apply a filter through a default registry
pub fn apply(name: &str, input: Value, params: &[Value]) -> Value {
    FilterRegistry::new().apply(name, &input, params)
}

pub struct TestContextBuilder {
    variables: HashMap<String, Value>,
}

impl TestContextBuilder {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    pub fn with_string(mut self, name: &str, value: &str) -> Self {
        self.variables.insert(name.to_string(), Value::from(value));
        self
    }

    pub fn with_integer(mut self, name: &str, value: i64) -> Self {
        self.variables.insert(name.to_string(), Value::Integer(value));
        self
    }

    pub fn with_value(mut self, name: &str, value: Value) -> Self {
        self.variables.insert(name.to_string(), value);
        self
    }

    pub fn with_json(mut self, name: &str, json: serde_json::Value) -> Self {
        self.variables.insert(name.to_string(), Value::from(json));
        self
    }

    pub fn build(self) -> Context {
        let mut context = Context::new();
        context.extend(self.variables);
        context
    }
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write_config(&self, name: &str, yaml: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, yaml).expect("Failed to write config file");
        path
    }
}
