// ABOUTME: Evaluates filter expressions against a context using the filter registry
// ABOUTME: Also renders text with embedded {{ expression }} output tags

pub mod error;
pub mod expression;

pub use error::{ExpressionError, Result};
pub use expression::{Expression, FilterCall};

use tracing::debug;

use crate::config::Config;
use crate::context::Context;
use crate::filters::FilterRegistry;
use crate::value::Value;

const TAG_OPEN: &str = "{{";
const TAG_CLOSE: &str = "}}";

/// Resolves an expression's subject, then threads it through each filter in turn.
#[derive(Debug, Default)]
pub struct Pipeline {
    registry: FilterRegistry,
    strict: bool,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            registry: FilterRegistry::from_settings(&config.filters),
            strict: config.filters.strict,
        }
    }

    pub fn with_registry(registry: FilterRegistry) -> Self {
        Self {
            registry,
            strict: false,
        }
    }

    /// In strict mode an unknown filter name is an error instead of a no-op
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    /// Parse and evaluate a single expression such as `name | upcase`
    pub fn evaluate(&self, source: &str, context: &Context) -> Result<Value> {
        let expression = Expression::parse(source)?;
        self.evaluate_expression(&expression, context)
    }

    pub fn evaluate_expression(&self, expression: &Expression, context: &Context) -> Result<Value> {
        let mut value = context.resolve_token(&expression.subject);

        for call in &expression.filters {
            if self.strict && !self.registry.contains(&call.name) {
                return Err(ExpressionError::UnknownFilter {
                    name: call.name.clone(),
                });
            }

            let params: Vec<Value> = call
                .arguments
                .iter()
                .map(|argument| context.resolve_token(argument))
                .collect();
            value = self.registry.apply(&call.name, &value, &params);
        }

        debug!("Evaluated '{}' to {}", expression.subject, value.type_name());
        Ok(value)
    }

    /// Replace every `{{ expression }}` in `template` with the string form of
    /// its value. Text outside tags is copied unchanged.
    pub fn render(&self, template: &str, context: &Context) -> Result<String> {
        let mut output = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find(TAG_OPEN) {
            output.push_str(&rest[..open]);
            let inner_start = open + TAG_OPEN.len();
            let close = rest[inner_start..]
                .find(TAG_CLOSE)
                .ok_or(ExpressionError::UnclosedTag {
                    offset: template.len() - rest.len() + open,
                })?;

            let value = self.evaluate(&rest[inner_start..inner_start + close], context)?;
            output.push_str(&value.as_string());
            rest = &rest[inner_start + close + TAG_CLOSE.len()..];
        }

        output.push_str(rest);
        Ok(output)
    }
}
