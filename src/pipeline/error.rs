// ABOUTME: Error types for parsing and evaluating filter expressions
// ABOUTME: Filters themselves never fail, so these cover syntax and strict-mode lookups only

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("Empty expression: nothing to evaluate")]
    EmptyExpression,

    #[error("Missing filter name in segment {segment} of '{expression}'")]
    EmptyFilterName { expression: String, segment: usize },

    #[error("Unterminated string literal in '{expression}'")]
    UnterminatedString { expression: String },

    #[error("Unknown filter '{name}'")]
    UnknownFilter { name: String },

    #[error("Output tag opened at byte {offset} is never closed")]
    UnclosedTag { offset: usize },
}

pub type Result<T> = std::result::Result<T, ExpressionError>;
