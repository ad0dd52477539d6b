// ABOUTME: Literal recognition for raw template tokens
// ABOUTME: Distinguishes quoted strings, integers and decimals from variable names

use crate::value::{parse_decimal, parse_integer, Value};

/// Parse a raw token as a literal, or return `None` when it names a variable.
///
/// Quoted text is taken verbatim; no escape sequences are processed.
pub fn parse_literal(raw: &str) -> Option<Value> {
    let token = raw.trim();

    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        return Some(Value::String(token[1..token.len() - 1].to_string()));
    }

    if let Some(n) = parse_integer(token) {
        return Some(Value::Integer(n));
    }

    parse_decimal(token).map(Value::Decimal)
}
