// ABOUTME: Parser for `subject | filter: arg, arg | filter` expressions
// ABOUTME: Separators inside double-quoted literals are treated as text

use super::error::{ExpressionError, Result};

/// A parsed expression. Subject and arguments stay as raw tokens so they can
/// be resolved against a context at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub subject: String,
    pub filters: Vec<FilterCall>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCall {
    pub name: String,
    pub arguments: Vec<String>,
}

impl Expression {
    pub fn parse(source: &str) -> Result<Self> {
        let segments = split_unquoted(source, '|')?;
        let (subject, calls) = segments
            .split_first()
            .ok_or(ExpressionError::EmptyExpression)?;

        let subject = subject.trim();
        if subject.is_empty() {
            return Err(ExpressionError::EmptyExpression);
        }

        let filters = calls
            .iter()
            .enumerate()
            .map(|(index, call)| parse_call(source, index + 1, call))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            subject: subject.to_string(),
            filters,
        })
    }
}

fn parse_call(source: &str, segment: usize, call: &str) -> Result<FilterCall> {
    let (name, arguments) = match find_unquoted(call, ':') {
        Some(colon) => (&call[..colon], &call[colon + 1..]),
        None => (call, ""),
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(ExpressionError::EmptyFilterName {
            expression: source.to_string(),
            segment,
        });
    }

    let arguments = if arguments.trim().is_empty() {
        Vec::new()
    } else {
        split_unquoted(arguments, ',')?
            .into_iter()
            .map(|argument| argument.trim().to_string())
            .collect()
    };

    Ok(FilterCall {
        name: name.to_string(),
        arguments,
    })
}

/// Split on `separator` wherever it appears outside double quotes.
fn split_unquoted(text: &str, separator: char) -> Result<Vec<&str>> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (index, ch) in text.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == separator && !in_quotes => {
                pieces.push(&text[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }

    if in_quotes {
        return Err(ExpressionError::UnterminatedString {
            expression: text.trim().to_string(),
        });
    }
    pieces.push(&text[start..]);
    Ok(pieces)
}

fn find_unquoted(text: &str, target: char) -> Option<usize> {
    let mut in_quotes = false;
    for (index, ch) in text.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == target && !in_quotes => return Some(index),
            _ => {}
        }
    }
    None
}
