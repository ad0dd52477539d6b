// ABOUTME: String filters: case, whitespace, concatenation, search/replace and truncation
// ABOUTME: Characters are grapheme clusters and words both come from TextServices

use super::{length_and_suffix, Services};
use crate::value::Value;

pub fn append(input: &Value, params: &[Value], _services: &Services) -> Value {
    match params.first() {
        Some(suffix) => Value::String(input.as_string() + &suffix.as_string()),
        None => input.clone(),
    }
}

pub fn prepend(input: &Value, params: &[Value], _services: &Services) -> Value {
    match params.first() {
        Some(prefix) => Value::String(prefix.as_string() + &input.as_string()),
        None => input.clone(),
    }
}

/// Uppercase the first letter of the first word; the rest is left as is.
pub fn capitalize(input: &Value, _params: &[Value], services: &Services) -> Value {
    let text = input.as_string();
    let Some(&(offset, word)) = services.text.words(&text).first() else {
        return input.clone();
    };
    let Some(first) = word.chars().next() else {
        return input.clone();
    };

    let rest = offset + first.len_utf8();
    let mut output = String::with_capacity(text.len());
    output.push_str(&text[..offset]);
    output.push_str(&services.text.uppercase(first.encode_utf8(&mut [0; 4])));
    output.push_str(&text[rest..]);
    Value::String(output)
}

/// Only String input is lowercased; `upcase` by contrast accepts anything.
pub fn downcase(input: &Value, _params: &[Value], _services: &Services) -> Value {
    match input {
        Value::String(s) => Value::String(s.to_lowercase()),
        other => other.clone(),
    }
}

pub fn upcase(input: &Value, _params: &[Value], services: &Services) -> Value {
    Value::String(services.text.uppercase(&input.as_string()))
}

pub fn lstrip(input: &Value, _params: &[Value], _services: &Services) -> Value {
    match input {
        Value::String(s) => Value::String(s.trim_start().to_string()),
        other => other.clone(),
    }
}

pub fn rstrip(input: &Value, _params: &[Value], _services: &Services) -> Value {
    match input {
        Value::String(s) => Value::String(s.trim_end().to_string()),
        other => other.clone(),
    }
}

pub fn strip(input: &Value, _params: &[Value], _services: &Services) -> Value {
    match input {
        Value::String(s) => Value::String(s.trim().to_string()),
        other => other.clone(),
    }
}

pub fn strip_newlines(input: &Value, _params: &[Value], _services: &Services) -> Value {
    Value::String(input.as_string().replace("\r\n", "").replace('\n', ""))
}

pub fn remove(input: &Value, params: &[Value], _services: &Services) -> Value {
    match params.first() {
        Some(needle) => Value::String(input.as_string().replace(&needle.as_string(), "")),
        None => input.clone(),
    }
}

pub fn remove_first(input: &Value, params: &[Value], _services: &Services) -> Value {
    match params.first() {
        Some(needle) => Value::String(input.as_string().replacen(&needle.as_string(), "", 1)),
        None => input.clone(),
    }
}

pub fn replace(input: &Value, params: &[Value], _services: &Services) -> Value {
    replace_with(input, params, usize::MAX)
}

pub fn replace_first(input: &Value, params: &[Value], _services: &Services) -> Value {
    replace_with(input, params, 1)
}

fn replace_with(input: &Value, params: &[Value], limit: usize) -> Value {
    let [needle, replacement] = params else {
        return input.clone();
    };
    let needle = needle.as_string();
    if needle.is_empty() {
        return input.clone();
    }
    Value::String(input.as_string().replacen(&needle, &replacement.as_string(), limit))
}

/// Substring of a String by character offset and length.
///
/// A negative offset counts from the end. Without a length, a non-negative
/// offset takes one character and a negative offset takes the rest of the
/// string. Any other input or parameter shape yields `Nil`.
pub fn slice(input: &Value, params: &[Value], services: &Services) -> Value {
    let Value::String(text) = input else {
        return Value::Nil;
    };
    let (start, length) = match params {
        [start] => {
            let start = start.as_integer();
            (start, start.map(|n| if n < 0 { n.saturating_neg() } else { 1 }))
        }
        [start, length] => (start.as_integer(), length.as_integer()),
        _ => return Value::Nil,
    };
    let (Some(start), Some(length)) = (start, length) else {
        return Value::Nil;
    };

    let graphemes = services.text.graphemes(text);
    let count = graphemes.len() as i64;
    let start = if start < 0 { count + start } else { start };
    if start < 0 || start >= count || length <= 0 {
        return Value::String(String::new());
    }

    let length = length.min(count - start);
    Value::String(graphemes[start as usize..(start + length) as usize].concat())
}

/// Split a String on every occurrence of the boundary. An empty boundary
/// splits into grapheme clusters.
pub fn split(input: &Value, params: &[Value], services: &Services) -> Value {
    let (Value::String(text), Some(Value::String(boundary))) = (input, params.first()) else {
        return input.clone();
    };

    let parts = if boundary.is_empty() {
        services
            .text
            .graphemes(text)
            .into_iter()
            .map(|grapheme| Value::String(grapheme.to_string()))
            .collect()
    } else {
        text.split(boundary.as_str())
            .map(|part| Value::String(part.to_string()))
            .collect()
    };
    Value::Array(parts)
}

pub fn truncate(input: &Value, params: &[Value], services: &Services) -> Value {
    let Some((length, suffix)) = length_and_suffix(params) else {
        return input.clone();
    };

    let text = input.as_string();
    let graphemes = services.text.graphemes(&text);
    if graphemes.len() as i64 <= length {
        return input.clone();
    }

    let suffix_length = services.text.graphemes(&suffix).len() as i64;
    let keep = length.saturating_sub(suffix_length).max(0) as usize;
    let mut output = graphemes[..keep].concat();
    output.push_str(&suffix);
    Value::String(output)
}

/// Keep the first N words. Input is unchanged only when those words reach
/// the end of the text, so trailing punctuation still earns the suffix.
pub fn truncatewords(input: &Value, params: &[Value], services: &Services) -> Value {
    let Some((count, suffix)) = length_and_suffix(params) else {
        return input.clone();
    };

    let text = input.as_string();
    let words = services.text.words(&text);
    let consumed_to = words.last().map_or(0, |(offset, word)| offset + word.len());
    if words.len() as i64 <= count && consumed_to == text.len() {
        return input.clone();
    }

    let keep = count.max(0) as usize;
    let mut output = words
        .iter()
        .take(keep)
        .map(|(_, word)| *word)
        .collect::<Vec<_>>()
        .join(" ");
    output.push_str(&suffix);
    Value::String(output)
}
