// ABOUTME: URL filters: form-style percent encoding and decoding
// ABOUTME: Spaces travel as '+', and malformed escapes or non-UTF-8 results yield Nil

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::Services;
use crate::value::Value;

/// Everything except ASCII alphanumerics and `-._~/?+` is escaped.
const URL_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/')
    .remove(b'?')
    .remove(b'+');

pub fn url_encode(input: &Value, _params: &[Value], _services: &Services) -> Value {
    let text = input.as_string().replace(' ', "+");
    Value::String(utf8_percent_encode(&text, URL_ENCODE_SET).to_string())
}

pub fn url_decode(input: &Value, _params: &[Value], _services: &Services) -> Value {
    let text = input.as_string();
    if !has_valid_escapes(&text) {
        return Value::Nil;
    }
    match percent_decode_str(&text).decode_utf8() {
        Ok(decoded) => Value::String(decoded.replace('+', " ")),
        Err(_) => Value::Nil,
    }
}

/// Every `%` must introduce two hex digits.
fn has_valid_escapes(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(filter: crate::filters::FilterFn, input: &str) -> Value {
        filter(&Value::from(input), &[], &Services::default())
    }

    #[test]
    fn test_url_encode() {
        assert_eq!(run(url_encode, "john@liquid.com"), Value::from("john%40liquid.com"));
        assert_eq!(run(url_encode, "Tetsuro Takara"), Value::from("Tetsuro+Takara"));
        assert_eq!(run(url_encode, "a/b?c=d&e"), Value::from("a/b?c%3Dd%26e"));
        assert_eq!(run(url_encode, "café"), Value::from("caf%C3%A9"));
        assert_eq!(run(url_encode, "~-._"), Value::from("~-._"));
    }

    #[test]
    fn test_url_decode() {
        assert_eq!(run(url_decode, "%27Stop%21%27+said+Fred"), Value::from("'Stop!' said Fred"));
        assert_eq!(run(url_decode, "caf%C3%A9"), Value::from("café"));
        assert_eq!(run(url_decode, "plain"), Value::from("plain"));
    }

    #[test]
    fn test_url_decode_failures_are_nil() {
        assert_eq!(run(url_decode, "%zz"), Value::Nil);
        assert_eq!(run(url_decode, "trailing%4"), Value::Nil);
        assert_eq!(run(url_decode, "%FF%FE"), Value::Nil);
    }

    #[test]
    fn test_round_trip() {
        let original = "Hello World / 100% done?";
        let encoded = run(url_encode, original);
        assert_eq!(run(url_decode, &encoded.as_string()), Value::from(original));
    }
}
