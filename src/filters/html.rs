// ABOUTME: HTML filters: escaping, tag stripping and line-break conversion
// ABOUTME: Escaping uses named references for & < > " and a numeric reference for '

use regex::Regex;
use std::sync::LazyLock;

use super::Services;
use crate::value::Value;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("HTML tag pattern is valid"));

pub fn escape(input: &Value, _params: &[Value], _services: &Services) -> Value {
    Value::String(html_escape::encode_quoted_attribute(&input.as_string()).into_owned())
}

/// Escape without double-escaping references that are already present.
pub fn escape_once(input: &Value, _params: &[Value], _services: &Services) -> Value {
    let text = input.as_string();
    let decoded = html_escape::decode_html_entities(&text);
    Value::String(html_escape::encode_quoted_attribute(&decoded).into_owned())
}

pub fn strip_html(input: &Value, _params: &[Value], _services: &Services) -> Value {
    Value::String(HTML_TAG.replace_all(&input.as_string(), "").into_owned())
}

pub fn newline_to_br(input: &Value, _params: &[Value], _services: &Services) -> Value {
    match input {
        Value::String(s) => Value::String(s.replace("\r\n", "<br />").replace('\n', "<br />")),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterFn;

    fn run(filter: FilterFn, input: Value) -> Value {
        filter(&input, &[], &Services::default())
    }

    fn s(text: &str) -> Value {
        Value::from(text)
    }

    #[test]
    fn test_escape() {
        let escaped = run(escape, s("Have you read 'James & the Giant Peach'?")).as_string();
        assert!(escaped.starts_with("Have you read &#"));
        assert!(escaped.contains("James &amp; the Giant Peach"));
        assert!(!escaped.contains('\''));
        assert_eq!(run(escape, s("<p class=\"x\">")), s("&lt;p class=&quot;x&quot;&gt;"));
        assert_eq!(run(escape, Value::Integer(5)), s("5"));
    }

    #[test]
    fn test_escape_once() {
        assert_eq!(run(escape_once, s("1 &lt; 2 &amp; 3")), s("1 &lt; 2 &amp; 3"));
        assert_eq!(run(escape_once, s("1 < 2 &amp; 3")), s("1 &lt; 2 &amp; 3"));
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            run(strip_html, s("Have <em>you</em> read <a href=\"/x\">Ulysses</a>?<br/>")),
            s("Have you read Ulysses?")
        );
        assert_eq!(run(strip_html, s("a <> b")), s("a  b"));
        assert_eq!(run(strip_html, s("1 < 2")), s("1 < 2"));
    }

    #[test]
    fn test_newline_to_br() {
        assert_eq!(run(newline_to_br, s("a\r\nb\nc")), s("a<br />b<br />c"));
        assert_eq!(run(newline_to_br, Value::Integer(1)), Value::Integer(1));
    }
}
