// ABOUTME: The date filter and the built-in English date patterns it tries
// ABOUTME: Parsing and formatting go through the injected DateFormatter

use chrono::{DateTime, NaiveDateTime};
use tracing::debug;

use super::Services;
use crate::value::Value;

const DATE_STYLES: [(&str, Option<&str>); 5] = [
    ("none", None),
    ("short", Some("%m/%d/%y")),
    ("medium", Some("%b %d, %Y")),
    ("long", Some("%B %d, %Y")),
    ("full", Some("%A, %B %d, %Y")),
];

const TIME_STYLES: [(&str, Option<&str>); 5] = [
    ("none", None),
    ("short", Some("%I:%M %p")),
    ("medium", Some("%I:%M:%S %p")),
    ("long", Some("%I:%M:%S %p %Z")),
    ("full", Some("%I:%M:%S %p %Z")),
];

const ISO_PATTERNS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d"];

/// Every date style crossed with every time style, in English, followed by
/// the common ISO 8601 shapes.
pub fn english_date_patterns() -> Vec<String> {
    let mut patterns = Vec::new();
    for (date_style, date_pattern) in DATE_STYLES {
        for (_, time_pattern) in TIME_STYLES {
            let pattern = match (date_pattern, time_pattern) {
                (None, None) => continue,
                (Some(date), None) => date.to_string(),
                (None, Some(time)) => time.to_string(),
                (Some(date), Some(time)) => {
                    let joiner = match date_style {
                        "long" | "full" => " at ",
                        _ => ", ",
                    };
                    format!("{date}{joiner}{time}")
                }
            };
            if !patterns.contains(&pattern) {
                patterns.push(pattern);
            }
        }
    }
    patterns.extend(ISO_PATTERNS.iter().map(|p| p.to_string()));
    patterns
}

/// Reformat a date using the first parameter as a strftime pattern.
///
/// Accepts `"now"`, `"today"`, unix timestamps, RFC 3339 strings and
/// anything one of the service's date patterns can parse. Input that
/// cannot be parsed or formatted comes back unchanged.
pub fn date(input: &Value, params: &[Value], services: &Services) -> Value {
    let Some(pattern) = params.first().map(Value::as_string) else {
        return input.clone();
    };

    let Some(parsed) = parse_input(input, services) else {
        debug!("date filter could not parse {:?}", input);
        return input.clone();
    };

    match services.dates.format(&parsed, &pattern) {
        Some(formatted) => Value::String(formatted),
        None => {
            debug!("date filter could not format with pattern {:?}", pattern);
            input.clone()
        }
    }
}

fn parse_input(input: &Value, services: &Services) -> Option<NaiveDateTime> {
    let text = match input {
        Value::Integer(seconds) => {
            return DateTime::from_timestamp(*seconds, 0).map(|utc| utc.naive_utc());
        }
        Value::String(text) => text.trim(),
        _ => return None,
    };

    if text.eq_ignore_ascii_case("now") || text.eq_ignore_ascii_case("today") {
        return Some(services.dates.now());
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(text) {
        return Some(date_time.naive_local());
    }
    services
        .date_patterns()
        .iter()
        .find_map(|pattern| services.dates.parse(text, pattern))
}
