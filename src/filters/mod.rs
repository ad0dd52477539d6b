// ABOUTME: Built-in filter registry and filter algorithms
// ABOUTME: Exports the filter signature, the registry service and the injected capabilities

pub mod collection;
pub mod date;
pub mod html;
pub mod math;
pub mod misc;
pub mod registry;
pub mod services;
pub mod text;
pub mod url;

pub use registry::{FilterRegistry, BUILTIN_FILTERS};
pub use services::{ChronoDates, DateFormatter, Services, TextServices, UnicodeText};

use crate::value::Value;

/// A filter: input value, already-resolved parameters, injected services.
///
/// Filters never fail. Unsupported input comes back unchanged unless the
/// filter documents otherwise.
pub type FilterFn = fn(&Value, &[Value], &Services) -> Value;

/// `(count or length, suffix)` for the truncation filters; `None` when the
/// parameter list has the wrong shape.
fn length_and_suffix(params: &[Value]) -> Option<(i64, String)> {
    match params {
        [length] => Some((length.as_integer()?, "...".to_string())),
        [length, suffix] => Some((length.as_integer()?, suffix.as_string())),
        _ => None,
    }
}
