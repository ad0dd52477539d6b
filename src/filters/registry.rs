// ABOUTME: Name-to-filter lookup table and the registry service that applies filters
// ABOUTME: The built-in table is a const slice sorted by name and searched by binary search

use tracing::{debug, warn};

use super::{collection, date, html, math, misc, text, url};
use super::{ChronoDates, FilterFn, Services, UnicodeText};
use crate::config::FilterSettings;
use crate::value::Value;

/// Built-in filters, sorted by name.
pub const BUILTIN_FILTERS: &[(&str, FilterFn)] = &[
    ("abs", math::abs),
    ("append", text::append),
    ("at_least", math::at_least),
    ("at_most", math::at_most),
    ("capitalize", text::capitalize),
    ("ceil", math::ceil),
    ("date", date::date),
    ("default", misc::default),
    ("divided_by", math::divided_by),
    ("downcase", text::downcase),
    ("escape", html::escape),
    ("escape_once", html::escape_once),
    ("floor", math::floor),
    ("join", collection::join),
    ("lstrip", text::lstrip),
    ("minus", math::minus),
    ("modulo", math::modulo),
    ("newline_to_br", html::newline_to_br),
    ("plus", math::plus),
    ("prepend", text::prepend),
    ("remove", text::remove),
    ("remove_first", text::remove_first),
    ("replace", text::replace),
    ("replace_first", text::replace_first),
    ("reverse", collection::reverse),
    ("round", math::round),
    ("rstrip", text::rstrip),
    ("size", misc::size),
    ("slice", text::slice),
    ("sort", collection::sort),
    ("sort_natural", collection::sort_natural),
    ("split", text::split),
    ("strip", text::strip),
    ("strip_html", html::strip_html),
    ("strip_newlines", text::strip_newlines),
    ("times", math::times),
    ("truncate", text::truncate),
    ("truncatewords", text::truncatewords),
    ("uniq", collection::uniq),
    ("upcase", text::upcase),
    ("url_decode", url::url_decode),
    ("url_encode", url::url_encode),
];

/// Applies built-in filters by name with a fixed set of injected services.
#[derive(Debug, Default)]
pub struct FilterRegistry {
    services: Services,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_services(services: Services) -> Self {
        Self { services }
    }

    /// Default services, probing the configured date formats first.
    pub fn from_settings(settings: &FilterSettings) -> Self {
        let services = Services::new(Box::new(UnicodeText), Box::new(ChronoDates))
            .with_locale_date_formats(settings.locale_date_formats.clone());
        Self::with_services(services)
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn get(&self, name: &str) -> Option<FilterFn> {
        BUILTIN_FILTERS
            .binary_search_by(|(candidate, _)| (*candidate).cmp(name))
            .ok()
            .map(|index| BUILTIN_FILTERS[index].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        BUILTIN_FILTERS.iter().map(|(name, _)| *name)
    }

    /// Run the named filter. Unknown names return the input unchanged.
    pub fn apply(&self, name: &str, input: &Value, params: &[Value]) -> Value {
        match self.get(name) {
            Some(filter) => {
                debug!("Applying filter '{}' with {} parameter(s)", name, params.len());
                filter(input, params, &self.services)
            }
            None => {
                warn!("Unknown filter '{}', passing input through", name);
                input.clone()
            }
        }
    }
}
