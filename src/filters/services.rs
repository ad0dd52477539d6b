// ABOUTME: Injected text and date capabilities used by locale-sensitive filters
// ABOUTME: Provides Unicode word segmentation, case-insensitive collation and chrono date handling

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use std::cmp::Ordering;
use std::fmt::{self, Write as _};
use unicode_segmentation::UnicodeSegmentation;

use super::date::english_date_patterns;

/// Segmentation and collation for the locale-sensitive filters.
pub trait TextServices: Send + Sync + fmt::Debug {
    /// Words in `text` with their byte offsets. Whitespace and punctuation
    /// are not words.
    fn words<'a>(&self, text: &'a str) -> Vec<(usize, &'a str)>;

    /// User-perceived characters (extended grapheme clusters) of `text`.
    fn graphemes<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.graphemes(true).collect()
    }

    fn compare_case_insensitive(&self, lhs: &str, rhs: &str) -> Ordering;

    fn uppercase(&self, text: &str) -> String {
        text.to_uppercase()
    }
}

/// Default text services backed by Unicode word boundaries (UAX #29).
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeText;

impl TextServices for UnicodeText {
    fn words<'a>(&self, text: &'a str) -> Vec<(usize, &'a str)> {
        text.unicode_word_indices().collect()
    }

    fn compare_case_insensitive(&self, lhs: &str, rhs: &str) -> Ordering {
        lhs.to_lowercase().cmp(&rhs.to_lowercase())
    }
}

/// strftime/strptime-style date handling for the `date` filter.
pub trait DateFormatter: Send + Sync + fmt::Debug {
    fn now(&self) -> NaiveDateTime;

    fn parse(&self, text: &str, pattern: &str) -> Option<NaiveDateTime>;

    /// `None` when the pattern cannot be rendered.
    fn format(&self, date: &NaiveDateTime, pattern: &str) -> Option<String>;
}

/// Date handling backed by chrono in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoDates;

impl DateFormatter for ChronoDates {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn parse(&self, text: &str, pattern: &str) -> Option<NaiveDateTime> {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(date_time);
        }
        if let Ok(date_time) = DateTime::parse_from_str(text, pattern) {
            return Some(date_time.naive_local());
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, pattern) {
            return date.and_hms_opt(0, 0, 0);
        }
        NaiveTime::parse_from_str(text, pattern)
            .ok()
            .map(|time| self.now().date().and_time(time))
    }

    fn format(&self, date: &NaiveDateTime, pattern: &str) -> Option<String> {
        // chrono reports bad specifiers as fmt::Error instead of text
        let mut output = String::new();
        write!(output, "{}", date.format(pattern)).ok()?;
        Some(output)
    }
}

/// Capabilities handed to every filter invocation.
#[derive(Debug)]
pub struct Services {
    pub text: Box<dyn TextServices>,
    pub dates: Box<dyn DateFormatter>,
    date_patterns: Vec<String>,
}

impl Services {
    pub fn new(text: Box<dyn TextServices>, dates: Box<dyn DateFormatter>) -> Self {
        Self {
            text,
            dates,
            date_patterns: english_date_patterns(),
        }
    }

    /// Try `formats` before the built-in English patterns when parsing dates
    pub fn with_locale_date_formats(mut self, formats: Vec<String>) -> Self {
        let mut patterns = formats;
        patterns.append(&mut self.date_patterns);
        self.date_patterns = patterns;
        self
    }

    /// Patterns tried, in order, by the `date` filter
    pub fn date_patterns(&self) -> &[String] {
        &self.date_patterns
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new(Box::new(UnicodeText), Box::new(ChronoDates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_words_skip_punctuation() {
        let words = UnicodeText.words("Hello, wide world!");
        assert_eq!(words, vec![(0, "Hello"), (7, "wide"), (12, "world")]);
    }

    #[test]
    fn test_graphemes_keep_combining_marks_and_flags() {
        assert_eq!(UnicodeText.graphemes("e\u{301}t\u{e9}"), vec!["e\u{301}", "t", "\u{e9}"]);
        assert_eq!(UnicodeText.graphemes("\u{1F1FA}\u{1F1F8}!"), vec!["\u{1F1FA}\u{1F1F8}", "!"]);
        assert!(UnicodeText.graphemes("").is_empty());
    }

    #[test]
    fn test_case_insensitive_compare() {
        assert_eq!(UnicodeText.compare_case_insensitive("apple", "Banana"), Ordering::Less);
        assert_eq!(UnicodeText.compare_case_insensitive("ÉCOLE", "école"), Ordering::Equal);
    }

    #[test]
    fn test_chrono_parse_variants() {
        let dates = ChronoDates;

        let full = dates.parse("2024-03-09 14:05:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!((full.year(), full.month(), full.day(), full.hour()), (2024, 3, 9, 14));

        let date_only = dates.parse("March 9, 2024", "%B %d, %Y").unwrap();
        assert_eq!(date_only.time(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());

        let time_only = dates.parse("3:45 PM", "%I:%M %p").unwrap();
        assert_eq!((time_only.hour(), time_only.minute()), (15, 45));

        assert!(dates.parse("nonsense", "%Y-%m-%d").is_none());
    }

    #[test]
    fn test_chrono_format_rejects_bad_pattern() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(ChronoDates.format(&date, "%Y/%m/%d"), Some("2024/01/05".to_string()));
        assert_eq!(ChronoDates.format(&date, "%Q"), None);
    }

    #[test]
    fn test_locale_formats_are_tried_first() {
        let services = Services::default().with_locale_date_formats(vec!["%d.%m.%Y".to_string()]);
        assert_eq!(services.date_patterns()[0], "%d.%m.%Y");
        assert!(services.date_patterns().len() > 1);
    }
}
