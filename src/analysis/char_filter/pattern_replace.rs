use regex::Regex;

use super::{CharFilter, WordChars};
use crate::error::{Result, SentiscopeError};

/// Matches an angle bracket, any run of non-`>` characters, and a closing
/// angle bracket.
const HTML_TAG_PATTERN: &str = r"<[^>]*>";

const ASCII_NON_WORD_PATTERN: &str = r"[^A-Za-z0-9_]+";

const UNICODE_NON_WORD_PATTERN: &str = r"\W+";

/// A char filter that replaces every match of a regex pattern.
#[derive(Clone, Debug)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)
                .map_err(|e| SentiscopeError::analysis(format!("Invalid regex pattern: {e}")))?,
            replacement: replacement.to_string(),
        })
    }

    /// Filter that deletes HTML-like tags.
    pub fn html_tags() -> Self {
        Self::from_constant(HTML_TAG_PATTERN, "")
    }

    /// Filter that collapses each maximal run of non-word characters into a
    /// single space.
    pub fn non_word_runs(word_chars: WordChars) -> Self {
        let pattern = match word_chars {
            WordChars::Ascii => ASCII_NON_WORD_PATTERN,
            WordChars::Unicode => UNICODE_NON_WORD_PATTERN,
        };
        Self::from_constant(pattern, " ")
    }

    fn from_constant(pattern: &'static str, replacement: &str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("constant pattern is valid"),
            replacement: replacement.to_string(),
        }
    }

    /// Get the regex pattern used by this filter.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        // NoExpand: the replacement is literal text, `$` has no meaning here
        self.pattern
            .replace_all(input, regex::NoExpand(&self.replacement))
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_replace() {
        let filter = PatternReplaceCharFilter::new(r"(\d+)", "NUM").unwrap();
        assert_eq!(filter.filter("Year 2024"), "Year NUM");
    }

    #[test]
    fn test_replacement_is_literal() {
        let filter = PatternReplaceCharFilter::new(r"\d+", "$1").unwrap();
        assert_eq!(filter.filter("a1b"), "a$1b");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PatternReplaceCharFilter::new(r"(unclosed", "").is_err());
    }

    #[test]
    fn test_html_tags_shortest_match() {
        let filter = PatternReplaceCharFilter::html_tags();
        assert_eq!(filter.filter("<b>Hello</b> World"), "Hello World");
        assert_eq!(filter.filter("a <<b> c"), "a  c");
        assert_eq!(filter.filter("1 < 2 > 0"), "1  0");
        assert_eq!(filter.filter("no closing <tag"), "no closing <tag");
        assert_eq!(filter.filter("<br/><p>"), "");
    }

    #[test]
    fn test_non_word_runs_ascii() {
        let filter = PatternReplaceCharFilter::non_word_runs(WordChars::Ascii);
        assert_eq!(filter.filter("i love this!! :)"), "i love this ");
        assert_eq!(filter.filter("snake_case, 42..."), "snake_case 42 ");
        assert_eq!(filter.filter("café"), "caf ");
    }

    #[test]
    fn test_non_word_runs_unicode() {
        let filter = PatternReplaceCharFilter::non_word_runs(WordChars::Unicode);
        assert_eq!(filter.filter("café -- naïve"), "café naïve");
    }
}
