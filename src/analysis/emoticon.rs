//! Emoticon extraction.
//!
//! Emoticons are made of punctuation, so the non-word collapsing step of the
//! normalizer destroys them. [`EmoticonPattern`] captures them beforehand so
//! they can be appended back as a tail of the flattened text.
//!
//! The grammar is fixed: an eye (`:`, `;` or `=`), an optional nose (`-`)
//! and a mouth (`)`, `(`, `D` or `P`). Mouth letters are case-sensitive.
//!
//! # Examples
//!
//! ```
//! use sentiscope::analysis::emoticon::EmoticonPattern;
//!
//! let pattern = EmoticonPattern::new();
//! assert_eq!(pattern.extract("great :-) really ;D"), vec![":-)", ";D"]);
//! assert_eq!(pattern.tail("great :-) really ;D", ""), ":);D");
//! ```

use regex::Regex;

const EMOTICON_PATTERN: &str = r"(?::|;|=)(?:-)?(?:\)|\(|D|P)";

/// Compiled emoticon grammar.
#[derive(Clone, Debug)]
pub struct EmoticonPattern {
    pattern: Regex,
}

impl EmoticonPattern {
    /// Compile the emoticon grammar.
    pub fn new() -> Self {
        EmoticonPattern {
            pattern: Regex::new(EMOTICON_PATTERN).expect("emoticon pattern is valid"),
        }
    }

    /// All non-overlapping emoticons in `text`, left to right, as written.
    pub fn extract<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.pattern.find_iter(text).map(|m| m.as_str()).collect()
    }

    /// The emoticon tail appended after the flattened text: every emoticon
    /// with its nose removed, joined with `separator`.
    pub fn tail(&self, text: &str, separator: &str) -> String {
        self.extract(text)
            .into_iter()
            .map(Self::strip_nose)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Remove every `-` from an emoticon, so `:-)` becomes `:)`.
    pub fn strip_nose(emoticon: &str) -> String {
        emoticon.replace('-', "")
    }

    /// Get the regex pattern source.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for EmoticonPattern {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_in_order() {
        let pattern = EmoticonPattern::new();
        assert_eq!(
            pattern.extract("=( at first, then :) and finally ;-P"),
            vec!["=(", ":)", ";-P"]
        );
    }

    #[test]
    fn test_extract_none() {
        let pattern = EmoticonPattern::new();
        assert!(pattern.extract("no faces here: really (none)").is_empty());
        assert!(pattern.extract("").is_empty());
    }

    #[test]
    fn test_mouth_is_case_sensitive() {
        let pattern = EmoticonPattern::new();
        assert!(pattern.extract(":d :p").is_empty());
        assert_eq!(pattern.extract(":D :P"), vec![":D", ":P"]);
    }

    #[test]
    fn test_non_overlapping() {
        let pattern = EmoticonPattern::new();
        // ":):)" holds two faces; ":-:)" holds one since "-:" is no mouth
        assert_eq!(pattern.extract(":):)"), vec![":)", ":)"]);
        assert_eq!(pattern.extract(":-:)"), vec![":)"]);
    }

    #[test]
    fn test_tail_separator() {
        let pattern = EmoticonPattern::new();
        assert_eq!(pattern.tail(":-) x =D", ""), ":)=D");
        assert_eq!(pattern.tail(":-) x =D", " "), ":) =D");
        assert_eq!(pattern.tail("plain", " "), "");
    }
}
