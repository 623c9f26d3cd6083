//! Char filter implementations for text normalization.
//!
//! Char filters rewrite the comment text before it is tokenized.
//!
//! # Available Filters
//!
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//!   (tag stripping, non-word run collapsing)
//! - [`lowercase::LowercaseCharFilter`] - Full Unicode lowercasing
//!
//! # Examples
//!
//! ```
//! use sentiscope::analysis::char_filter::CharFilter;
//! use sentiscope::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
//!
//! let filter = PatternReplaceCharFilter::html_tags();
//! assert_eq!(filter.filter("<i>so</i> good"), "so good");
//! ```

use serde::{Deserialize, Serialize};

/// Trait for character filters that transform text before tokenization.
///
/// Char filters cannot fail: every input string maps to an output string.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

/// Which characters count as word characters when collapsing non-word runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordChars {
    /// ASCII letters, digits and underscore.
    #[default]
    Ascii,
    /// Unicode letters, marks, digits and connector punctuation.
    Unicode,
}

pub mod lowercase;
pub mod pattern_replace;
