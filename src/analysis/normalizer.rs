//! Comment normalizer.
//!
//! [`CommentNormalizer`] turns a raw comment into the space-joined token
//! string the TF-IDF vocabulary was built from. The order of the stages is
//! fixed:
//!
//! ```text
//! raw text
//!   -> strip tags            <[^>]*>  removed
//!   -> capture emoticons     :-) ;D =( ... kept aside, in order
//!   -> lowercase
//!   -> collapse non-word runs into one space
//!   -> append emoticon tail  noses removed, no space before the tail
//!   -> whitespace tokenize
//!   -> drop stopwords
//!   -> Porter stem
//!   -> join with " "
//! ```
//!
//! The tail is glued to the flattened text without a separator. When the
//! text does not end in a non-word character, the last word and the first
//! emoticon fuse into one token (`"great :D"` becomes `"great d:D"` before
//! tokenizing). The pretrained vocabulary contains those fused tokens, so
//! the join is kept as is.
//!
//! Normalizing is not idempotent: `"Great :D"` gives `"great d:d"`, but
//! normalizing that again gives `"great"`, since the lowercased `:d` is no
//! longer an emoticon and `d` is a stopword.
//!
//! Normalization is total and does not allocate shared state: a single
//! normalizer can be used from any number of threads.
//!
//! # Examples
//!
//! ```
//! use sentiscope::analysis::normalizer::CommentNormalizer;
//!
//! let normalizer = CommentNormalizer::new();
//! assert_eq!(normalizer.normalize("<b>Hello</b> World"), "hello world");
//! assert_eq!(normalizer.normalize("I love this!! :)"), "love :)");
//! assert_eq!(normalizer.normalize("THE THE THE"), "");
//! ```

use std::sync::Arc;

use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::char_filter::{CharFilter, WordChars};
use crate::analysis::emoticon::EmoticonPattern;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::stem::{PorterStemmer, StemFilter, Stemmer};
use crate::analysis::token_filter::stop::{StopFilter, StopwordSet};
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
use crate::config::NormalizerConfig;
use crate::error::Result;

/// The comment normalization pipeline.
#[derive(Clone, Debug)]
pub struct CommentNormalizer {
    tag_filter: PatternReplaceCharFilter,
    emoticons: EmoticonPattern,
    lowercase: LowercaseCharFilter,
    non_word_filter: PatternReplaceCharFilter,
    emoticon_separator: String,
    tokenizer: WhitespaceTokenizer,
    stop_filter: StopFilter,
    stem_filter: StemFilter,
}

impl CommentNormalizer {
    /// Normalizer with NLTK English stopwords, ASCII word characters, the
    /// NLTK Porter stemmer and no separator before or inside the emoticon
    /// tail.
    pub fn new() -> Self {
        CommentNormalizer {
            tag_filter: PatternReplaceCharFilter::html_tags(),
            emoticons: EmoticonPattern::new(),
            lowercase: LowercaseCharFilter::new(),
            non_word_filter: PatternReplaceCharFilter::non_word_runs(WordChars::Ascii),
            emoticon_separator: String::new(),
            tokenizer: WhitespaceTokenizer::new(),
            stop_filter: StopFilter::new(),
            stem_filter: StemFilter::new(),
        }
    }

    /// Build a normalizer from configuration, loading the stopword corpus
    /// from disk when one is configured.
    pub fn from_config(config: &NormalizerConfig) -> Result<Self> {
        let stop_words = match &config.stopwords_path {
            Some(path) => Arc::new(StopwordSet::from_path(path)?),
            None => StopwordSet::english(),
        };

        let normalizer = Self::new()
            .with_stop_words(stop_words)
            .with_word_chars(config.word_chars)
            .with_emoticon_separator(config.emoticon_separator.clone())
            .with_stemmer(Arc::new(PorterStemmer::with_mode(config.stemmer)));

        log::debug!(
            "Building normalizer: {} stopwords, emoticons {}, non-word runs {}, {:?} stemmer",
            normalizer.stop_words().len(),
            normalizer.emoticons.pattern(),
            normalizer.non_word_filter.pattern(),
            config.stemmer
        );
        Ok(normalizer)
    }

    /// Use a different stopword set.
    pub fn with_stop_words(mut self, stop_words: Arc<StopwordSet>) -> Self {
        self.stop_filter = StopFilter::with_stop_words(stop_words);
        self
    }

    /// Choose which characters survive the non-word collapsing step.
    pub fn with_word_chars(mut self, word_chars: WordChars) -> Self {
        self.non_word_filter = PatternReplaceCharFilter::non_word_runs(word_chars);
        self
    }

    /// Set the string placed between consecutive emoticons in the tail.
    pub fn with_emoticon_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.emoticon_separator = separator.into();
        self
    }

    /// Use a different stemmer.
    pub fn with_stemmer(mut self, stemmer: Arc<dyn Stemmer>) -> Self {
        self.stem_filter = StemFilter::with_stemmer(stemmer);
        self
    }

    /// The stopword set in use.
    pub fn stop_words(&self) -> &StopwordSet {
        self.stop_filter.stop_words()
    }

    /// Flattened text with the emoticon tail appended, before tokenizing.
    pub fn flatten(&self, text: &str) -> String {
        let stripped = self.tag_filter.filter(text);
        let tail = self.emoticons.tail(&stripped, &self.emoticon_separator);

        let mut flattened = self
            .non_word_filter
            .filter(&self.lowercase.filter(&stripped));
        flattened.push_str(&tail);
        flattened
    }

    /// Run the whole pipeline and return the surviving stemmed tokens.
    pub fn analyze(&self, text: &str) -> TokenStream {
        let flattened = self.flatten(text);
        let tokens = self.tokenizer.tokenize(&flattened);
        let tokens = self.stop_filter.filter(tokens);
        self.stem_filter.filter(tokens)
    }

    /// Normalize a comment. Never fails; returns an empty string when no
    /// token survives.
    pub fn normalize(&self, text: &str) -> String {
        self.analyze(text)
            .map(|token| token.text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for CommentNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token_filter::stem::PorterMode;

    #[test]
    fn test_empty_input() {
        let normalizer = CommentNormalizer::new();
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("   \n\t"), "");
    }

    #[test]
    fn test_tags_stripped_before_tokenizing() {
        let normalizer = CommentNormalizer::new();
        assert_eq!(normalizer.normalize("<b>Hello</b> World"), "hello world");
        assert_eq!(normalizer.normalize("<br/><p class=\"x\">"), "");
    }

    #[test]
    fn test_flatten_keeps_tail_glued() {
        let normalizer = CommentNormalizer::new();
        assert_eq!(normalizer.flatten("I love this!! :)"), "i love this :)");
        assert_eq!(normalizer.flatten("Great :D"), "great d:D");
        assert_eq!(normalizer.flatten("fun :-) :P"), "fun p:):P");
        assert_eq!(normalizer.flatten("fun :-) :P!"), "fun p :):P");
        assert_eq!(normalizer.flatten("no faces"), "no faces");
    }

    #[test]
    fn test_emoticons_preserved() {
        let normalizer = CommentNormalizer::new();
        assert_eq!(normalizer.normalize("I love this!! :)"), "love :)");
        assert_eq!(normalizer.normalize(":)"), ":)");
        // a letter mouth survives flattening and fuses with its own tail
        assert_eq!(normalizer.normalize(";-D"), "d;d");
        assert_eq!(normalizer.normalize("Great :D"), "great d:d");
    }

    #[test]
    fn test_not_idempotent() {
        let normalizer = CommentNormalizer::new();
        let once = normalizer.normalize("Great :D");
        assert_eq!(once, "great d:d");
        assert_eq!(normalizer.normalize(&once), "great");
    }

    #[test]
    fn test_emoticon_inside_tag_is_dropped() {
        let normalizer = CommentNormalizer::new();
        assert_eq!(normalizer.normalize("<span title=':)'>ok</span> fine"), "ok fine");
    }

    #[test]
    fn test_emoticon_separator() {
        let normalizer = CommentNormalizer::new().with_emoticon_separator(" ");
        assert_eq!(normalizer.normalize("Great movie :-) :D"), "great movi d:) :d");

        let joined = CommentNormalizer::new();
        assert_eq!(joined.normalize("Great movie :-) :D"), "great movi d:):d");
    }

    #[test]
    fn test_stopwords_only() {
        let normalizer = CommentNormalizer::new();
        assert_eq!(normalizer.normalize("THE THE THE"), "");
        assert_eq!(normalizer.normalize("I'm"), "");
    }

    #[test]
    fn test_custom_stop_words() {
        let normalizer = CommentNormalizer::new()
            .with_stop_words(Arc::new(StopwordSet::from_words(["movie"])));
        assert_eq!(normalizer.normalize("the movie"), "the");
    }

    #[test]
    fn test_word_chars() {
        let ascii = CommentNormalizer::new();
        assert_eq!(ascii.normalize("Café"), "caf");

        let unicode = CommentNormalizer::new().with_word_chars(WordChars::Unicode);
        assert_eq!(unicode.normalize("Café"), "café");
    }

    #[test]
    fn test_original_stemmer() {
        let normalizer = CommentNormalizer::new()
            .with_stemmer(Arc::new(PorterStemmer::with_mode(PorterMode::Original)));
        assert_eq!(normalizer.normalize("dies"), "di");
        assert_eq!(CommentNormalizer::new().normalize("dies"), "die");
    }

    #[test]
    fn test_from_config() {
        let config = NormalizerConfig {
            emoticon_separator: " ".to_string(),
            ..NormalizerConfig::default()
        };
        let normalizer = CommentNormalizer::from_config(&config).unwrap();
        assert_eq!(normalizer.normalize(":) :("), ":) :(");
        assert_eq!(normalizer.stop_words().len(), 179);
    }

    #[test]
    fn test_from_config_missing_stopwords() {
        let config = NormalizerConfig {
            stopwords_path: Some("/nonexistent/english".into()),
            ..NormalizerConfig::default()
        };
        assert!(CommentNormalizer::from_config(&config).is_err());
    }

    #[test]
    fn test_shared_across_threads() {
        let normalizer = Arc::new(CommentNormalizer::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let normalizer = Arc::clone(&normalizer);
                std::thread::spawn(move || normalizer.normalize("Loving it :-)"))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "love :)");
        }
    }
}
