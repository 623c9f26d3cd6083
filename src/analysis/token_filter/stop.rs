//! Stopword set and stop filter.
//!
//! The default set is the NLTK English stopword corpus, so that the filter
//! drops exactly the tokens the pretrained vocabulary never saw. A different
//! corpus can be loaded from a file in the NLTK format: one word per line.
//!
//! # Examples
//!
//! ```
//! use sentiscope::analysis::token_filter::Filter;
//! use sentiscope::analysis::token_filter::stop::StopFilter;
//! use sentiscope::analysis::token::Token;
//!
//! let filter = StopFilter::new(); // NLTK English stopwords
//! let tokens = vec![
//!     Token::new("i", 0),
//!     Token::new("love", 1),
//!     Token::new("this", 2)
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).collect();
//!
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].text, "love");
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::{Arc, LazyLock};

use ahash::AHashSet;
use anyhow::Context;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{Result, SentiscopeError};

/// NLTK English stopword corpus.
const NLTK_ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static NLTK_ENGLISH: LazyLock<Arc<StopwordSet>> = LazyLock::new(|| {
    Arc::new(StopwordSet::from_words(
        NLTK_ENGLISH_STOP_WORDS.iter().copied(),
    ))
});

/// An immutable set of stopwords.
///
/// Membership is an exact, case-sensitive comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: AHashSet<String>,
}

impl StopwordSet {
    /// The built-in NLTK English stopword set, shared process-wide.
    pub fn english() -> Arc<StopwordSet> {
        Arc::clone(&NLTK_ENGLISH)
    }

    /// Build a set from a list of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopwordSet {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Read a stopword corpus with one word per line. Surrounding whitespace
    /// is trimmed and blank lines are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut words = AHashSet::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                words.insert(word.to_string());
            }
        }

        if words.is_empty() {
            return Err(SentiscopeError::analysis("stopword corpus is empty"));
        }

        Ok(StopwordSet { words })
    }

    /// Load a stopword corpus file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open stopword corpus {}", path.display()))?;
        let set = Self::from_reader(file)?;
        log::debug!("Loaded {} stopwords from {}", set.len(), path.display());
        Ok(set)
    }

    /// Check if a word is a stopword.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Get the number of stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// A filter that removes stopwords from the token stream.
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: Arc<StopwordSet>,
}

impl StopFilter {
    /// Create a new stop filter with the NLTK English stopwords.
    pub fn new() -> Self {
        Self::with_stop_words(StopwordSet::english())
    }

    /// Create a new stop filter over a shared stopword set.
    pub fn with_stop_words(stop_words: Arc<StopwordSet>) -> Self {
        StopFilter { stop_words }
    }

    /// Create a new stop filter from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_stop_words(Arc::new(StopwordSet::from_words(words)))
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// The stopword set this filter consults.
    pub fn stop_words(&self) -> &StopwordSet {
        &self.stop_words
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        let kept: Vec<Token> = tokens
            .filter(|token| !self.is_stop_word(&token.text))
            .collect();

        Box::new(kept.into_iter())
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_stop_filter() {
        let filter = StopFilter::from_words(vec!["the", "and", "or"]);
        let tokens = vec![
            Token::new("hello", 0),
            Token::new("the", 1),
            Token::new("world", 2),
            Token::new("and", 3),
            Token::new("test", 4),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "hello");
        assert_eq!(result[1].text, "world");
        assert_eq!(result[2].text, "test");
    }

    #[test]
    fn test_english_set() {
        let set = StopwordSet::english();
        assert_eq!(set.len(), 179);
        for word in ["i", "the", "this", "don't", "wouldn't", "d", "ll"] {
            assert!(set.contains(word), "{word} should be a stopword");
        }
        for word in ["love", "movie", ":)", "The", "THE"] {
            assert!(!set.contains(word), "{word} should not be a stopword");
        }
    }

    #[test]
    fn test_from_reader() {
        let corpus = "the\n  and \n\nof\n";
        let set = StopwordSet::from_reader(corpus.as_bytes()).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("and"));
    }

    #[test]
    fn test_from_reader_empty() {
        let err = StopwordSet::from_reader("\n\n".as_bytes()).unwrap_err();
        assert!(matches!(err, SentiscopeError::Analysis(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "foo").unwrap();
        writeln!(file, "bar").unwrap();

        let set = StopwordSet::from_path(file.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("foo"));
    }

    #[test]
    fn test_from_missing_path() {
        let err = StopwordSet::from_path("/nonexistent/stopwords/english").unwrap_err();
        assert!(err.to_string().contains("failed to open stopword corpus"));
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(StopFilter::new().name(), "stop");
    }
}
