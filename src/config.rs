//! Configuration types.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields a working configuration:
//!
//! ```json
//! {
//!   "normalizer": {
//!     "stopwords_path": "/usr/share/nltk_data/corpora/stopwords/english",
//!     "emoticon_separator": "",
//!     "word_chars": "ascii",
//!     "stemmer": "nltk"
//!   },
//!   "model": {
//!     "model_dir": "model",
//!     "vectorizer_file": "tfidf.json",
//!     "classifier_file": "clf.json"
//!   },
//!   "server": { "host": "127.0.0.1", "port": 5000 }
//! }
//! ```

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::analysis::char_filter::WordChars;
use crate::analysis::token_filter::stem::PorterMode;
use crate::error::{Result, SentiscopeError};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentiscopeConfig {
    /// Comment normalization settings.
    pub normalizer: NormalizerConfig,

    /// Model artifact locations.
    pub model: ModelConfig,

    /// HTTP server settings.
    pub server: ServerConfig,
}

impl SentiscopeConfig {
    /// Load configuration from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: SentiscopeConfig = serde_json::from_str(&content).map_err(|e| {
            SentiscopeError::config(format!("invalid config file {}: {e}", path.display()))
        })?;

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from `path` when given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }
}

/// Settings for [`CommentNormalizer`](crate::analysis::CommentNormalizer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Stopword corpus, one word per line. The built-in NLTK English list is
    /// used when unset.
    pub stopwords_path: Option<PathBuf>,

    /// Placed between consecutive emoticons in the appended tail.
    pub emoticon_separator: String,

    /// Characters that survive the non-word collapsing step.
    pub word_chars: WordChars,

    /// Porter stemmer variant.
    pub stemmer: PorterMode,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            stopwords_path: None,
            emoticon_separator: String::new(),
            word_chars: WordChars::Ascii,
            stemmer: PorterMode::Nltk,
        }
    }
}

/// Locations of the pretrained artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub model_dir: PathBuf,
    pub vectorizer_file: String,
    pub classifier_file: String,
}

impl ModelConfig {
    pub fn vectorizer_path(&self) -> PathBuf {
        self.model_dir.join(&self.vectorizer_file)
    }

    pub fn classifier_path(&self) -> PathBuf {
        self.model_dir.join(&self.classifier_file)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            model_dir: PathBuf::from("model"),
            vectorizer_file: "tfidf.json".to_string(),
            classifier_file: "clf.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Parse `host:port` into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                SentiscopeError::config(format!(
                    "invalid listen address {}:{}: {e}",
                    self.host, self.port
                ))
            })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = SentiscopeConfig::default();
        assert_eq!(config.normalizer.emoticon_separator, "");
        assert_eq!(config.normalizer.word_chars, WordChars::Ascii);
        assert_eq!(config.normalizer.stemmer, PorterMode::Nltk);
        assert_eq!(config.model.vectorizer_path(), PathBuf::from("model/tfidf.json"));
        assert_eq!(config.model.classifier_path(), PathBuf::from("model/clf.json"));
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_partial_json() {
        let config: SentiscopeConfig = serde_json::from_str(
            r#"{"normalizer": {"emoticon_separator": " ", "word_chars": "unicode"},
                "server": {"port": 8080}}"#,
        )
        .unwrap();

        assert_eq!(config.normalizer.emoticon_separator, " ");
        assert_eq!(config.normalizer.word_chars, WordChars::Unicode);
        assert_eq!(config.normalizer.stemmer, PorterMode::Nltk);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.model, ModelConfig::default());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"model": {{"model_dir": "/srv/model"}}, "normalizer": {{"stemmer": "original"}}}}"#)
            .unwrap();

        let config = SentiscopeConfig::from_path(file.path()).unwrap();
        assert_eq!(
            config.model.vectorizer_path(),
            PathBuf::from("/srv/model/tfidf.json")
        );
        assert_eq!(config.normalizer.stemmer, PorterMode::Original);
    }

    #[test]
    fn test_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = SentiscopeConfig::from_path(file.path()).unwrap_err();
        assert!(matches!(err, SentiscopeError::Config(_)));
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(SentiscopeConfig::load(None).unwrap(), SentiscopeConfig::default());
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerConfig::default();
        assert_eq!(server.socket_addr().unwrap().port(), 5000);

        let bad = ServerConfig {
            host: "not a host".to_string(),
            port: 1,
        };
        assert!(bad.socket_addr().is_err());
    }
}
