//! # Sentiscope
//!
//! Comment normalization and sentiment classification for Rust.
//!
//! ## Features
//!
//! - Deterministic comment normalization (tag stripping, emoticon
//!   preservation, stopword removal, Porter stemming)
//! - TF-IDF vectorization and linear classification from JSON artifacts
//! - Command line interface and HTTP API

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod ml;
pub mod server;

pub mod prelude {
    pub use crate::analysis::normalizer::CommentNormalizer;
    pub use crate::config::SentiscopeConfig;
    pub use crate::error::{Result, SentiscopeError};
    pub use crate::ml::model::SentimentModel;
    pub use crate::ml::types::{Prediction, Sentiment};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
