//! Text analysis module for Sentiscope.
//!
//! This module provides the comment normalization pipeline: char filters
//! that rewrite the raw text, emoticon extraction, whitespace tokenization,
//! and the stopword and stemming token filters. [`normalizer::CommentNormalizer`]
//! wires them together in a fixed order.

pub mod char_filter;
pub mod emoticon;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use emoticon::EmoticonPattern;
pub use normalizer::CommentNormalizer;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
