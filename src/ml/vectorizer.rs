//! TF-IDF vectorizer for normalized comments.
//!
//! The vectorizer is not fitted here. It is loaded from a JSON export of a
//! fitted scikit-learn `TfidfVectorizer` and reproduces its `transform`:
//!
//! ```json
//! {
//!   "vocabulary": {"love": 0, "movi": 1, ":)": 2},
//!   "idf": [1.2, 1.0, 1.7],
//!   "lowercase": true,
//!   "token_pattern": null,
//!   "ngram_range": [1, 1],
//!   "sublinear_tf": false,
//!   "norm": "l2"
//! }
//! ```
//!
//! A `null` token pattern splits on whitespace, which keeps emoticon tokens
//! such as `:)` that the default `(?u)\b\w\w+\b` pattern would drop.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use ahash::AHashMap;
use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SentiscopeError};

/// Default scikit-learn token pattern.
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Row normalization applied after weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized form of a fitted vectorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    /// Term to column index.
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequencies by column. Absent when the vectorizer
    /// was fitted with `use_idf=False`.
    #[serde(default)]
    pub idf: Option<Vec<f64>>,

    #[serde(default = "default_lowercase")]
    pub lowercase: bool,

    #[serde(default = "default_token_pattern")]
    pub token_pattern: Option<String>,

    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    #[serde(default)]
    pub sublinear_tf: bool,

    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

fn default_lowercase() -> bool {
    true
}

fn default_token_pattern() -> Option<String> {
    Some(DEFAULT_TOKEN_PATTERN.to_string())
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

impl VectorizerArtifact {
    /// Artifact with scikit-learn defaults over the given vocabulary.
    pub fn new(vocabulary: HashMap<String, usize>, idf: Option<Vec<f64>>) -> Self {
        VectorizerArtifact {
            vocabulary,
            idf,
            lowercase: default_lowercase(),
            token_pattern: default_token_pattern(),
            ngram_range: default_ngram_range(),
            sublinear_tf: false,
            norm: default_norm(),
        }
    }
}

/// A sparse feature vector with strictly increasing indices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector {
    dimension: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// An all-zero vector.
    pub fn zeros(dimension: usize) -> Self {
        FeatureVector {
            dimension,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build a vector from `(index, value)` pairs. Duplicate indices are
    /// summed; zero entries are dropped.
    pub fn from_pairs<I>(dimension: usize, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut pairs: Vec<(usize, f64)> = pairs.into_iter().collect();
        if let Some(&(index, _)) = pairs.iter().find(|(index, _)| *index >= dimension) {
            return Err(SentiscopeError::model(format!(
                "feature index {index} out of bounds for dimension {dimension}"
            )));
        }
        pairs.sort_by_key(|(index, _)| *index);

        let mut vector = FeatureVector::zeros(dimension);
        for (index, value) in pairs {
            match vector.indices.last() {
                Some(&last) if last == index => {
                    if let Some(slot) = vector.values.last_mut() {
                        *slot += value;
                    }
                }
                _ => {
                    vector.indices.push(index);
                    vector.values.push(value);
                }
            }
        }
        vector.drop_zeros();
        Ok(vector)
    }

    fn drop_zeros(&mut self) {
        let (indices, values): (Vec<usize>, Vec<f64>) = self
            .indices
            .iter()
            .zip(&self.values)
            .filter(|(_, value)| **value != 0.0)
            .map(|(index, value)| (*index, *value))
            .unzip();
        self.indices = indices;
        self.values = values;
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Value at `index`, zero when absent.
    pub fn get(&self, index: usize) -> f64 {
        self.indices
            .binary_search(&index)
            .map(|pos| self.values[pos])
            .unwrap_or(0.0)
    }

    /// Iterate over non-zero entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Dot product with a dense weight row of the same dimension.
    pub fn dot(&self, weights: &[f64]) -> Result<f64> {
        if weights.len() != self.dimension {
            return Err(SentiscopeError::model(format!(
                "dimension mismatch: vector has {}, weights have {}",
                self.dimension,
                weights.len()
            )));
        }
        Ok(self.iter().map(|(index, value)| value * weights[index]).sum())
    }

    /// Euclidean norm.
    pub fn l2_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Dense copy.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dimension];
        for (index, value) in self.iter() {
            dense[index] = value;
        }
        dense
    }
}

/// TF-IDF vectorizer loaded from a fitted artifact.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    vocabulary: AHashMap<String, usize>,
    idf: Option<Vec<f64>>,
    dimension: usize,
    lowercase: bool,
    token_pattern: Option<Regex>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Option<Norm>,
}

impl TfIdfVectorizer {
    /// Validate an artifact and build the vectorizer from it.
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self> {
        let dimension = artifact.vocabulary.len();

        if let Some((term, index)) = artifact
            .vocabulary
            .iter()
            .find(|(_, index)| **index >= dimension)
        {
            return Err(SentiscopeError::model(format!(
                "vocabulary term {term:?} has index {index}, expected < {dimension}"
            )));
        }

        if let Some(len) = artifact
            .idf
            .as_ref()
            .map(Vec::len)
            .filter(|len| *len != dimension)
        {
            return Err(SentiscopeError::model(format!(
                "idf has {len} entries but the vocabulary has {dimension} terms"
            )));
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(SentiscopeError::model(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        let token_pattern = artifact
            .token_pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|e| SentiscopeError::model(format!("invalid token_pattern: {e}")))?;

        Ok(TfIdfVectorizer {
            vocabulary: artifact.vocabulary.into_iter().collect(),
            idf: artifact.idf,
            dimension,
            lowercase: artifact.lowercase,
            token_pattern,
            ngram_range: artifact.ngram_range,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
        })
    }

    /// Load a vectorizer artifact from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SentiscopeError::ArtifactNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read vectorizer {}", path.display()))?;
        let artifact: VectorizerArtifact = serde_json::from_str(&content)?;
        let vectorizer = Self::from_artifact(artifact)?;

        log::info!(
            "Loaded TF-IDF vectorizer from {} ({} terms)",
            path.display(),
            vectorizer.dimension
        );
        Ok(vectorizer)
    }

    /// Number of feature columns.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Column index of a term, if it is in the vocabulary.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    fn tokenize<'t>(&self, text: &'t str) -> Vec<&'t str> {
        match &self.token_pattern {
            // A pattern with a capture group yields the group, not the match.
            Some(pattern) if pattern.captures_len() > 1 => pattern
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str())
                .collect(),
            Some(pattern) => pattern.find_iter(text).map(|m| m.as_str()).collect(),
            None => text.split_whitespace().collect(),
        }
    }

    fn count_terms(&self, tokens: &[&str]) -> AHashMap<usize, f64> {
        let mut counts = AHashMap::new();
        let (min_n, max_n) = self.ngram_range;

        for n in min_n..=max_n {
            for gram in tokens.windows(n) {
                let term: Cow<'_, str> = if n == 1 {
                    Cow::Borrowed(gram[0])
                } else {
                    Cow::Owned(gram.join(" "))
                };
                if let Some(index) = self.index_of(&term) {
                    *counts.entry(index).or_insert(0.0) += 1.0;
                }
            }
        }

        counts
    }

    /// Transform a normalized comment into its TF-IDF feature vector.
    pub fn transform(&self, text: &str) -> Result<FeatureVector> {
        let text = if self.lowercase {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        };

        let tokens = self.tokenize(&text);
        let mut weights: Vec<(usize, f64)> = self.count_terms(&tokens).into_iter().collect();

        for (index, weight) in &mut weights {
            if self.sublinear_tf {
                *weight = 1.0 + weight.ln();
            }
            if let Some(idf) = &self.idf {
                *weight *= idf[*index];
            }
        }

        let scale = match self.norm {
            Some(Norm::L2) => weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            Some(Norm::L1) => weights.iter().map(|(_, w)| w.abs()).sum::<f64>(),
            None => 1.0,
        };
        if scale > 0.0 {
            for (_, weight) in &mut weights {
                *weight /= scale;
            }
        }

        FeatureVector::from_pairs(self.dimension, weights)
    }
}
