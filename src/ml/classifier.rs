//! Sentiment classifiers over TF-IDF feature vectors.

use std::fmt::Debug;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::vectorizer::FeatureVector;
use crate::error::{Result, SentiscopeError};

/// Per-class decision scores and the class they select.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassScores {
    /// Class labels, aligned with `scores` except in the binary case where
    /// a single score decides between the two classes.
    pub classes: Vec<i64>,
    pub scores: Vec<f64>,
    pub predicted: i64,
}

/// Trait for classifiers that map a feature vector to a sentiment class.
pub trait SentimentClassifier: Send + Sync + Debug {
    /// Score a feature vector.
    fn predict(&self, features: &FeatureVector) -> Result<ClassScores>;

    /// The class labels this classifier can emit.
    fn classes(&self) -> &[i64];

    /// Expected feature dimension.
    fn dimension(&self) -> usize;

    /// Get the name of this classifier.
    fn name(&self) -> &'static str;
}

/// Serialized linear model, as exported from scikit-learn's `classes_`,
/// `coef_` and `intercept_`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub classes: Vec<i64>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

/// Linear decision function `coef · x + intercept`.
///
/// Covers logistic regression, linear SVMs and multinomial naive Bayes
/// (whose `feature_log_prob_` and `class_log_prior_` export as `coef` and
/// `intercept`).
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    classes: Vec<i64>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    dimension: usize,
}

impl LinearClassifier {
    /// Validate an artifact and build the classifier from it.
    pub fn from_artifact(artifact: ClassifierArtifact) -> Result<Self> {
        let ClassifierArtifact {
            classes,
            coef,
            intercept,
        } = artifact;

        if classes.len() < 2 {
            return Err(SentiscopeError::model(format!(
                "classifier needs at least two classes, got {}",
                classes.len()
            )));
        }

        let expected_rows = if classes.len() == 2 && coef.len() == 1 {
            1
        } else {
            classes.len()
        };
        if coef.len() != expected_rows {
            return Err(SentiscopeError::model(format!(
                "coef has {} rows for {} classes",
                coef.len(),
                classes.len()
            )));
        }
        if intercept.len() != coef.len() {
            return Err(SentiscopeError::model(format!(
                "intercept has {} entries for {} coef rows",
                intercept.len(),
                coef.len()
            )));
        }

        let dimension = coef[0].len();
        if let Some(row) = coef.iter().position(|row| row.len() != dimension) {
            return Err(SentiscopeError::model(format!(
                "coef row {row} has {} columns, expected {dimension}",
                coef[row].len()
            )));
        }

        Ok(LinearClassifier {
            classes,
            coef,
            intercept,
            dimension,
        })
    }

    /// Load a classifier artifact from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SentiscopeError::ArtifactNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read classifier {}", path.display()))?;
        let artifact: ClassifierArtifact = serde_json::from_str(&content)?;
        let classifier = Self::from_artifact(artifact)?;

        log::info!(
            "Loaded linear classifier from {} ({} classes, {} features)",
            path.display(),
            classifier.classes.len(),
            classifier.dimension
        );
        Ok(classifier)
    }

    /// Raw decision scores, one per coef row.
    pub fn decision_function(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        if features.dimension() != self.dimension {
            return Err(SentiscopeError::model(format!(
                "feature vector has dimension {}, classifier expects {}",
                features.dimension(),
                self.dimension
            )));
        }

        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, bias)| Ok(features.dot(row)? + bias))
            .collect()
    }

    fn select(&self, scores: &[f64]) -> i64 {
        if scores.len() == 1 {
            return if scores[0] > 0.0 {
                self.classes[1]
            } else {
                self.classes[0]
            };
        }

        // First maximum wins on ties.
        let mut best = 0;
        for (index, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = index;
            }
        }
        self.classes[best]
    }
}

impl SentimentClassifier for LinearClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<ClassScores> {
        let scores = self.decision_function(features)?;
        let predicted = self.select(&scores);

        Ok(ClassScores {
            classes: self.classes.clone(),
            scores,
            predicted,
        })
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}
