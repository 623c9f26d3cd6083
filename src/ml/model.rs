//! End-to-end sentiment model: normalizer, vectorizer and classifier.

use rayon::prelude::*;

use super::classifier::{LinearClassifier, SentimentClassifier};
use super::types::Prediction;
use super::vectorizer::TfIdfVectorizer;
use crate::analysis::normalizer::CommentNormalizer;
use crate::config::SentiscopeConfig;
use crate::error::{Result, SentiscopeError};

/// Message returned for an empty or whitespace-only comment.
pub const BLANK_COMMENT_MESSAGE: &str = "Please enter some text to analyze.";

/// A loaded sentiment model.
///
/// All parts are read-only after construction, so one model can serve
/// concurrent requests behind an `Arc`.
#[derive(Debug)]
pub struct SentimentModel {
    normalizer: CommentNormalizer,
    vectorizer: TfIdfVectorizer,
    classifier: Box<dyn SentimentClassifier>,
}

impl SentimentModel {
    /// Load the normalizer resources and both artifacts named by `config`.
    pub fn load(config: &SentiscopeConfig) -> Result<Self> {
        let normalizer = CommentNormalizer::from_config(&config.normalizer)?;
        let vectorizer = TfIdfVectorizer::from_path(config.model.vectorizer_path())?;
        let classifier = LinearClassifier::from_path(config.model.classifier_path())?;

        let model = Self::from_parts(normalizer, vectorizer, Box::new(classifier))?;
        log::info!(
            "Sentiment model ready from {}",
            config.model.model_dir.display()
        );
        Ok(model)
    }

    /// Assemble a model from already loaded parts.
    pub fn from_parts(
        normalizer: CommentNormalizer,
        vectorizer: TfIdfVectorizer,
        classifier: Box<dyn SentimentClassifier>,
    ) -> Result<Self> {
        if vectorizer.dimension() != classifier.dimension() {
            return Err(SentiscopeError::model(format!(
                "vectorizer produces {} features but the {} classifier expects {}",
                vectorizer.dimension(),
                classifier.name(),
                classifier.dimension()
            )));
        }

        Ok(SentimentModel {
            normalizer,
            vectorizer,
            classifier,
        })
    }

    pub fn normalizer(&self) -> &CommentNormalizer {
        &self.normalizer
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &dyn SentimentClassifier {
        self.classifier.as_ref()
    }

    /// Normalize a comment without classifying it.
    pub fn normalize(&self, comment: &str) -> String {
        self.normalizer.normalize(comment)
    }

    /// Classify one comment.
    pub fn predict(&self, comment: &str) -> Result<Prediction> {
        if comment.trim().is_empty() {
            return Err(SentiscopeError::invalid_argument(BLANK_COMMENT_MESSAGE));
        }

        let normalized = self.normalizer.normalize(comment);
        let features = self.vectorizer.transform(&normalized)?;
        let scores = self.classifier.predict(&features)?;

        log::debug!(
            "Classified {:?} as {} (scores {:?})",
            normalized,
            scores.predicted,
            scores.scores
        );
        Ok(Prediction::new(scores.predicted, normalized).with_scores(scores.scores))
    }

    /// Classify many comments in parallel. Results keep the input order.
    pub fn predict_batch<S>(&self, comments: &[S]) -> Vec<Result<Prediction>>
    where
        S: AsRef<str> + Sync,
    {
        comments
            .par_iter()
            .map(|comment| self.predict(comment.as_ref()))
            .collect()
    }
}
