//! Sentiment prediction on top of the comment normalizer.
//!
//! A pretrained model is two artifacts exported from scikit-learn as JSON:
//! a TF-IDF vectorizer and a linear classifier. [`model::SentimentModel`]
//! wires them behind the normalizer.

pub mod classifier;
pub mod model;
pub mod types;
pub mod vectorizer;

pub use classifier::{ClassScores, ClassifierArtifact, LinearClassifier, SentimentClassifier};
pub use model::SentimentModel;
pub use types::{Prediction, Sentiment};
pub use vectorizer::{FeatureVector, Norm, TfIdfVectorizer, VectorizerArtifact};
