//! Prediction result types.

use std::fmt;

use serde::{Serialize, Serializer};

/// Sentiment class predicted for a comment.
///
/// The pretrained classifier emits integer classes `0`, `1` and `2`. Any
/// other value is kept as [`Sentiment::Unknown`] rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
    Unknown(i64),
}

impl Sentiment {
    pub fn from_class(class: i64) -> Self {
        match class {
            0 => Sentiment::Negative,
            1 => Sentiment::Neutral,
            2 => Sentiment::Positive,
            other => Sentiment::Unknown(other),
        }
    }

    /// The classifier output this sentiment came from.
    pub fn class(&self) -> i64 {
        match self {
            Sentiment::Negative => 0,
            Sentiment::Neutral => 1,
            Sentiment::Positive => 2,
            Sentiment::Unknown(class) => *class,
        }
    }

    /// Short machine-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Positive => "positive",
            Sentiment::Unknown(_) => "unknown",
        }
    }

    /// Message shown to the person who wrote the comment.
    pub fn message(&self) -> &'static str {
        match self {
            Sentiment::Negative => "\u{2639}\u{fe0f} Negative comment!",
            Sentiment::Neutral => "\u{1f610} Neutral comment!",
            Sentiment::Positive => "\u{1f60a} Positive comment!",
            Sentiment::Unknown(_) => "\u{26a0}\u{fe0f} Unknown sentiment!",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Sentiment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Outcome of classifying one comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Raw class emitted by the classifier.
    pub class: i64,
    pub sentiment: Sentiment,
    pub message: String,
    /// The normalized text that was vectorized.
    pub normalized: String,
    /// Raw decision scores, one per coefficient row.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scores: Vec<f64>,
}

impl Prediction {
    pub fn new(class: i64, normalized: String) -> Self {
        let sentiment = Sentiment::from_class(class);
        Prediction {
            class,
            sentiment,
            message: sentiment.message().to_string(),
            normalized,
            scores: Vec::new(),
        }
    }

    /// Attach the decision scores that produced this prediction.
    pub fn with_scores(mut self, scores: Vec<f64>) -> Self {
        self.scores = scores;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_class() {
        assert_eq!(Sentiment::from_class(0), Sentiment::Negative);
        assert_eq!(Sentiment::from_class(1), Sentiment::Neutral);
        assert_eq!(Sentiment::from_class(2), Sentiment::Positive);
        assert_eq!(Sentiment::from_class(7), Sentiment::Unknown(7));
        assert_eq!(Sentiment::from_class(-1).class(), -1);
    }

    #[test]
    fn test_messages() {
        assert_eq!(Sentiment::Positive.to_string(), "😊 Positive comment!");
        assert_eq!(Sentiment::Neutral.to_string(), "😐 Neutral comment!");
        assert_eq!(Sentiment::Negative.to_string(), "☹️ Negative comment!");
        assert_eq!(Sentiment::Unknown(3).to_string(), "⚠️ Unknown sentiment!");
    }

    #[test]
    fn test_prediction_json() {
        let prediction = Prediction::new(2, "love :)".to_string());
        let json = serde_json::to_value(&prediction).unwrap();

        assert_eq!(json["class"], 2);
        assert_eq!(json["sentiment"], "positive");
        assert_eq!(json["message"], "😊 Positive comment!");
        assert_eq!(json["normalized"], "love :)");
        assert!(json.get("scores").is_none());

        let scored = prediction.with_scores(vec![-0.5, 1.5]);
        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["scores"][1], 1.5);
    }
}
