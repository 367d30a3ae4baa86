//! Core types shared across the pipeline
//!
//! This module defines the sentiment label set, review records, predictions,
//! and the pipeline configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A sentiment class.
///
/// The label set is a closed enumeration fixed at training time. Variant
/// declaration order equals the lexicographic order of the label names
/// (`Negative` < `Neutral` < `Positive`); every deterministic tie-break in
/// the crate relies on this single ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    /// Derive a sentiment label from a 1–5 star rating.
    ///
    /// Fixed rule: rating ≥ 4 → Positive, rating == 3 → Neutral,
    /// rating ≤ 2 → Negative.
    pub fn from_rating(rating: u8) -> Self {
        match rating {
            r if r >= 4 => Sentiment::Positive,
            3 => Sentiment::Neutral,
            _ => Sentiment::Negative,
        }
    }

    /// User-facing label name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Positive => "Positive",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single labeled review used as training input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Raw review text. May be empty.
    pub text: String,
    /// Star rating, 1–5.
    pub rating: u8,
    /// Explicit label. When absent, the label is derived from the rating.
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    /// Review date, when the source provides one.
    #[serde(default)]
    pub review_date: Option<NaiveDate>,
}

impl ReviewRecord {
    /// Create a record with a derived label.
    pub fn new(text: impl Into<String>, rating: u8) -> Self {
        Self {
            text: text.into(),
            rating,
            sentiment: None,
            review_date: None,
        }
    }

    /// The effective label: the explicit one if present, otherwise derived
    /// from the rating.
    pub fn resolved_sentiment(&self) -> Sentiment {
        self.sentiment
            .unwrap_or_else(|| Sentiment::from_rating(self.rating))
    }
}

/// One prediction returned to the serving consumer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted sentiment class.
    pub label: Sentiment,
    /// Maximum probability across the label distribution, in [0, 1].
    pub confidence: f64,
}

/// Whether rating==3 reviews participate in training.
///
/// The reference behavior folds them in as a third class; consumers that only
/// operate on Positive/Negative can exclude them instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeutralPolicy {
    /// Train a three-class model (Positive / Neutral / Negative).
    #[default]
    Include,
    /// Drop Neutral records before training; the model never predicts Neutral.
    Exclude,
}

/// Which classifier the pipeline trains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Laplace-smoothed multinomial naive Bayes (default).
    #[default]
    NaiveBayes,
    /// Multiclass logistic regression trained by gradient descent.
    Softmax,
}

impl ModelKind {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "softmax" | "logistic" | "logistic_regression" => ModelKind::Softmax,
            _ => ModelKind::NaiveBayes,
        }
    }
}

impl std::str::FromStr for ModelKind {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(ModelKind::parse(value))
    }
}

/// Token reduction applied during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stemming {
    /// Tokens pass through unchanged.
    #[default]
    None,
    /// Light suffix stripping (Indonesian particles and possessives), applied
    /// to a per-token fixpoint so normalization stays idempotent.
    Light,
}

/// Configuration for training a [`SentimentPipeline`](crate::pipeline::SentimentPipeline).
///
/// All fields are serialized into the artifact so a loaded pipeline rebuilds
/// its normalizer identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Stopword language code (e.g. "en", "id").
    pub language: String,
    /// Whether rating==3 reviews are trained on.
    pub neutral: NeutralPolicy,
    /// Classifier selection.
    pub model: ModelKind,
    /// Stemming strategy.
    pub stemming: Stemming,
    /// Minimum number of documents a token must appear in to enter the
    /// vocabulary.
    pub min_df: usize,
    /// Maximum fraction of documents a token may appear in (1.0 = no cutoff).
    pub max_df: f64,
    /// L2-normalize feature vectors. Off by default: the multinomial model
    /// consumes raw tf-idf mass.
    pub l2_normalize: bool,
    /// Laplace smoothing for the naive Bayes model.
    pub alpha: f64,
    /// Learning rate for the softmax model.
    pub learning_rate: f64,
    /// Gradient-descent epochs for the softmax model.
    pub max_epochs: usize,
    /// L2 weight penalty for the softmax model.
    pub l2_penalty: f64,
    /// Minimum token length kept by the tokenizer.
    pub min_token_len: usize,
    /// Maximum token length kept by the tokenizer.
    pub max_token_len: usize,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            neutral: NeutralPolicy::Include,
            model: ModelKind::NaiveBayes,
            stemming: Stemming::None,
            min_df: 1,
            max_df: 1.0,
            l2_normalize: false,
            alpha: 1.0,
            learning_rate: 0.5,
            max_epochs: 200,
            l2_penalty: 1e-4,
            min_token_len: 2,
            max_token_len: 40,
        }
    }
}

impl SentimentConfig {
    /// Preset for Indonesian product reviews: Indonesian stopwords and light
    /// suffix stemming.
    pub fn indonesian() -> Self {
        Self {
            language: "id".to_string(),
            stemming: Stemming::Light,
            ..Self::default()
        }
    }

    /// Set the stopword language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the neutral-review policy.
    pub fn with_neutral(mut self, neutral: NeutralPolicy) -> Self {
        self.neutral = neutral;
        self
    }

    /// Set the classifier.
    pub fn with_model(mut self, model: ModelKind) -> Self {
        self.model = model;
        self
    }

    /// Set the minimum document frequency.
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    /// Set the maximum document frequency (as a fraction of documents).
    pub fn with_max_df(mut self, max_df: f64) -> Self {
        self.max_df = max_df;
        self
    }
}
