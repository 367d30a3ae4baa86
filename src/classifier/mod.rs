//! Supervised sentiment classifiers
//!
//! The [`Classifier`] trait is the capability seam: anything that can fit
//! aligned features/labels and produce a probability distribution over the
//! trained label set plugs into the pipeline. Two implementations ship —
//! multinomial naive Bayes (default) and softmax regression — selected by
//! [`ModelKind`](crate::types::ModelKind) and dispatched through
//! [`SentimentModel`].

pub mod naive_bayes;
pub mod softmax;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};
use crate::types::{ModelKind, Prediction, Sentiment, SentimentConfig};

pub use naive_bayes::MultinomialNb;
pub use softmax::SoftmaxRegression;

/// The capability set every sentiment classifier satisfies.
pub trait Classifier {
    /// Fit the model on aligned feature vectors and labels.
    fn fit(&mut self, features: &[Vec<f64>], labels: &[Sentiment]) -> Result<()>;

    /// The trained label set, sorted (lexicographic on label name).
    fn labels(&self) -> &[Sentiment];

    /// Probability per trained label for one feature vector, aligned with
    /// [`labels`](Self::labels) and summing to 1.0 within 1e-6.
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>>;

    /// Predict the label with the highest probability.
    ///
    /// Ties resolve to the first label in sorted label-set order, which is
    /// the lexicographically smallest name — fixed between training and
    /// serving.
    fn predict(&self, features: &[f64]) -> Result<Prediction> {
        let probs = self.predict_proba(features)?;
        let (idx, confidence) = argmax(&probs).ok_or(SentimentError::Shape {
            expected: 1,
            actual: 0,
        })?;
        Ok(Prediction {
            label: self.labels()[idx],
            confidence,
        })
    }
}

/// Index and value of the maximum entry; first occurrence wins on ties.
fn argmax(values: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &value) in values.iter().enumerate() {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((idx, value)),
        }
    }
    best
}

/// Collect the sorted, deduplicated label set observed in training data.
pub(crate) fn observed_labels(labels: &[Sentiment]) -> Vec<Sentiment> {
    let mut set: Vec<Sentiment> = labels.to_vec();
    set.sort();
    set.dedup();
    set
}

/// Validate aligned fit inputs, returning the feature dimensionality.
pub(crate) fn check_fit_inputs(features: &[Vec<f64>], labels: &[Sentiment]) -> Result<usize> {
    if features.len() != labels.len() {
        return Err(SentimentError::Shape {
            expected: features.len(),
            actual: labels.len(),
        });
    }
    if features.is_empty() {
        return Err(SentimentError::EmptyCorpus);
    }
    let n_features = features[0].len();
    for row in features {
        if row.len() != n_features {
            return Err(SentimentError::Shape {
                expected: n_features,
                actual: row.len(),
            });
        }
    }
    Ok(n_features)
}

/// Numerically stable softmax of raw scores, in place.
pub(crate) fn softmax_in_place(scores: &mut [f64]) {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for score in scores.iter_mut() {
        *score = (*score - max).exp();
        sum += *score;
    }
    if sum > 0.0 {
        for score in scores.iter_mut() {
            *score /= sum;
        }
    }
}

/// Serializable dispatch over the shipped classifier implementations.
///
/// The artifact stores this enum whole, so a loaded pipeline runs exactly the
/// model kind it was trained with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SentimentModel {
    NaiveBayes(MultinomialNb),
    Softmax(SoftmaxRegression),
}

impl SentimentModel {
    /// Build an untrained model per the configured [`ModelKind`].
    pub fn from_config(config: &SentimentConfig) -> Self {
        match config.model {
            ModelKind::NaiveBayes => SentimentModel::NaiveBayes(MultinomialNb::new(config.alpha)),
            ModelKind::Softmax => SentimentModel::Softmax(SoftmaxRegression::new(
                config.learning_rate,
                config.max_epochs,
                config.l2_penalty,
            )),
        }
    }
}

impl Classifier for SentimentModel {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[Sentiment]) -> Result<()> {
        match self {
            SentimentModel::NaiveBayes(model) => model.fit(features, labels),
            SentimentModel::Softmax(model) => model.fit(features, labels),
        }
    }

    fn labels(&self) -> &[Sentiment] {
        match self {
            SentimentModel::NaiveBayes(model) => model.labels(),
            SentimentModel::Softmax(model) => model.labels(),
        }
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        match self {
            SentimentModel::NaiveBayes(model) => model.predict_proba(features),
            SentimentModel::Softmax(model) => model.predict_proba(features),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_first_wins_on_tie() {
        assert_eq!(argmax(&[0.4, 0.4, 0.2]), Some((0, 0.4)));
        assert_eq!(argmax(&[0.1, 0.6, 0.3]), Some((1, 0.6)));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_observed_labels_sorted_and_deduped() {
        let labels = vec![
            Sentiment::Positive,
            Sentiment::Negative,
            Sentiment::Positive,
            Sentiment::Neutral,
        ];
        assert_eq!(
            observed_labels(&labels),
            vec![Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive]
        );
    }

    #[test]
    fn test_check_fit_inputs_rejects_misaligned_rows() {
        let features = vec![vec![1.0, 0.0], vec![0.0]];
        let labels = vec![Sentiment::Positive, Sentiment::Negative];
        assert!(matches!(
            check_fit_inputs(&features, &labels),
            Err(SentimentError::Shape { .. })
        ));
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let mut scores = vec![-2.0, 0.5, 3.0];
        softmax_in_place(&mut scores);
        let sum: f64 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(scores.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn test_model_serde_roundtrip_tags_kind() {
        let model = SentimentModel::NaiveBayes(MultinomialNb::new(1.0));
        let json = serde_json::to_string(&model).unwrap();
        assert!(json.contains("\"kind\":\"naive_bayes\""));
        let back: SentimentModel = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, SentimentModel::NaiveBayes(_)));
    }
}
