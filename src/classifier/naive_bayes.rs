//! Multinomial naive Bayes
//!
//! Laplace-smoothed multinomial naive Bayes over tf-idf mass, computed in log
//! space for numerical stability. The default classifier: fast to train,
//! strong on short-text sentiment.

use serde::{Deserialize, Serialize};

use crate::classifier::{check_fit_inputs, observed_labels, softmax_in_place, Classifier};
use crate::error::{Result, SentimentError};
use crate::types::Sentiment;

/// Multinomial naive Bayes classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    /// Laplace smoothing constant
    alpha: f64,
    /// Trained label set, sorted
    labels: Vec<Sentiment>,
    /// ln P(class), aligned with `labels`
    class_log_prior: Vec<f64>,
    /// ln P(feature | class), `[class][feature]`
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Create an untrained model with the given smoothing constant.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            labels: Vec::new(),
            class_log_prior: Vec::new(),
            feature_log_prob: Vec::new(),
        }
    }
}

impl Default for MultinomialNb {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Classifier for MultinomialNb {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[Sentiment]) -> Result<()> {
        let n_features = check_fit_inputs(features, labels)?;
        let label_set = observed_labels(labels);
        let n_classes = label_set.len();

        if n_classes < 2 {
            // Degenerate corpus: the model can only ever predict the single
            // observed class.
            #[cfg(feature = "tracing")]
            tracing::warn!(
                classes = n_classes,
                "training corpus has fewer than two classes; predictions degrade to the majority class"
            );
        }

        let class_index = |label: Sentiment| label_set.iter().position(|&l| l == label);

        // Per-class document counts and feature mass.
        let mut doc_counts = vec![0usize; n_classes];
        let mut feature_mass = vec![vec![0.0f64; n_features]; n_classes];
        for (row, &label) in features.iter().zip(labels.iter()) {
            let class = class_index(label).unwrap_or(0);
            doc_counts[class] += 1;
            for (mass, &value) in feature_mass[class].iter_mut().zip(row.iter()) {
                *mass += value;
            }
        }

        let total_docs = features.len() as f64;
        let class_log_prior = doc_counts
            .iter()
            .map(|&count| (count as f64 / total_docs).ln())
            .collect();

        let feature_log_prob = feature_mass
            .iter()
            .map(|mass| {
                let total: f64 = mass.iter().sum();
                let denom = total + self.alpha * n_features as f64;
                mass.iter()
                    .map(|&m| ((m + self.alpha) / denom).ln())
                    .collect()
            })
            .collect();

        self.labels = label_set;
        self.class_log_prior = class_log_prior;
        self.feature_log_prob = feature_log_prob;
        Ok(())
    }

    fn labels(&self) -> &[Sentiment] {
        &self.labels
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        if let Some(first) = self.feature_log_prob.first() {
            if features.len() != first.len() {
                return Err(SentimentError::Shape {
                    expected: first.len(),
                    actual: features.len(),
                });
            }
        }

        let mut scores: Vec<f64> = self
            .labels
            .iter()
            .enumerate()
            .map(|(class, _)| {
                let mut joint = self.class_log_prior[class];
                let log_probs = &self.feature_log_prob[class];
                for (idx, &value) in features.iter().enumerate() {
                    if value != 0.0 {
                        joint += value * log_probs[idx];
                    }
                }
                joint
            })
            .collect();

        softmax_in_place(&mut scores);
        Ok(scores)
    }
}
