//! Softmax regression
//!
//! Multiclass logistic regression trained by full-batch gradient descent with
//! an L2 penalty. Weights start at zero and the update order is fixed, so
//! training is deterministic: the same corpus always yields the same
//! parameters.

use serde::{Deserialize, Serialize};

use crate::classifier::{check_fit_inputs, observed_labels, softmax_in_place, Classifier};
use crate::error::{Result, SentimentError};
use crate::types::Sentiment;

/// Stop early once the mean negative log-likelihood improves by less than
/// this between epochs.
const LOSS_TOLERANCE: f64 = 1e-7;

/// Softmax (multiclass logistic) regression classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxRegression {
    learning_rate: f64,
    max_epochs: usize,
    l2_penalty: f64,
    /// Trained label set, sorted
    labels: Vec<Sentiment>,
    /// Per-class weights, bias in the last slot: `[class][n_features + 1]`
    weights: Vec<Vec<f64>>,
}

impl SoftmaxRegression {
    /// Create an untrained model.
    pub fn new(learning_rate: f64, max_epochs: usize, l2_penalty: f64) -> Self {
        Self {
            learning_rate,
            max_epochs,
            l2_penalty,
            labels: Vec::new(),
            weights: Vec::new(),
        }
    }

    /// Raw class scores (logits) for one feature vector.
    fn scores(&self, features: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .map(|class_weights| {
                let bias = class_weights[class_weights.len() - 1];
                class_weights[..class_weights.len() - 1]
                    .iter()
                    .zip(features.iter())
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
                    + bias
            })
            .collect()
    }
}

impl Default for SoftmaxRegression {
    fn default() -> Self {
        Self::new(0.5, 200, 1e-4)
    }
}

impl Classifier for SoftmaxRegression {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[Sentiment]) -> Result<()> {
        let n_features = check_fit_inputs(features, labels)?;
        let label_set = observed_labels(labels);
        let n_classes = label_set.len();
        let n_samples = features.len() as f64;

        if n_classes < 2 {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                classes = n_classes,
                "training corpus has fewer than two classes; predictions degrade to the majority class"
            );
        }

        let class_of: Vec<usize> = labels
            .iter()
            .map(|label| label_set.iter().position(|l| l == label).unwrap_or(0))
            .collect();

        self.labels = label_set;
        self.weights = vec![vec![0.0; n_features + 1]; n_classes];

        let mut previous_loss = f64::MAX;
        for _epoch in 0..self.max_epochs {
            let mut gradients = vec![vec![0.0; n_features + 1]; n_classes];
            let mut loss = 0.0;

            for (row, &target) in features.iter().zip(class_of.iter()) {
                let mut probs = self.scores(row);
                softmax_in_place(&mut probs);
                loss -= probs[target].max(f64::MIN_POSITIVE).ln();

                for (class, prob) in probs.iter().enumerate() {
                    let error = prob - if class == target { 1.0 } else { 0.0 };
                    let gradient = &mut gradients[class];
                    for (g, &x) in gradient[..n_features].iter_mut().zip(row.iter()) {
                        *g += error * x;
                    }
                    gradient[n_features] += error;
                }
            }

            for (class_weights, gradient) in self.weights.iter_mut().zip(gradients.iter()) {
                for (idx, (w, g)) in class_weights.iter_mut().zip(gradient.iter()).enumerate() {
                    // The bias term is not penalized.
                    let penalty = if idx < n_features {
                        self.l2_penalty * *w
                    } else {
                        0.0
                    };
                    *w -= self.learning_rate * (g / n_samples + penalty);
                }
            }

            let mean_loss = loss / n_samples;
            if previous_loss - mean_loss < LOSS_TOLERANCE {
                break;
            }
            previous_loss = mean_loss;
        }

        Ok(())
    }

    fn labels(&self) -> &[Sentiment] {
        &self.labels
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        if let Some(first) = self.weights.first() {
            if features.len() + 1 != first.len() {
                return Err(SentimentError::Shape {
                    expected: first.len() - 1,
                    actual: features.len(),
                });
            }
        }

        let mut probs = self.scores(features);
        softmax_in_place(&mut probs);
        Ok(probs)
    }
}
