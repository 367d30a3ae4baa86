//! TF-IDF feature extraction
//!
//! Converts cleaned token strings into fixed-dimensional weighted
//! term-frequency vectors. The vocabulary and IDF table are learned once in
//! [`TfIdfVectorizer::fit`] and frozen thereafter; inference-time tokens
//! outside the vocabulary contribute zero.

use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};
use crate::features::vocabulary::Vocabulary;
use crate::types::SentimentConfig;

/// TF-IDF vectorizer with document-frequency cutoffs.
///
/// IDF uses the smoothed form `ln((N + 1) / (df + 1)) + 1`, computed at fit
/// time from the training corpus and frozen for the lifetime of the
/// vectorizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    vocabulary: Vocabulary,
    /// IDF weight per vocabulary index
    idf: Vec<f64>,
    /// Number of training documents the IDF table was computed from
    n_documents: usize,
    min_df: usize,
    max_df: f64,
    l2_normalize: bool,
}

impl TfIdfVectorizer {
    /// Build an unfitted vectorizer from pipeline configuration.
    pub fn from_config(config: &SentimentConfig) -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            idf: Vec::new(),
            n_documents: 0,
            min_df: config.min_df.max(1),
            max_df: config.max_df,
            l2_normalize: config.l2_normalize,
        }
    }

    /// Learn the vocabulary and IDF table from cleaned training texts.
    ///
    /// Vocabulary indices follow lexicographically sorted token order — the
    /// deterministic ordering that makes saved artifacts reproducible.
    ///
    /// Fails with [`SentimentError::EmptyCorpus`] when no text contains a
    /// token, or when the document-frequency cutoffs remove every token.
    pub fn fit(&mut self, cleaned: &[String]) -> Result<()> {
        let n_docs = cleaned.len();
        let has_text = cleaned.iter().any(|text| !text.trim().is_empty());
        if n_docs == 0 || !has_text {
            return Err(SentimentError::EmptyCorpus);
        }

        // Document frequency per token.
        let mut doc_freq: FxHashMap<&str, usize> = FxHashMap::default();
        for text in cleaned {
            let unique: FxHashSet<&str> = text.split_whitespace().collect();
            for token in unique {
                *doc_freq.entry(token).or_insert(0) += 1;
            }
        }

        let max_count = (self.max_df * n_docs as f64).ceil() as usize;
        let mut terms: Vec<&str> = doc_freq
            .iter()
            .filter(|(_, &df)| df >= self.min_df && df <= max_count)
            .map(|(&term, _)| term)
            .collect();
        terms.sort_unstable();

        if terms.is_empty() {
            return Err(SentimentError::EmptyCorpus);
        }

        let idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq[term] as f64;
                ((n_docs as f64 + 1.0) / (df + 1.0)).ln() + 1.0
            })
            .collect();

        self.vocabulary =
            Vocabulary::from_sorted_terms(terms.into_iter().map(str::to_string).collect());
        self.idf = idf;
        self.n_documents = n_docs;
        Ok(())
    }

    /// Transform one cleaned text into a tf×idf feature vector.
    ///
    /// Tokens outside the vocabulary are silently ignored; an input with no
    /// known tokens yields the zero vector. Only an internal dimensional
    /// mismatch can fail, and that is defensive.
    pub fn transform(&self, cleaned: &str) -> Result<Vec<f64>> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(SentimentError::Shape {
                expected: self.vocabulary.len(),
                actual: self.idf.len(),
            });
        }

        let mut vector = vec![0.0; self.vocabulary.len()];
        for token in cleaned.split_whitespace() {
            if let Some(idx) = self.vocabulary.get(token) {
                vector[idx] += 1.0;
            }
        }

        for (value, idf) in vector.iter_mut().zip(self.idf.iter()) {
            *value *= idf;
        }

        if self.l2_normalize {
            let norm: f64 = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for value in vector.iter_mut() {
                    *value /= norm;
                }
            }
        }

        Ok(vector)
    }

    /// Transform a batch of cleaned texts in parallel, preserving order.
    pub fn transform_batch(&self, cleaned: &[String]) -> Result<Vec<Vec<f64>>> {
        cleaned
            .par_iter()
            .map(|text| self.transform(text))
            .collect()
    }

    /// The learned vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "barang bagus pengiriman cepat".to_string(),
            "barang jelek pengiriman lama".to_string(),
            "oke".to_string(),
        ]
    }

    fn fitted() -> TfIdfVectorizer {
        let mut vectorizer = TfIdfVectorizer::from_config(&SentimentConfig::default());
        vectorizer.fit(&corpus()).unwrap();
        vectorizer
    }

    #[test]
    fn test_fit_builds_sorted_vocabulary() {
        let vectorizer = fitted();
        assert_eq!(
            vectorizer.vocabulary().terms(),
            &["bagus", "barang", "cepat", "jelek", "lama", "oke", "pengiriman"]
        );
    }

    #[test]
    fn test_rare_terms_weigh_more_than_common_ones() {
        let vectorizer = fitted();
        let vector = vectorizer.transform("barang jelek").unwrap();
        let barang = vector[vectorizer.vocabulary().get("barang").unwrap()];
        let jelek = vector[vectorizer.vocabulary().get("jelek").unwrap()];
        // "jelek" appears in one document, "barang" in two.
        assert!(jelek > barang);
    }

    #[test]
    fn test_transform_ignores_unseen_tokens() {
        let vectorizer = fitted();
        let known = vectorizer.transform("barang bagus").unwrap();
        let with_unseen = vectorizer.transform("barang bagus asing xyz").unwrap();
        assert_eq!(known, with_unseen);
    }

    #[test]
    fn test_transform_unknown_only_yields_zero_vector() {
        let vectorizer = fitted();
        let vector = vectorizer.transform("kata asing semuanya").unwrap();
        assert!(vector.iter().all(|&v| v == 0.0));
        assert_eq!(vector.len(), vectorizer.vocabulary().len());
    }

    #[test]
    fn test_fit_empty_corpus_fails() {
        let mut vectorizer = TfIdfVectorizer::from_config(&SentimentConfig::default());
        assert!(matches!(
            vectorizer.fit(&[]),
            Err(SentimentError::EmptyCorpus)
        ));

        let all_empty = vec!["".to_string(), "   ".to_string()];
        assert!(matches!(
            vectorizer.fit(&all_empty),
            Err(SentimentError::EmptyCorpus)
        ));
    }

    #[test]
    fn test_min_df_cutoff_can_empty_the_vocabulary() {
        let mut vectorizer =
            TfIdfVectorizer::from_config(&SentimentConfig::default().with_min_df(10));
        assert!(matches!(
            vectorizer.fit(&corpus()),
            Err(SentimentError::EmptyCorpus)
        ));
    }

    #[test]
    fn test_l2_normalization_produces_unit_vectors() {
        let mut config = SentimentConfig::default();
        config.l2_normalize = true;
        let mut vectorizer = TfIdfVectorizer::from_config(&config);
        vectorizer.fit(&corpus()).unwrap();

        let vector = vectorizer.transform("barang bagus cepat").unwrap();
        let norm: f64 = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_transform_batch_matches_single_transforms() {
        let vectorizer = fitted();
        let texts = corpus();
        let batch = vectorizer.transform_batch(&texts).unwrap();
        for (text, row) in texts.iter().zip(&batch) {
            assert_eq!(row, &vectorizer.transform(text).unwrap());
        }
    }
}
