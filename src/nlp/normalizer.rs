//! Text normalization
//!
//! [`TextNormalizer`] turns raw review text into a cleaned token string:
//! lowercase, alphabetic tokens only, stopwords removed, optional light
//! stemming. It is a pure function of its configuration — the same input
//! always yields the same output, and normalizing twice equals normalizing
//! once.

use rayon::prelude::*;

use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::Tokenizer;
use crate::types::{SentimentConfig, Stemming};

/// Suffixes stripped by [`Stemming::Light`]: Indonesian particles first, then
/// possessive pronouns, so "barangkupun" reduces through "barangku" to
/// "barang".
const LIGHT_SUFFIXES: &[&str] = &["lah", "kah", "pun", "nya", "ku", "mu"];

/// Deterministic raw-text → cleaned-text transformation.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    tokenizer: Tokenizer,
    stopwords: StopwordFilter,
    stemming: Stemming,
    /// Minimum character count a stemmed token must retain.
    min_stem_len: usize,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::from_config(&SentimentConfig::default())
    }
}

impl TextNormalizer {
    /// Build a normalizer from pipeline configuration.
    pub fn from_config(config: &SentimentConfig) -> Self {
        Self {
            tokenizer: Tokenizer::new()
                .with_min_len(config.min_token_len)
                .with_max_len(config.max_token_len),
            stopwords: StopwordFilter::new(&config.language),
            stemming: config.stemming,
            min_stem_len: config.min_token_len.max(3),
        }
    }

    /// Normalize one text into a cleaned, space-joined token string.
    ///
    /// Never fails: input with no usable text yields the empty string.
    pub fn normalize(&self, raw: &str) -> String {
        let tokens: Vec<String> = self
            .tokenizer
            .tokenize(raw)
            .into_iter()
            .map(|token| self.stem(token))
            .filter(|token| !self.stopwords.is_stopword(token))
            .collect();
        tokens.join(" ")
    }

    /// Normalize a batch of texts in parallel, preserving order.
    pub fn normalize_batch(&self, raws: &[String]) -> Vec<String> {
        raws.par_iter().map(|raw| self.normalize(raw)).collect()
    }

    /// Apply the configured stemming to one token, to a fixpoint.
    ///
    /// Running to a fixpoint is what keeps [`normalize`](Self::normalize)
    /// idempotent: a stemmed token can never be stemmed further on a second
    /// pass.
    fn stem(&self, token: String) -> String {
        match self.stemming {
            Stemming::None => token,
            Stemming::Light => {
                let mut current = token;
                loop {
                    let stripped = LIGHT_SUFFIXES.iter().find_map(|suffix| {
                        let rest = current.strip_suffix(suffix)?;
                        (rest.chars().count() >= self.min_stem_len).then(|| rest.to_string())
                    });
                    match stripped {
                        Some(rest) => current = rest,
                        None => return current,
                    }
                }
            }
        }
    }
}
