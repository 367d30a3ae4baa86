//! Token vocabulary
//!
//! The token → index mapping learned during training. Indices are assigned in
//! lexicographically sorted token order, which makes saved artifacts
//! reproducible across runs regardless of hash-map iteration order.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Immutable token → dense-index mapping.
///
/// Built once by [`TfIdfVectorizer::fit`](super::TfIdfVectorizer::fit); any
/// token unseen at training time is simply absent and contributes nothing at
/// inference time. The mapping never grows online.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Token -> feature index
    index: FxHashMap<String, u32>,
    /// Feature index -> token (inverse mapping, sorted order)
    terms: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from a lexicographically sorted term list.
    pub(crate) fn from_sorted_terms(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx as u32))
            .collect();
        Self { index, terms }
    }

    /// Look up the feature index of a token.
    pub fn get(&self, token: &str) -> Option<usize> {
        self.index.get(token).map(|&idx| idx as usize)
    }

    /// The terms in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_follows_sorted_order() {
        let vocab = Vocabulary::from_sorted_terms(vec![
            "bagus".to_string(),
            "barang".to_string(),
            "cepat".to_string(),
        ]);

        assert_eq!(vocab.get("bagus"), Some(0));
        assert_eq!(vocab.get("barang"), Some(1));
        assert_eq!(vocab.get("cepat"), Some(2));
        assert_eq!(vocab.get("lama"), None);
        assert_eq!(vocab.len(), 3);
    }

    #[test]
    fn test_serde_roundtrip_preserves_indices() {
        let vocab =
            Vocabulary::from_sorted_terms(vec!["jelek".to_string(), "murah".to_string()]);
        let json = serde_json::to_string(&vocab).unwrap();
        let back: Vocabulary = serde_json::from_str(&json).unwrap();

        assert_eq!(back.get("jelek"), Some(0));
        assert_eq!(back.get("murah"), Some(1));
        assert_eq!(back.terms(), vocab.terms());
    }
}
