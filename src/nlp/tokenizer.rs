//! Unicode-aware tokenization
//!
//! Splits raw text into lowercase alphabetic tokens. Punctuation, digits,
//! emoji, and whitespace act as delimiters and never survive into tokens.

/// A tokenizer producing lowercase alphabetic tokens within length bounds.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Minimum token length (in characters)
    min_token_len: usize,
    /// Maximum token length (in characters)
    max_token_len: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            min_token_len: 2,
            max_token_len: 40,
        }
    }
}

impl Tokenizer {
    /// Create a tokenizer with default length bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum token length.
    pub fn with_min_len(mut self, len: usize) -> Self {
        self.min_token_len = len;
        self
    }

    /// Set the maximum token length.
    pub fn with_max_len(mut self, len: usize) -> Self {
        self.max_token_len = len;
        self
    }

    /// Tokenize text into lowercase alphabetic tokens.
    ///
    /// Any run of non-alphabetic characters is a delimiter, so digits and
    /// punctuation are stripped and mixed tokens like "xyz123" split into
    /// their alphabetic runs.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphabetic())
            .filter(|token| {
                let len = token.chars().count();
                len >= self.min_token_len && len <= self.max_token_len
            })
            .map(|token| token.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("Barang BAGUS, pengiriman cepat!!!");
        assert_eq!(tokens, vec!["barang", "bagus", "pengiriman", "cepat"]);
    }

    #[test]
    fn test_strips_digits_and_emoji() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("mantap 100% 👍 rate5bintang");
        assert_eq!(tokens, vec!["mantap", "rate", "bintang"]);
    }

    #[test]
    fn test_length_bounds() {
        let tokenizer = Tokenizer::new().with_min_len(3);
        let tokens = tokenizer.tokenize("ok ya bagus");
        assert_eq!(tokens, vec!["bagus"]);
    }

    #[test]
    fn test_empty_and_symbol_only_input() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("1234 !!! ???").is_empty());
    }

    #[test]
    fn test_unicode_words_survive() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("kualitas öké");
        assert_eq!(tokens, vec!["kualitas", "öké"]);
    }
}
