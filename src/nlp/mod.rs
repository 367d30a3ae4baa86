//! Natural Language Processing components
//!
//! This module provides tokenization, stopword filtering, and text
//! normalization.

pub mod normalizer;
pub mod stopwords;
pub mod tokenizer;

pub use normalizer::TextNormalizer;
pub use stopwords::StopwordFilter;
pub use tokenizer::Tokenizer;
