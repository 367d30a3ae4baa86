//! Feature extraction
//!
//! This module provides the training-time vocabulary and the TF-IDF
//! vectorizer built on top of it.

pub mod vectorizer;
pub mod vocabulary;

pub use vectorizer::TfIdfVectorizer;
pub use vocabulary::Vocabulary;
