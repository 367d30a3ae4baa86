//! # rapid-sentiment
//!
//! Fast sentiment classification for short product reviews.
//!
//! The crate composes a deterministic text normalizer, a TF-IDF feature
//! extractor, and a linear classifier into a single [`SentimentPipeline`]
//! with two operations: `fit` over labeled review records and `predict` over
//! raw strings. A fitted pipeline serializes to one versioned artifact via
//! [`ArtifactStore`], which serving processes load read-only.
//!
//! # Quick start
//!
//! ```
//! use rapid_sentiment::{ReviewRecord, Sentiment, SentimentConfig, SentimentPipeline};
//!
//! # fn main() -> rapid_sentiment::Result<()> {
//! let records = vec![
//!     ReviewRecord::new("Barang bagus, pengiriman cepat", 5),
//!     ReviewRecord::new("Barang jelek, pengiriman lama", 1),
//! ];
//!
//! let pipeline = SentimentPipeline::fit(&records, SentimentConfig::indonesian())?;
//! let prediction = pipeline.predict_one("pengiriman lama banget")?;
//! assert_eq!(prediction.label, Sentiment::Negative);
//! assert!(prediction.confidence >= 0.5);
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Training is an offline batch operation. A trained pipeline is immutable,
//! so serving can call [`SentimentPipeline::predict`] concurrently from any
//! number of threads without locking; `ArtifactStore::load_shared` provides a
//! process-wide load-once reference.

pub mod artifact;
pub mod classifier;
pub mod data;
pub mod error;
pub mod features;
pub mod nlp;
pub mod pipeline;
pub mod types;

pub use artifact::{ArtifactMetadata, ArtifactStore, ARTIFACT_VERSION};
pub use classifier::{Classifier, MultinomialNb, SentimentModel, SoftmaxRegression};
pub use data::load_records;
pub use error::{Result, SentimentError};
pub use features::{TfIdfVectorizer, Vocabulary};
pub use nlp::TextNormalizer;
pub use pipeline::{NoopObserver, PipelineObserver, SentimentPipeline, StageTimingObserver};
pub use types::{
    ModelKind, NeutralPolicy, Prediction, ReviewRecord, Sentiment, SentimentConfig, Stemming,
};
