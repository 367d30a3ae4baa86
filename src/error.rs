//! Error taxonomy for the sentiment pipeline.
//!
//! Training fails fast and loudly on malformed input (the caller must fix the
//! dataset); inference never fails past type checks. Every variant carries
//! enough context for operator diagnosis: the path, the expected vs. actual
//! schema version, or the offending record index.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SentimentError>;

/// All failure modes of the sentiment pipeline core.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// The training corpus contains no usable text — every record was empty
    /// after cleaning, or the document-frequency cutoffs removed every token.
    #[error("training corpus contains no usable text")]
    EmptyCorpus,

    /// The artifact file does not exist at the given path.
    #[error("artifact not found at {}", path.display())]
    ArtifactNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The artifact file exists but could not be deserialized, or its version
    /// tag does not match the supported schema version.
    #[error("artifact at {} is corrupt: {reason}", path.display())]
    ArtifactCorrupt { path: PathBuf, reason: String },

    /// Internal dimensional mismatch. Defensive — should never surface in
    /// normal operation.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    Shape { expected: usize, actual: usize },

    /// I/O failure while reading or writing a file.
    #[error("i/o error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A training record could not be parsed.
    #[error("failed to parse record {index}")]
    Record {
        index: usize,
        #[source]
        source: csv::Error,
    },
}
