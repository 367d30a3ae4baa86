//! Artifact store — persistence for trained pipelines.
//!
//! A fitted pipeline serializes to one versioned JSON blob holding the
//! vocabulary, IDF table, model parameters, and metadata. Artifacts are
//! created whole by a training run, loaded read-only by every serving
//! process, and replaced wholesale on retraining — never patched.
//!
//! # Atomicity
//!
//! [`ArtifactStore::save`] writes to a process-unique sibling temp file and
//! renames it into place, so a concurrent reader never observes a partially
//! written artifact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::SentimentModel;
use crate::error::{Result, SentimentError};
use crate::features::TfIdfVectorizer;
use crate::pipeline::SentimentPipeline;
use crate::types::{Sentiment, SentimentConfig};

/// Schema version written into every artifact. [`ArtifactStore::load`]
/// rejects any other value.
pub const ARTIFACT_VERSION: u32 = 1;

/// Descriptive metadata embedded in the artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// Trained label set, sorted.
    pub labels: Vec<Sentiment>,
    /// When the training run finished.
    pub trained_at: DateTime<Utc>,
    /// Number of training documents.
    pub n_documents: usize,
    /// Number of vocabulary terms.
    pub vocabulary_size: usize,
}

/// The serialized bundle. The vocabulary and model parameters travel
/// together here and nowhere else, so they can never be mixed across
/// training runs.
#[derive(Debug, Serialize, Deserialize)]
struct PipelineArtifact {
    /// Schema version tag.
    v: u32,
    metadata: ArtifactMetadata,
    config: SentimentConfig,
    vectorizer: TfIdfVectorizer,
    model: SentimentModel,
}

/// Save/load interface for pipeline artifacts.
pub struct ArtifactStore;

impl ArtifactStore {
    /// Serialize a trained pipeline to `destination` atomically.
    pub fn save(pipeline: &SentimentPipeline, destination: impl AsRef<Path>) -> Result<()> {
        let destination = destination.as_ref();
        let artifact = PipelineArtifact {
            v: ARTIFACT_VERSION,
            metadata: ArtifactMetadata {
                labels: pipeline.labels().to_vec(),
                trained_at: pipeline.trained_at(),
                n_documents: pipeline.n_documents(),
                vocabulary_size: pipeline.vocabulary_size(),
            },
            config: pipeline.config().clone(),
            vectorizer: pipeline.vectorizer().clone(),
            model: pipeline.model().clone(),
        };

        let json =
            serde_json::to_vec(&artifact).map_err(|err| SentimentError::ArtifactCorrupt {
                path: destination.to_path_buf(),
                reason: format!("failed to serialize: {err}"),
            })?;

        let tmp = temp_path(destination);
        fs::write(&tmp, &json).map_err(|source| SentimentError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, destination).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            SentimentError::Io {
                path: destination.to_path_buf(),
                source,
            }
        })
    }

    /// Deserialize a pipeline from `source`.
    ///
    /// Fails with [`SentimentError::ArtifactNotFound`] when the path does not
    /// exist and [`SentimentError::ArtifactCorrupt`] when the content cannot
    /// be deserialized or carries an unsupported version tag. A load failure
    /// is fatal to serving — there is no degraded mode without a model.
    pub fn load(source: impl AsRef<Path>) -> Result<SentimentPipeline> {
        let source = source.as_ref();
        let bytes = fs::read(source).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                SentimentError::ArtifactNotFound {
                    path: source.to_path_buf(),
                    source: err,
                }
            } else {
                SentimentError::Io {
                    path: source.to_path_buf(),
                    source: err,
                }
            }
        })?;

        let corrupt = |reason: String| SentimentError::ArtifactCorrupt {
            path: source.to_path_buf(),
            reason,
        };

        // Check the version tag before attempting the full schema, so a
        // future-format artifact reports a version mismatch rather than an
        // opaque parse error.
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|err| corrupt(err.to_string()))?;
        let version = value
            .get("v")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| corrupt("missing version tag".to_string()))?;
        if version != u64::from(ARTIFACT_VERSION) {
            return Err(corrupt(format!(
                "unsupported artifact version: expected {ARTIFACT_VERSION}, got {version}"
            )));
        }

        let artifact: PipelineArtifact =
            serde_json::from_value(value).map_err(|err| corrupt(err.to_string()))?;

        Ok(SentimentPipeline::from_parts(
            artifact.config,
            artifact.vectorizer,
            artifact.model,
            artifact.metadata.trained_at,
        ))
    }

    /// Load once per process and share the immutable pipeline.
    ///
    /// The first call loads from `source`; every later call returns the same
    /// reference regardless of path. Serving is read-only, so the shared
    /// pipeline is safe to use from any number of threads.
    pub fn load_shared(source: impl AsRef<Path>) -> Result<&'static SentimentPipeline> {
        static SHARED: OnceLock<SentimentPipeline> = OnceLock::new();
        if let Some(pipeline) = SHARED.get() {
            return Ok(pipeline);
        }
        let pipeline = Self::load(source)?;
        Ok(SHARED.get_or_init(|| pipeline))
    }
}

/// Process-unique sibling path, kept in the destination directory so the
/// final rename stays on one filesystem.
fn temp_path(destination: &Path) -> PathBuf {
    let file_name = destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    destination.with_file_name(format!(".{file_name}.{}.tmp", std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ReviewRecord, Sentiment, SentimentConfig};
    use tempfile::tempdir;

    fn trained_pipeline() -> SentimentPipeline {
        let records = vec![
            ReviewRecord::new("Barang bagus, pengiriman cepat", 5),
            ReviewRecord::new("Barang jelek, pengiriman lama", 1),
            ReviewRecord::new("Oke saja", 3),
        ];
        SentimentPipeline::fit(&records, SentimentConfig::indonesian()).unwrap()
    }

    #[test]
    fn test_roundtrip_predictions_are_bit_identical() {
        let pipeline = trained_pipeline();
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentiment.json");

        ArtifactStore::save(&pipeline, &path).unwrap();
        let loaded = ArtifactStore::load(&path).unwrap();

        let batch = [
            "Pengiriman sangat lama sekali",
            "bagus banget",
            "entah apa ini",
            "",
        ];
        for text in batch {
            assert_eq!(
                pipeline.predict_proba(text).unwrap(),
                loaded.predict_proba(text).unwrap(),
                "probabilities diverge for {text:?}"
            );
            assert_eq!(
                pipeline.predict_one(text).unwrap(),
                loaded.predict_one(text).unwrap()
            );
        }
    }

    #[test]
    fn test_roundtrip_preserves_metadata() {
        let pipeline = trained_pipeline();
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentiment.json");

        ArtifactStore::save(&pipeline, &path).unwrap();
        let loaded = ArtifactStore::load(&path).unwrap();

        assert_eq!(loaded.labels(), pipeline.labels());
        assert_eq!(loaded.vocabulary_size(), pipeline.vocabulary_size());
        assert_eq!(loaded.n_documents(), pipeline.n_documents());
        assert_eq!(loaded.trained_at(), pipeline.trained_at());
    }

    #[test]
    fn test_load_missing_artifact() {
        let dir = tempdir().unwrap();
        let err = ArtifactStore::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SentimentError::ArtifactNotFound { .. }));
    }

    #[test]
    fn test_load_garbage_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.json");
        std::fs::write(&path, b"not json at all").unwrap();

        let err = ArtifactStore::load(&path).unwrap_err();
        assert!(matches!(err, SentimentError::ArtifactCorrupt { .. }));
    }

    #[test]
    fn test_load_rejects_version_mismatch() {
        let pipeline = trained_pipeline();
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentiment.json");
        ArtifactStore::save(&pipeline, &path).unwrap();

        // Rewrite the version tag to a future value.
        let mut value: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        value["v"] = serde_json::json!(99);
        std::fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();

        let err = ArtifactStore::load(&path).unwrap_err();
        match err {
            SentimentError::ArtifactCorrupt { reason, .. } => {
                assert!(reason.contains("expected 1, got 99"), "reason: {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_save_leaves_no_temp_file_behind() {
        let pipeline = trained_pipeline();
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentiment.json");
        ArtifactStore::save(&pipeline, &path).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["sentiment.json"]);
    }

    #[test]
    fn test_save_overwrites_existing_artifact_wholesale() {
        let pipeline = trained_pipeline();
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentiment.json");

        ArtifactStore::save(&pipeline, &path).unwrap();
        // Retrain with a different label policy and replace.
        let records = vec![
            ReviewRecord::new("bagus", 5),
            ReviewRecord::new("jelek", 1),
        ];
        let retrained =
            SentimentPipeline::fit(&records, SentimentConfig::indonesian()).unwrap();
        ArtifactStore::save(&retrained, &path).unwrap();

        let loaded = ArtifactStore::load(&path).unwrap();
        assert_eq!(loaded.labels(), &[Sentiment::Negative, Sentiment::Positive]);
    }
}
