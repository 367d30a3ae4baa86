//! Pipeline runner — composes normalization, feature extraction, and
//! classification.
//!
//! [`SentimentPipeline::fit`] trains the whole stack from labeled review
//! records; [`SentimentPipeline::predict`] takes raw strings and returns a
//! label plus a confidence score. Callers never touch the intermediate
//! representations.
//!
//! A trained pipeline is immutable: serving reads shared state only, so one
//! loaded pipeline can be used concurrently from any number of threads.

use chrono::{DateTime, Utc};

use crate::classifier::{Classifier, SentimentModel};
use crate::error::{Result, SentimentError};
use crate::features::TfIdfVectorizer;
use crate::nlp::TextNormalizer;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReportBuilder, STAGE_NORMALIZE, STAGE_TRAIN,
    STAGE_VECTORIZE, STAGE_VOCABULARY,
};
use crate::types::{NeutralPolicy, Prediction, ReviewRecord, Sentiment, SentimentConfig};

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// A trained sentiment pipeline: normalizer + vectorizer + classifier.
#[derive(Debug, Clone)]
pub struct SentimentPipeline {
    config: SentimentConfig,
    normalizer: TextNormalizer,
    vectorizer: TfIdfVectorizer,
    model: SentimentModel,
    trained_at: DateTime<Utc>,
}

impl SentimentPipeline {
    /// Train a pipeline on labeled review records.
    ///
    /// Missing labels are derived from ratings (≥4 → Positive, ==3 → Neutral,
    /// ≤2 → Negative); records the [`NeutralPolicy`] excludes are dropped.
    /// Fails with [`SentimentError::EmptyCorpus`] when nothing usable
    /// remains after cleaning.
    pub fn fit(records: &[ReviewRecord], config: SentimentConfig) -> Result<Self> {
        Self::fit_with_observer(records, config, &mut NoopObserver)
    }

    /// Train with stage-boundary callbacks for timing and telemetry.
    ///
    /// Stages run in order: normalize → vocabulary → vectorize → train.
    pub fn fit_with_observer(
        records: &[ReviewRecord],
        config: SentimentConfig,
        observer: &mut impl PipelineObserver,
    ) -> Result<Self> {
        let (texts, labels): (Vec<String>, Vec<Sentiment>) = records
            .iter()
            .map(|record| (record.text.clone(), record.resolved_sentiment()))
            .filter(|(_, label)| {
                config.neutral == NeutralPolicy::Include || *label != Sentiment::Neutral
            })
            .unzip();

        if texts.is_empty() {
            return Err(SentimentError::EmptyCorpus);
        }

        let normalizer = TextNormalizer::from_config(&config);

        // Stage 0: Normalize
        trace_stage!(STAGE_NORMALIZE);
        observer.on_stage_start(STAGE_NORMALIZE);
        let clock = StageClock::start();
        let cleaned = normalizer.normalize_batch(&texts);
        let report = StageReportBuilder::new(clock.elapsed())
            .records(cleaned.len())
            .build();
        observer.on_stage_end(STAGE_NORMALIZE, &report);

        // Stage 1: Learn vocabulary + IDF
        trace_stage!(STAGE_VOCABULARY);
        observer.on_stage_start(STAGE_VOCABULARY);
        let clock = StageClock::start();
        let mut vectorizer = TfIdfVectorizer::from_config(&config);
        vectorizer.fit(&cleaned)?;
        let report = StageReportBuilder::new(clock.elapsed())
            .terms(vectorizer.vocabulary().len())
            .build();
        observer.on_stage_end(STAGE_VOCABULARY, &report);

        // Stage 2: Vectorize the corpus
        trace_stage!(STAGE_VECTORIZE);
        observer.on_stage_start(STAGE_VECTORIZE);
        let clock = StageClock::start();
        let features = vectorizer.transform_batch(&cleaned)?;
        let report = StageReportBuilder::new(clock.elapsed())
            .records(features.len())
            .build();
        observer.on_stage_end(STAGE_VECTORIZE, &report);

        // Stage 3: Train the classifier
        trace_stage!(STAGE_TRAIN);
        observer.on_stage_start(STAGE_TRAIN);
        let clock = StageClock::start();
        let mut model = SentimentModel::from_config(&config);
        model.fit(&features, &labels)?;
        let n_classes = model.labels().len();
        let report = StageReportBuilder::new(clock.elapsed())
            .classes(n_classes)
            .imbalanced(n_classes < 2)
            .build();
        observer.on_stage_end(STAGE_TRAIN, &report);

        Ok(Self {
            config,
            normalizer,
            vectorizer,
            model,
            trained_at: Utc::now(),
        })
    }

    /// Predict labels and confidences for a batch of raw texts.
    ///
    /// Each input is processed independently (normalize → transform →
    /// predict_proba); N inputs yield exactly N outputs in the same order.
    /// Text full of tokens unseen in training degrades to the majority-prior
    /// label rather than failing.
    pub fn predict<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<Prediction>> {
        texts
            .iter()
            .map(|text| self.predict_one(text.as_ref()))
            .collect()
    }

    /// Predict one raw text.
    pub fn predict_one(&self, text: &str) -> Result<Prediction> {
        let cleaned = self.normalizer.normalize(text);
        let features = self.vectorizer.transform(&cleaned)?;
        self.model.predict(&features)
    }

    /// Probability per trained label for one raw text, aligned with
    /// [`labels`](Self::labels).
    pub fn predict_proba(&self, text: &str) -> Result<Vec<f64>> {
        let cleaned = self.normalizer.normalize(text);
        let features = self.vectorizer.transform(&cleaned)?;
        self.model.predict_proba(&features)
    }

    /// The trained label set, sorted.
    pub fn labels(&self) -> &[Sentiment] {
        self.model.labels()
    }

    /// The configuration the pipeline was trained with.
    pub fn config(&self) -> &SentimentConfig {
        &self.config
    }

    /// Number of vocabulary terms.
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary().len()
    }

    /// Number of training documents.
    pub fn n_documents(&self) -> usize {
        self.vectorizer.n_documents()
    }

    /// Training timestamp.
    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    /// Reassemble a pipeline from deserialized artifact parts. The normalizer
    /// is rebuilt from the config, which fully determines it.
    pub(crate) fn from_parts(
        config: SentimentConfig,
        vectorizer: TfIdfVectorizer,
        model: SentimentModel,
        trained_at: DateTime<Utc>,
    ) -> Self {
        let normalizer = TextNormalizer::from_config(&config);
        Self {
            config,
            normalizer,
            vectorizer,
            model,
            trained_at,
        }
    }

    pub(crate) fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    pub(crate) fn model(&self) -> &SentimentModel {
        &self.model
    }
}
