//! Pipeline observer — hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at training-stage boundaries without
//! coupling to stage logic. Use cases include timing stages, surfacing class
//! imbalance, and emitting structured telemetry.

use std::time::{Duration, Instant};

/// Stage name constants, in execution order.
pub const STAGE_NORMALIZE: &str = "normalize";
pub const STAGE_VOCABULARY: &str = "vocabulary";
pub const STAGE_VECTORIZE: &str = "vectorize";
pub const STAGE_TRAIN: &str = "train";

/// Wall-clock timer for one stage.
pub struct StageClock {
    start: Instant,
}

impl StageClock {
    /// Start timing.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Metrics reported at the end of a stage.
#[derive(Debug, Clone)]
pub struct StageReport {
    duration: Duration,
    records: Option<usize>,
    terms: Option<usize>,
    classes: Option<usize>,
    imbalanced: Option<bool>,
}

impl StageReport {
    /// A report carrying only the stage duration.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            records: None,
            terms: None,
            classes: None,
            imbalanced: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Number of records processed, when the stage counts them.
    pub fn records(&self) -> Option<usize> {
        self.records
    }

    /// Vocabulary size, reported by the vocabulary stage.
    pub fn terms(&self) -> Option<usize> {
        self.terms
    }

    /// Number of distinct classes, reported by the train stage.
    pub fn classes(&self) -> Option<usize> {
        self.classes
    }

    /// Whether the train stage saw a degenerate class distribution.
    pub fn imbalanced(&self) -> Option<bool> {
        self.imbalanced
    }
}

/// Builder for [`StageReport`]s carrying optional metrics.
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(duration: Duration) -> Self {
        Self {
            report: StageReport::new(duration),
        }
    }

    pub fn records(mut self, records: usize) -> Self {
        self.report.records = Some(records);
        self
    }

    pub fn terms(mut self, terms: usize) -> Self {
        self.report.terms = Some(terms);
        self
    }

    pub fn classes(mut self, classes: usize) -> Self {
        self.report.classes = Some(classes);
        self
    }

    pub fn imbalanced(mut self, imbalanced: bool) -> Self {
        self.report.imbalanced = Some(imbalanced);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Callbacks fired at stage boundaries during training.
///
/// All methods have empty default bodies, so implementors override only what
/// they need.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}
    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}
}

/// Observer that does nothing — zero-overhead training.
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that records every stage report for later inspection.
#[derive(Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected `(stage, report)` pairs in execution order.
    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_report_builder_carries_metrics() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .records(100)
            .classes(3)
            .imbalanced(false)
            .build();

        assert_eq!(report.records(), Some(100));
        assert_eq!(report.classes(), Some(3));
        assert_eq!(report.imbalanced(), Some(false));
        assert_eq!(report.terms(), None);
    }

    #[test]
    fn test_timing_observer_collects_reports_in_order() {
        let mut observer = StageTimingObserver::new();
        observer.on_stage_end(STAGE_NORMALIZE, &StageReport::new(Duration::ZERO));
        observer.on_stage_end(STAGE_TRAIN, &StageReport::new(Duration::ZERO));

        let stages: Vec<&str> = observer.reports().iter().map(|(name, _)| *name).collect();
        assert_eq!(stages, vec![STAGE_NORMALIZE, STAGE_TRAIN]);
    }
}
