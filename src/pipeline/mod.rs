//! Pipeline composition
//!
//! This module provides the trained pipeline runner and the stage-boundary
//! observer hooks.

pub mod observer;
pub mod runner;

pub use observer::{
    NoopObserver, PipelineObserver, StageReport, StageTimingObserver,
};
pub use runner::SentimentPipeline;
