//! Symptom Counting Sessions
//!
//! Drives a [`SymptomTracker`] from a stream of per-frame landmarks:
//! - Landmark sources (JSON-lines replay, injected face detectors)
//! - Synchronous sessions and an async single-consumer frame pipeline
//! - Layered configuration and logging setup

pub mod config;
pub mod pipeline;
pub mod session;
pub mod source;

pub use config::{AppConfig, LogConfig, PipelineConfig};
pub use pipeline::{feed_blocking, FramePipeline, FrameSender};
pub use session::{Session, SessionSummary};
pub use source::{
    first_face, DetectorSource, FaceDetector, IterSource, JsonLinesSource, LandmarkSource,
    SourceError,
};
pub use symptom_tracker::{Snapshot, SymptomKind, SymptomState, SymptomTracker};

use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Session error types
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid thresholds: {0}")]
    Thresholds(#[from] symptom_tracker::ConfigError),

    #[error("Invalid pipeline setting: {0}")]
    Pipeline(String),

    #[error("Frame source error: {0}")]
    Source(#[from] SourceError),
}

/// Initialize logging. `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if result.is_err() {
        debug!("Tracing subscriber already installed");
    }
}
