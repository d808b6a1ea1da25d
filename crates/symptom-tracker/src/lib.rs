//! Symptom Tracker
//!
//! Turns noisy per-frame ratios into stable event counts:
//! - One debounced state machine per symptom kind
//! - An event is committed once per run of active frames, on the run's falling edge
//! - Thresholds and comparison directions are configurable

pub mod config;
pub mod report;
pub mod state;

pub use config::{ConfigError, Direction, SymptomConfig, Threshold};
pub use ratio_engine::{RatioEngine, RatioError, SymptomKind};
pub use report::{FrameReport, Snapshot};
pub use state::SymptomState;

use landmarks::LandmarkSet;
use metrics::counter;
use tracing::{debug, info, warn};

/// Owns one [`SymptomState`] per [`SymptomKind`].
///
/// Updates must be applied in frame order from a single caller; the run
/// counters depend on that order.
#[derive(Debug, Clone)]
pub struct SymptomTracker {
    engine: RatioEngine,
    config: SymptomConfig,
    states: [SymptomState; 5],
}

fn slot(kind: SymptomKind) -> usize {
    match kind {
        SymptomKind::Blink => 0,
        SymptomKind::OpenMouth => 1,
        SymptomKind::Chewing => 2,
        SymptomKind::HeadTilt => 3,
        SymptomKind::Nodding => 4,
    }
}

impl SymptomTracker {
    /// Create a tracker with validated thresholds
    pub fn new(config: SymptomConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!("Creating symptom tracker with config: {:?}", config);
        Ok(Self {
            engine: RatioEngine::new(),
            config,
            states: [SymptomState::default(); 5],
        })
    }

    /// Fresh tracker with the default thresholds
    pub fn new_session() -> Self {
        Self {
            engine: RatioEngine::new(),
            config: SymptomConfig::default(),
            states: [SymptomState::default(); 5],
        }
    }

    pub fn config(&self) -> &SymptomConfig {
        &self.config
    }

    /// Apply one frame's ratio for `kind`; returns `(current_ratio, total_events)`
    pub fn update(&mut self, kind: SymptomKind, ratio: f64) -> (f64, u64) {
        if !ratio.is_finite() {
            warn!(%kind, ratio, "Non-finite ratio treated as inactive");
        }
        let threshold = *self.config.threshold(kind);
        let state = &mut self.states[slot(kind)];
        if state.apply(ratio, &threshold) {
            debug!(%kind, total = state.total_events, "Symptom event committed");
            counter!("symptoms_events_total", "kind" => kind.key()).increment(1);
        }
        (state.current_ratio, state.total_events)
    }

    /// Evaluate every symptom on one face and update each state.
    ///
    /// A symptom whose ratio cannot be computed keeps its state for this frame.
    pub fn update_all(&mut self, landmarks: &LandmarkSet) -> FrameReport {
        let mut report = FrameReport::default();
        for (kind, result) in self.engine.ratios(landmarks) {
            match result {
                Ok(ratio) => {
                    let before = self.states[slot(kind)].total_events;
                    let (_, total) = self.update(kind, ratio);
                    if total > before {
                        report.committed.push(kind);
                    }
                }
                Err(e) => {
                    debug!(%kind, error = %e, "Skipping symptom update");
                    report.skipped.push((kind, e));
                }
            }
        }
        report
    }

    pub fn state(&self, kind: SymptomKind) -> &SymptomState {
        &self.states[slot(kind)]
    }

    pub fn reset(&mut self, kind: SymptomKind) {
        self.states[slot(kind)].reset();
    }

    /// Zero every counter (session start)
    pub fn reset_all(&mut self) {
        for state in &mut self.states {
            state.reset();
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(SymptomKind::ALL.into_iter().map(|k| (k, *self.state(k))).collect())
    }
}

impl Default for SymptomTracker {
    fn default() -> Self {
        Self::new_session()
    }
}
