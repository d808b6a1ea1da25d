//! Per-symptom counting state

use serde::{Deserialize, Serialize};

use crate::config::Threshold;

/// Counting state for one symptom.
///
/// A run of consecutive active frames is committed as a single event on the
/// first inactive frame after it. A run still open when the stream stops is
/// never counted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SymptomState {
    /// Latest finite ratio seen
    pub current_ratio: f64,

    /// Length of the open active run (0 when inactive)
    pub consecutive_active_frames: u64,

    /// Committed events
    pub total_events: u64,
}

impl SymptomState {
    /// Apply one frame's ratio. Returns true when this frame committed an event.
    ///
    /// A non-finite ratio counts as inactive and leaves `current_ratio` unchanged.
    pub fn apply(&mut self, ratio: f64, threshold: &Threshold) -> bool {
        let active = ratio.is_finite() && threshold.is_active(ratio);
        if ratio.is_finite() {
            self.current_ratio = ratio;
        }

        if active {
            self.consecutive_active_frames = self.consecutive_active_frames.saturating_add(1);
            false
        } else if self.consecutive_active_frames >= 1 {
            self.total_events += 1;
            self.consecutive_active_frames = 0;
            true
        } else {
            false
        }
    }

    pub fn is_in_active_run(&self) -> bool {
        self.consecutive_active_frames > 0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
