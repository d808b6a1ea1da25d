//! Tracker outputs for display and export

use std::collections::BTreeMap;

use ratio_engine::{RatioError, SymptomKind};
use serde::{Deserialize, Serialize};

use crate::state::SymptomState;

/// Read-only view of every symptom's state
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    states: BTreeMap<SymptomKind, SymptomState>,
}

impl Snapshot {
    pub(crate) fn new(states: BTreeMap<SymptomKind, SymptomState>) -> Self {
        Self { states }
    }

    pub fn get(&self, kind: SymptomKind) -> Option<&SymptomState> {
        self.states.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymptomKind, &SymptomState)> {
        self.states.iter().map(|(k, v)| (*k, v))
    }

    /// Committed events across all symptoms
    pub fn total_events(&self) -> u64 {
        self.states.values().map(|s| s.total_events).sum()
    }

    /// Overlay text: one count line per symptom, then the current ratios when presenting
    pub fn display_lines(&self, presenting: bool) -> Vec<String> {
        let mut lines: Vec<String> = self
            .iter()
            .map(|(kind, state)| format!("Symptom {} : {}", kind, state.total_events))
            .collect();
        if presenting {
            lines.extend(self.iter().map(|(kind, state)| {
                format!("Current {} ratio: {:.2}", kind, state.current_ratio)
            }));
        }
        lines
    }
}

/// What one landmark frame did to the tracker
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Symptoms whose active run ended this frame
    pub committed: Vec<SymptomKind>,

    /// Symptoms left untouched because their ratio could not be computed
    pub skipped: Vec<(SymptomKind, RatioError)>,
}

impl FrameReport {
    pub fn has_events(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn has_skips(&self) -> bool {
        !self.skipped.is_empty()
    }
}
