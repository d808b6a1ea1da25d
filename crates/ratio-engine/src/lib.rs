//! Symptom Ratio Engine
//!
//! Stateless geometric ratios computed from one face's 68 landmarks:
//! - Eye aspect ratio (blink)
//! - Mouth opening relative to lip thickness
//! - Lip thickness relative to mouth width (chewing)
//! - Chin angle from vertical (head tilt)
//! - Jaw symmetry around the nose bridge (nodding)

mod engine;
pub mod geometry;
mod kind;

pub use engine::RatioEngine;
pub use kind::{ParseKindError, SymptomKind};

use thiserror::Error;

/// Denominators smaller than this are treated as coincident points
pub const MIN_DENOMINATOR: f64 = 1e-9;

/// Ratio evaluation errors
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RatioError {
    #[error("Malformed landmarks: index {index} out of range for {len} points")]
    MalformedLandmarks { index: usize, len: usize },

    #[error("Degenerate geometry for {kind} ratio")]
    DegenerateGeometry { kind: SymptomKind },
}
