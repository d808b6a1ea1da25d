//! Facial Landmark Types
//!
//! Shared geometry for the 68-point facial landmark model:
//! - `Point` (2-D coordinate with distance helpers)
//! - `LandmarkSet` (exactly 68 points for one detected face)
//! - Named indices into the model

pub mod index;
mod point;
mod set;
#[cfg(any(test, feature = "synthetic"))]
pub mod synthetic;

pub use point::Point;
pub use set::LandmarkSet;

use thiserror::Error;

/// Number of points produced by the landmark model per face
pub const LANDMARK_COUNT: usize = 68;

/// Landmark construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LandmarkError {
    #[error("Expected {expected} landmarks, got {actual}")]
    WrongPointCount { expected: usize, actual: usize },

    #[error("Landmark index {index} is out of range")]
    IndexOutOfRange { index: usize },

    #[error("Landmark {index} has a non-finite coordinate ({x}, {y})")]
    NonFinite { index: usize, x: f64, y: f64 },
}
