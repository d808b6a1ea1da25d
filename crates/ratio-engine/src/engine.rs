//! Ratio dispatch over the closed set of symptom kinds

use landmarks::{index, LandmarkSet, Point};
use tracing::trace;

use crate::geometry::{self, at, span};
use crate::{RatioError, SymptomKind};

/// Stateless evaluator mapping a landmark set to one ratio per symptom
#[derive(Debug, Clone, Copy, Default)]
pub struct RatioEngine;

impl RatioEngine {
    pub fn new() -> Self {
        Self
    }

    /// Ratio for `kind` on a well-formed landmark set
    pub fn ratio(&self, landmarks: &LandmarkSet, kind: SymptomKind) -> Result<f64, RatioError> {
        self.ratio_from_points(landmarks.as_slice(), kind)
    }

    /// Ratio for `kind` on raw points, which may be too short
    pub fn ratio_from_points(
        &self,
        points: &[Point],
        kind: SymptomKind,
    ) -> Result<f64, RatioError> {
        let ratio = match kind {
            SymptomKind::Blink => geometry::mean_eye_aspect_ratio(
                span(points, index::LEFT_EYE)?,
                span(points, index::RIGHT_EYE)?,
            ),
            SymptomKind::OpenMouth => geometry::mouth_ratio(span(points, index::MOUTH)?),
            SymptomKind::Chewing => geometry::chewing_ratio(span(points, index::MOUTH)?),
            SymptomKind::HeadTilt => {
                geometry::jaw_angle(at(points, index::NOSE_TIP)?, at(points, index::CHIN)?)
            }
            // Jaw symmetry, not vertical motion; kept as the established measure
            SymptomKind::Nodding => geometry::nodding_ratio(
                at(points, index::JAW_LEFT)?,
                at(points, index::JAW_RIGHT)?,
                at(points, index::NOSE_BRIDGE)?,
            ),
        }?;
        trace!(%kind, ratio, "ratio computed");
        Ok(ratio)
    }

    /// All five ratios for one frame, in [`SymptomKind::ALL`] order
    pub fn ratios(&self, landmarks: &LandmarkSet) -> [(SymptomKind, Result<f64, RatioError>); 5] {
        SymptomKind::ALL.map(|kind| (kind, self.ratio(landmarks, kind)))
    }
}
