//! Symptom thresholds

use ratio_engine::SymptomKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which side of the threshold counts as active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Active when `ratio <= threshold`
    AtMost,
    /// Active when `ratio >= threshold`
    AtLeast,
}

impl Direction {
    pub fn is_active(&self, ratio: f64, threshold: f64) -> bool {
        match self {
            Self::AtMost => ratio <= threshold,
            Self::AtLeast => ratio >= threshold,
        }
    }
}

/// Threshold ratio and comparison for one symptom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub ratio: f64,
    pub direction: Direction,
}

impl Threshold {
    pub const fn at_most(ratio: f64) -> Self {
        Self { ratio, direction: Direction::AtMost }
    }

    pub const fn at_least(ratio: f64) -> Self {
        Self { ratio, direction: Direction::AtLeast }
    }

    pub fn is_active(&self, ratio: f64) -> bool {
        self.direction.is_active(ratio, self.ratio)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid threshold {ratio} for {kind}")]
    InvalidThreshold { kind: SymptomKind, ratio: f64 },
}

/// Per-symptom thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymptomConfig {
    /// Eyes closed: eye aspect ratio at or below
    pub blink: Threshold,

    /// Mouth opening over lip thickness at or above
    pub open_mouth: Threshold,

    /// Lip thickness over mouth width at or above
    pub chewing: Threshold,

    /// Chin angle from vertical (degrees) at or above
    pub head_tilt: Threshold,

    /// Jaw symmetry at or above
    pub nodding: Threshold,
}

impl Default for SymptomConfig {
    fn default() -> Self {
        Self {
            blink: Threshold::at_most(0.25),
            open_mouth: Threshold::at_least(1.0),
            chewing: Threshold::at_least(0.45),
            head_tilt: Threshold::at_least(20.0),
            nodding: Threshold::at_least(0.5),
        }
    }
}

impl SymptomConfig {
    pub fn threshold(&self, kind: SymptomKind) -> &Threshold {
        match kind {
            SymptomKind::Blink => &self.blink,
            SymptomKind::OpenMouth => &self.open_mouth,
            SymptomKind::Chewing => &self.chewing,
            SymptomKind::HeadTilt => &self.head_tilt,
            SymptomKind::Nodding => &self.nodding,
        }
    }

    pub fn threshold_mut(&mut self, kind: SymptomKind) -> &mut Threshold {
        match kind {
            SymptomKind::Blink => &mut self.blink,
            SymptomKind::OpenMouth => &mut self.open_mouth,
            SymptomKind::Chewing => &mut self.chewing,
            SymptomKind::HeadTilt => &mut self.head_tilt,
            SymptomKind::Nodding => &mut self.nodding,
        }
    }

    /// Replace one symptom's threshold
    pub fn with_threshold(mut self, kind: SymptomKind, threshold: Threshold) -> Self {
        *self.threshold_mut(kind) = threshold;
        self
    }

    /// Reject non-finite thresholds
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in SymptomKind::ALL {
            let ratio = self.threshold(kind).ratio;
            if !ratio.is_finite() {
                return Err(ConfigError::InvalidThreshold { kind, ratio });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = SymptomConfig::default();
        assert_eq!(config.threshold(SymptomKind::Blink), &Threshold::at_most(0.25));
        assert_eq!(config.threshold(SymptomKind::OpenMouth), &Threshold::at_least(1.0));
        assert_eq!(config.threshold(SymptomKind::Chewing), &Threshold::at_least(0.45));
        assert_eq!(config.threshold(SymptomKind::HeadTilt), &Threshold::at_least(20.0));
        assert_eq!(config.threshold(SymptomKind::Nodding), &Threshold::at_least(0.5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_direction_is_inclusive() {
        assert!(Threshold::at_most(0.25).is_active(0.25));
        assert!(!Threshold::at_most(0.25).is_active(0.2500001));
        assert!(Threshold::at_least(1.0).is_active(1.0));
        assert!(!Threshold::at_least(1.0).is_active(0.999));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let config = SymptomConfig::default()
            .with_threshold(SymptomKind::Chewing, Threshold::at_least(f64::NAN));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold { kind: SymptomKind::Chewing, .. })
        ));
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: SymptomConfig =
            serde_json::from_str(r#"{"blink": {"ratio": 0.2, "direction": "at_most"}}"#).unwrap();
        assert_eq!(config.blink, Threshold::at_most(0.2));
        assert_eq!(config.nodding, SymptomConfig::default().nodding);
    }
}
