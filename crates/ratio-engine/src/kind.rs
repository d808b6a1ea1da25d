//! Symptom kinds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of tracked symptoms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomKind {
    Blink,
    OpenMouth,
    Chewing,
    HeadTilt,
    Nodding,
}

impl SymptomKind {
    /// Every kind, in display order
    pub const ALL: [SymptomKind; 5] = [
        SymptomKind::Blink,
        SymptomKind::OpenMouth,
        SymptomKind::Chewing,
        SymptomKind::HeadTilt,
        SymptomKind::Nodding,
    ];

    /// Human-readable name used in overlay text
    pub fn name(&self) -> &'static str {
        match self {
            Self::Blink => "blink",
            Self::OpenMouth => "open mouth",
            Self::Chewing => "chewing",
            Self::HeadTilt => "head tilting",
            Self::Nodding => "nodding",
        }
    }

    /// Key used in configuration files and JSON output
    pub fn key(&self) -> &'static str {
        match self {
            Self::Blink => "blink",
            Self::OpenMouth => "open_mouth",
            Self::Chewing => "chewing",
            Self::HeadTilt => "head_tilt",
            Self::Nodding => "nodding",
        }
    }
}

impl fmt::Display for SymptomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown symptom: {0:?}")]
pub struct ParseKindError(pub String);

impl FromStr for SymptomKind {
    type Err = ParseKindError;

    /// Exact match on either the display name or the key; never substrings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s || kind.key() == s)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_names() {
        assert_eq!("open mouth".parse(), Ok(SymptomKind::OpenMouth));
        assert_eq!("head_tilt".parse(), Ok(SymptomKind::HeadTilt));
        for kind in SymptomKind::ALL {
            assert_eq!(kind.name().parse(), Ok(kind));
            assert_eq!(kind.key().parse(), Ok(kind));
        }
    }

    #[test]
    fn test_parse_rejects_substrings() {
        // "in" is a substring of "blink" and "chewing"
        assert!("in".parse::<SymptomKind>().is_err());
        assert!("mouth".parse::<SymptomKind>().is_err());
        assert!("".parse::<SymptomKind>().is_err());
    }

    #[test]
    fn test_serde_key() {
        let json = serde_json::to_string(&SymptomKind::OpenMouth).unwrap();
        assert_eq!(json, "\"open_mouth\"");
        assert_eq!(SymptomKind::OpenMouth.to_string(), "open mouth");
    }
}
