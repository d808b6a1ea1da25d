//! Application configuration
//!
//! Layered: built-in defaults, then an optional file, then `SYMPTOMS__*`
//! environment variables (e.g. `SYMPTOMS__SYMPTOMS__BLINK__RATIO=0.2`).

use std::path::Path;

use serde::{Deserialize, Serialize};
use symptom_tracker::SymptomConfig;
use tracing::info;

use crate::SessionError;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "SYMPTOMS";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Per-symptom thresholds
    pub symptoms: SymptomConfig,

    /// Frame queue settings
    pub pipeline: PipelineConfig,

    /// Log output
    pub logging: LogConfig,
}

/// Frame queue between capture and evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Frames buffered before the producer waits
    pub queue_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { queue_capacity: 64 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load defaults, then `path` if given, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self, SessionError> {
        let mut builder = ::config::Config::builder()
            .add_source(::config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            info!("Loading configuration from {}", path.display());
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        let config: AppConfig = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        self.symptoms.validate()?;
        if self.pipeline.queue_capacity == 0 {
            return Err(SessionError::Pipeline("queue_capacity must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};
    use symptom_tracker::{Direction, SymptomKind, Threshold};

    // The environment is process-wide; loads must not overlap with a test that sets it
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    struct EnvVars(&'static [(&'static str, &'static str)]);

    impl EnvVars {
        fn set(vars: &'static [(&'static str, &'static str)]) -> Self {
            for (key, value) in vars {
                std::env::set_var(key, value);
            }
            Self(vars)
        }
    }

    impl Drop for EnvVars {
        fn drop(&mut self) {
            for (key, _) in self.0 {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_defaults_without_file() {
        let _lock = env_lock();
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.symptoms, SymptomConfig::default());
        assert_eq!(config.pipeline.queue_capacity, 64);
        assert_eq!(config.symptoms.blink.direction, Direction::AtMost);
        assert_eq!(config.symptoms.nodding.direction, Direction::AtLeast);
    }

    #[test]
    fn test_environment_overrides_file() {
        let _lock = env_lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[symptoms.blink]\nratio = 0.2\n\n[pipeline]\nqueue_capacity = 8").unwrap();

        let _vars = EnvVars::set(&[
            ("SYMPTOMS__SYMPTOMS__BLINK__RATIO", "0.15"),
            ("SYMPTOMS__PIPELINE__QUEUE_CAPACITY", "3"),
        ]);
        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.symptoms.threshold(SymptomKind::Blink), &Threshold::at_most(0.15));
        assert_eq!(config.pipeline.queue_capacity, 3);
        assert_eq!(config.symptoms.threshold(SymptomKind::Chewing), &Threshold::at_least(0.45));
    }

    #[test]
    fn test_partial_file_overrides() {
        let _lock = env_lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[symptoms.blink]\nratio = 0.2\n\n[symptoms.head_tilt]\nratio = 15.0\n\n\
             [pipeline]\nqueue_capacity = 8"
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.symptoms.threshold(SymptomKind::Blink), &Threshold::at_most(0.2));
        assert_eq!(config.symptoms.threshold(SymptomKind::HeadTilt), &Threshold::at_least(15.0));
        assert_eq!(config.symptoms.threshold(SymptomKind::Chewing), &Threshold::at_least(0.45));
        assert_eq!(config.pipeline.queue_capacity, 8);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let _lock = env_lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[pipeline]\nqueue_capacity = 0").unwrap();
        assert!(matches!(
            AppConfig::load(Some(file.path())),
            Err(SessionError::Pipeline(_))
        ));
    }

    #[test]
    fn test_missing_file_is_error() {
        let _lock = env_lock();
        assert!(AppConfig::load(Some(Path::new("/nonexistent/symptoms.toml"))).is_err());
    }
}
