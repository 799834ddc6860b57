//! signalpool configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pool::{PoolConfig, SimulationConfig};
use crate::validation::ValidationConfig;

/// Project-local config file name
pub const LOCAL_CONFIG: &str = ".signalpool.yml";

/// Main signalpool configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Concurrency and batching
    pub pool: PoolConfig,

    /// Scoring thresholds
    pub validation: ValidationConfig,

    /// Simulated processing step
    pub simulation: SimulationConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for candidate in Self::search_paths() {
            if candidate.exists() {
                match Self::load_from_file(&candidate) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", candidate.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is set up
    ///
    /// Errors are swallowed; a broken config file is reported properly by
    /// [`Config::load`] once logging exists.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let paths = match config_path {
            Some(path) => vec![path.clone()],
            None => Self::search_paths(),
        };

        paths
            .into_iter()
            .find(|p| p.exists())
            .and_then(|p| fs::read_to_string(p).ok())
            .and_then(|content| serde_yaml::from_str::<Self>(&content).ok())
            .and_then(|config| config.log_level)
    }

    /// Candidate config locations, most specific first
    fn search_paths() -> Vec<PathBuf> {
        // Project-local config, then ~/.config/signalpool/signalpool.yml
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("signalpool").join("signalpool.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, None);
        assert_eq!(config.pool.max_concurrency, 8);
        assert_eq!(config.validation.pass_score, 70);
        assert_eq!(config.simulation.failure_rate, 0.0);
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
log-level: DEBUG
pool:
  max-concurrency: 3
  task-timeout-ms: 500
validation:
  pass-score: 75
simulation:
  failure-rate: 0.25
"#
        )
        .unwrap();

        let path = file.path().to_path_buf();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("DEBUG"));
        assert_eq!(config.pool.max_concurrency, 3);
        assert_eq!(config.pool.batch_size, 5);
        assert_eq!(config.pool.task_timeout_ms, Some(500));
        assert_eq!(config.validation.pass_score, 75);
        assert_eq!(config.validation.min_confidence, 60.0);
        assert_eq!(config.simulation.failure_rate, 0.25);
        assert_eq!(config.simulation.max_delay_ms, 250);
    }

    #[test]
    fn test_load_explicit_missing_file_errors() {
        let path = PathBuf::from("/nonexistent/signalpool.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_invalid_yaml_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "pool: [not, a, map]").unwrap();

        let path = file.path().to_path_buf();
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_log_level() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "log-level: WARN").unwrap();

        let path = file.path().to_path_buf();
        assert_eq!(Config::load_log_level(Some(&path)).as_deref(), Some("WARN"));
    }

    #[test]
    fn test_load_log_level_ignores_bad_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{{{").unwrap();

        let path = file.path().to_path_buf();
        assert_eq!(Config::load_log_level(Some(&path)), None);
    }
}
