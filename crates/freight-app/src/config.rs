//! Configuration management for freight-rate
//!
//! Config stored at: ~/.config/freight-rate/config.json

use freight_domain::service::DEFAULT_VOLUMETRIC_DIVISOR;
use freight_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Pricing dataset file (TOML or JSON). Built-in rates when unset.
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,

    /// Rate matrix CSV replacing the vehicle price tables of the dataset
    #[serde(default)]
    pub rate_matrix_path: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Volumetric divisor in cm³ per kg
    #[serde(default = "default_volumetric_divisor")]
    pub volumetric_divisor: f64,

    /// Worker threads for batch quoting. 0 = CPU count.
    #[serde(default = "default_batch_jobs")]
    pub batch_jobs: usize,
}

fn default_volumetric_divisor() -> f64 {
    DEFAULT_VOLUMETRIC_DIVISOR
}

fn default_batch_jobs() -> usize {
    4
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: None,
            rate_matrix_path: None,
            output_format: OutputFormat::default(),
            volumetric_divisor: default_volumetric_divisor(),
            batch_jobs: default_batch_jobs(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("freight-rate");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Batch worker count with 0 resolved by the caller-supplied CPU count
    pub fn resolved_jobs(&self, cpus: usize) -> usize {
        if self.batch_jobs == 0 {
            cpus.max(1)
        } else {
            self.batch_jobs
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Freight Rate Configuration")?;
        writeln!(f, "==========================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Dataset:            {}",
            self.dataset_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string())
        )?;
        writeln!(
            f,
            "Rate matrix:        {}",
            self.rate_matrix_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        )?;
        writeln!(f, "Output format:      {}", self.output_format)?;
        writeln!(f, "Volumetric divisor: {}", self.volumetric_divisor)?;
        writeln!(f, "Batch jobs:         {}", self.batch_jobs)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:        {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_types::Error;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.volumetric_divisor, 5000.0);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            dataset_path: Some(PathBuf::from("/data/rates.toml")),
            output_format: OutputFormat::Json,
            batch_jobs: 8,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"output_format": "json"}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.batch_jobs, 4);
        assert!(config.dataset_path.is_none());
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_resolved_jobs() {
        let mut config = Config::default();
        assert_eq!(config.resolved_jobs(16), 4);
        config.batch_jobs = 0;
        assert_eq!(config.resolved_jobs(16), 16);
        assert_eq!(config.resolved_jobs(0), 1);
    }

    #[test]
    fn test_display_mentions_builtin() {
        let text = Config::default().to_string();
        assert!(text.contains("(built-in)"));
        assert!(text.contains("table"));
    }
}
