//! Configuration management.
//!
//! Configuration lives at `<config dir>/dutyline/config.toml` and can be
//! pointed elsewhere per run with `--config`. Every field has a default,
//! so a missing file is not an error; command-line arguments take
//! precedence over anything configured here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DutylineError, Result};
use crate::export::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};
use crate::util::atomic_write;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Log input settings.
    #[serde(default)]
    pub input: InputConfig,
    /// Report output settings.
    #[serde(default)]
    pub output: OutputConfig,
    /// Chart rendering settings.
    #[serde(default)]
    pub chart: ChartConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns the built-in defaults when no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DutylineError::io(format!("failed to read config file: {}", path.display()), e)
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// Merge another config into this one (non-default values win).
    pub fn merge_from(&mut self, other: &Self) {
        if other.input.logfile != default_logfile() {
            self.input.logfile = other.input.logfile.clone();
        }
        if other.output.directory != default_output_directory() {
            self.output.directory = other.output.directory.clone();
        }
        if other.chart.width != DEFAULT_CHART_WIDTH {
            self.chart.width = other.chart.width;
        }
        if other.chart.height != DEFAULT_CHART_HEIGHT {
            self.chart.height = other.chart.height;
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific path.
    ///
    /// Uses an atomic write so a failed save never leaves a truncated
    /// config behind.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DutylineError::config(format!("failed to serialize config: {e}")))?;

        atomic_write(path, content.as_bytes())
    }
}

/// Log input settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputConfig {
    /// Log file analyzed when no path argument is given.
    #[serde(default = "default_logfile")]
    pub logfile: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            logfile: default_logfile(),
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory report artifacts are written into.
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

/// Chart rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartConfig {
    /// Raster width in pixels.
    #[serde(default = "default_chart_width")]
    pub width: u32,
    /// Raster height in pixels.
    #[serde(default = "default_chart_height")]
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

fn default_logfile() -> PathBuf {
    PathBuf::from(crate::DEFAULT_LOG_PATH)
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_chart_width() -> u32 {
    DEFAULT_CHART_WIDTH
}

fn default_chart_height() -> u32 {
    DEFAULT_CHART_HEIGHT
}

/// Default configuration file path.
pub fn default_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join("dutyline").join("config.toml"))
        .ok_or_else(|| DutylineError::config("cannot determine config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.input.logfile, PathBuf::from(crate::DEFAULT_LOG_PATH));
        assert_eq!(config.output.directory, PathBuf::from("."));
        assert_eq!(config.chart.width, DEFAULT_CHART_WIDTH);
        assert_eq!(config.chart.height, DEFAULT_CHART_HEIGHT);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.input.logfile = PathBuf::from("/tmp/heating.log");
        config.chart.width = 1200;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[chart]\nwidth = 1600\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.chart.width, 1600);
        assert_eq!(config.chart.height, DEFAULT_CHART_HEIGHT);
        assert_eq!(config.input.logfile, PathBuf::from(crate::DEFAULT_LOG_PATH));
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "chart = not valid").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, DutylineError::ConfigError { .. }));
        assert_eq!(err.exit_code(), crate::error::exit_codes::EXIT_CONFIG_ERROR);
    }

    #[test]
    fn test_merge_keeps_non_defaults() {
        let mut base = Config::default();
        base.output.directory = PathBuf::from("/srv/reports");

        let mut overlay = Config::default();
        overlay.chart.height = 900;

        base.merge_from(&overlay);
        assert_eq!(base.output.directory, PathBuf::from("/srv/reports"));
        assert_eq!(base.chart.height, 900);
    }
}
