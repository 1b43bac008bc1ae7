//! Configuration management for tegraplot
//!
//! Input/output directories, the synthetic sampling interval and chart
//! dimensions. Values come from `Config::default()`, an optional TOML file and
//! finally command-line overrides.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default directory scanned for `*_stats.log` files
pub const DEFAULT_STATS_DIR: &str = "stats";

/// Default directory charts are written to
pub const DEFAULT_PLOTS_DIR: &str = "plots";

/// Largest accepted sampling interval (one day)
pub const MAX_SAMPLE_INTERVAL_MS: u64 = 86_400_000;

/// tegraplot configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input/output and sampling options
    pub general: GeneralConfig,
    /// Chart options
    pub chart: ChartConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory containing `*_stats.log` files
    pub stats_dir: PathBuf,
    /// Directory charts are written to
    pub plots_dir: PathBuf,
    /// Assumed time between two tegrastats samples in milliseconds
    pub sample_interval_ms: u64,
}

/// Chart configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            stats_dir: PathBuf::from(DEFAULT_STATS_DIR),
            plots_dir: PathBuf::from(DEFAULT_PLOTS_DIR),
            sample_interval_ms: crate::series::DEFAULT_SAMPLE_INTERVAL_MS,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 1000,
        }
    }
}

impl Config {
    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Other(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject values that would produce a degenerate time axis or image
    pub fn validate(&self) -> Result<()> {
        let interval = self.general.sample_interval_ms;
        if interval == 0 || interval > MAX_SAMPLE_INTERVAL_MS {
            return Err(Error::Config(format!(
                "sample_interval_ms must be between 1 and {}, got {}",
                MAX_SAMPLE_INTERVAL_MS, interval
            )));
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(Error::Config(format!(
                "invalid chart size {}x{}",
                self.chart.width, self.chart.height
            )));
        }
        Ok(())
    }

    /// Sampling interval as a chrono duration
    pub fn sample_interval(&self) -> Result<chrono::Duration> {
        let ms = self.general.sample_interval_ms;
        if ms == 0 || ms > MAX_SAMPLE_INTERVAL_MS {
            return Err(Error::InvalidValue(format!(
                "sample interval of {} ms is out of range",
                ms
            )));
        }
        // bounded above, so the cast cannot wrap
        Ok(chrono::Duration::milliseconds(ms as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.stats_dir, PathBuf::from("stats"));
        assert_eq!(config.general.plots_dir, PathBuf::from("plots"));
        assert_eq!(config.general.sample_interval_ms, 500);
        assert_eq!(
            config.sample_interval().unwrap(),
            chrono::Duration::milliseconds(500)
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(
            config.general.sample_interval_ms,
            deserialized.general.sample_interval_ms
        );
        assert_eq!(config.chart.width, deserialized.chart.width);
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str("[general]\nsample_interval_ms = 1000\n").unwrap();
        assert_eq!(config.general.sample_interval_ms, 1000);
        assert_eq!(config.general.plots_dir, PathBuf::from("plots"));
        assert_eq!(config.chart.height, 1000);
    }

    #[test]
    fn test_load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tegraplot.toml");

        let mut config = Config::default();
        config.general.stats_dir = PathBuf::from("/data/runs");
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.general.stats_dir, PathBuf::from("/data/runs"));
    }

    #[test]
    fn test_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");

        std::fs::write(&path, "[general]\nsample_interval_ms = 0\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));

        std::fs::write(&path, "[general]\nsample_interval_ms = 10000000000000000\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));

        std::fs::write(&path, "general = 3").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Parse(_))));
    }

    #[test]
    fn test_interval_bounds() {
        let mut config = Config::default();

        config.general.sample_interval_ms = MAX_SAMPLE_INTERVAL_MS;
        assert!(config.validate().is_ok());
        assert_eq!(
            config.sample_interval().unwrap(),
            chrono::Duration::days(1)
        );

        for ms in [0, MAX_SAMPLE_INTERVAL_MS + 1, 10_000_000_000_000_000, u64::MAX] {
            config.general.sample_interval_ms = ms;
            assert!(matches!(config.validate(), Err(Error::Config(_))));
            assert!(matches!(
                config.sample_interval(),
                Err(Error::InvalidValue(_))
            ));
        }
    }
}
