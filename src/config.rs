//! Dashboard Configuration
//! Optional JSON settings file; every field falls back to a default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "gdp_explorer.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// CSV with a `country` column and one column per year
    pub data_path: PathBuf,
    pub window_title: String,
    pub window_size: [f32; 2],
    /// Distance between labelled years under the range sliders
    pub year_mark_step: usize,
    /// Countries selected when the dashboard opens
    pub initial_countries: Vec<String>,
    /// PNG export size in pixels
    pub export_size: [u32; 2],
    pub open_after_export: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("gdp_pcap.csv"),
            window_title: "GDP Explorer".to_string(),
            window_size: [1400.0, 800.0],
            year_mark_step: 50,
            initial_countries: Vec::new(),
            export_size: [1400, 800],
            open_after_export: true,
        }
    }
}

impl DashboardConfig {
    /// Read a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Read `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let config = Self::from_file(path)?;
            info!(path = %path.display(), "loaded config");
            Ok(config)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.year_mark_step, 50);
        assert!(config.initial_countries.is_empty());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"data_path": "data/gdp.csv", "initial_countries": ["Chad", "Peru"]}}"#
        )
        .unwrap();

        let config = DashboardConfig::load_or_default(file.path()).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/gdp.csv"));
        assert_eq!(config.initial_countries, vec!["Chad", "Peru"]);
        assert_eq!(config.export_size, [1400, 800]);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            DashboardConfig::load_or_default(file.path()),
            Err(ConfigError::Json(_))
        ));
    }
}
