//! Configuration
//!
//! Serializable settings for rendering calibration reports, and the JSON IO shared by every
//! config struct in the crate.
use crate::constants::{DEFAULT_N_BINS, DEFAULT_PLOT_HEIGHT, DEFAULT_PLOT_WIDTH};
use crate::errors::CalibError;
use crate::utils::validate_n_bins;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_n_bins() -> usize {
    DEFAULT_N_BINS
}
fn default_width() -> u32 {
    DEFAULT_PLOT_WIDTH
}
fn default_height() -> u32 {
    DEFAULT_PLOT_HEIGHT
}

/// Settings for [`crate::plotting::save_calibration_report`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Number of equal-width confidence bins.
    #[serde(default = "default_n_bins")]
    pub n_bins: usize,
    /// Width of the whole report in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Height of the whole report in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            n_bins: DEFAULT_N_BINS,
            width: DEFAULT_PLOT_WIDTH,
            height: DEFAULT_PLOT_HEIGHT,
        }
    }
}

impl PlotConfig {
    /// Set the number of bins.
    /// * `n_bins` - Number of equal-width bins over [0, 1], must be at least 1.
    pub fn set_n_bins(mut self, n_bins: usize) -> Self {
        self.n_bins = n_bins;
        self
    }

    /// Set the size of the rendered report.
    pub fn set_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Parameter checks run after a config is loaded from json.
pub trait Validate {
    fn validate(&self) -> Result<(), CalibError>;
}

impl Validate for PlotConfig {
    fn validate(&self) -> Result<(), CalibError> {
        validate_n_bins(self.n_bins)?;
        if self.width == 0 || self.height == 0 {
            return Err(CalibError::InvalidParameter(
                "width/height".to_string(),
                "positive pixel dimensions".to_string(),
                format!("{}x{}", self.width, self.height),
            ));
        }
        Ok(())
    }
}

/// IO
pub trait ConfigIO: Serialize + DeserializeOwned + Validate + Sized {
    /// Save a config as a json object to a file.
    ///
    /// * `path` - Path to save config.
    fn save_config<P: AsRef<Path>>(&self, path: P) -> Result<(), CalibError> {
        fs::write(path, self.json_dump()?).map_err(|e| CalibError::UnableToWrite(e.to_string()))
    }

    /// Dump a config as a json object
    fn json_dump(&self) -> Result<String, CalibError> {
        serde_json::to_string(self).map_err(|e| CalibError::UnableToWrite(e.to_string()))
    }

    /// Load a config from Json string
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, CalibError> {
        let config = serde_json::from_str::<Self>(json_str).map_err(|e| CalibError::UnableToRead(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a path to a json object.
    ///
    /// * `path` - Path to load config from.
    fn load_config<P: AsRef<Path>>(path: P) -> Result<Self, CalibError> {
        let json_str = fs::read_to_string(path).map_err(|e| CalibError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl ConfigIO for PlotConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_plot_config_default() {
        let config = PlotConfig::default();
        assert_eq!(config.n_bins, 10);
        assert_eq!(config.width, DEFAULT_PLOT_WIDTH);
        assert_eq!(config.height, DEFAULT_PLOT_HEIGHT);
    }

    #[test]
    fn test_plot_config_setters() {
        let config = PlotConfig::default().set_n_bins(15).set_size(800, 400);
        assert_eq!(config.n_bins, 15);
        assert_eq!((config.width, config.height), (800, 400));
    }

    #[test]
    fn test_config_io_json() {
        let config = PlotConfig::default().set_n_bins(20);
        let json = config.json_dump().unwrap();
        let config2 = PlotConfig::from_json(&json).unwrap();
        assert_eq!(config, config2);
    }

    #[test]
    fn test_config_io_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("plot.json");
        let config = PlotConfig::default().set_size(640, 480);
        config.save_config(&file_path).unwrap();
        let config2 = PlotConfig::load_config(&file_path).unwrap();
        assert_eq!(config, config2);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = PlotConfig::from_json(r#"{"n_bins": 5}"#).unwrap();
        assert_eq!(config.n_bins, 5);
        assert_eq!(config.width, DEFAULT_PLOT_WIDTH);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            PlotConfig::from_json(r#"{"n_bins": 0}"#),
            Err(CalibError::InvalidParameter(..))
        ));
        assert!(matches!(
            PlotConfig::from_json(r#"{"width": 0}"#),
            Err(CalibError::InvalidParameter(..))
        ));
        assert!(matches!(PlotConfig::from_json("not json"), Err(CalibError::UnableToRead(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            PlotConfig::load_config(dir.path().join("absent.json")),
            Err(CalibError::UnableToRead(_))
        ));
    }
}
