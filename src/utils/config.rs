//! Advisor configuration and its JSON-backed manager

use crate::core::constants::{AMBIENT_SENSOR_FREQUENCY_HZ, DARK_THEME_THRESHOLD_LUX};
use crate::core::SpeedUnit;
use crate::processing::database::MatchPolicy;
use crate::validation::error::{AdvisorError, AdvisorResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration, every field optional in the JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Curve database file
    pub database_path: PathBuf,
    /// Unit of the current speed readout
    pub readout_unit: SpeedUnit,
    /// Coordinate matching policy for curve lookup
    pub match_policy: MatchPolicy,
    /// Blank advisory fields when a reading matches no curve
    pub clear_on_no_match: bool,
    /// Illuminance below which the dark theme is used (lux)
    pub dark_threshold_lux: f64,
    /// Ambient light sensor sampling frequency (Hz)
    pub sensor_frequency_hz: f64,
    /// Request high accuracy location fixes
    pub high_accuracy: bool,
    /// Log level used when RUST_LOG is not set
    pub log_level: LogLevel,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("database.json"),
            readout_unit: SpeedUnit::Kmh,
            match_policy: MatchPolicy::Exact,
            clear_on_no_match: false,
            dark_threshold_lux: DARK_THEME_THRESHOLD_LUX,
            sensor_frequency_hz: AMBIENT_SENSOR_FREQUENCY_HZ,
            high_accuracy: true,
            log_level: LogLevel::Info,
        }
    }
}

/// Logging levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Loads, validates and saves the advisor configuration
#[derive(Debug, Default)]
pub struct ConfigurationManager {
    config: AdvisorConfig,
    config_file_path: Option<PathBuf>,
    is_modified: bool,
}

impl ConfigurationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> AdvisorResult<Self> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Replace the configuration after validating it
    pub fn update_config(&mut self, config: AdvisorConfig) -> AdvisorResult<()> {
        Self::validate(&config)?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> AdvisorResult<()> {
        let path = path.as_ref();
        let path_str = path.to_string_lossy().to_string();

        let content = fs::read_to_string(path).map_err(|e| AdvisorError::Io {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        let config: AdvisorConfig = serde_json::from_str(&content).map_err(|e| AdvisorError::Parse {
            source_name: path_str,
            message: e.to_string(),
        })?;

        Self::validate(&config)?;

        self.config = config;
        self.config_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> AdvisorResult<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(&self.config).map_err(|e| AdvisorError::Parse {
            source_name: "configuration".to_string(),
            message: e.to_string(),
        })?;

        fs::write(path, content).map_err(|e| AdvisorError::Io {
            path: path.to_string_lossy().to_string(),
            message: e.to_string(),
        })?;

        self.config_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn config_file_path(&self) -> Option<&Path> {
        self.config_file_path.as_deref()
    }

    /// Select the readout unit; returns the previous one
    pub fn set_readout_unit(&mut self, unit: SpeedUnit) -> SpeedUnit {
        let old = self.config.readout_unit;
        if old != unit {
            self.config.readout_unit = unit;
            self.is_modified = true;
        }
        old
    }

    pub fn set_match_policy(&mut self, policy: MatchPolicy) -> AdvisorResult<MatchPolicy> {
        policy.validate()?;
        let old = self.config.match_policy;
        self.config.match_policy = policy;
        self.is_modified = true;
        Ok(old)
    }

    pub fn validate(config: &AdvisorConfig) -> AdvisorResult<()> {
        config.match_policy.validate()?;

        if !config.dark_threshold_lux.is_finite() || config.dark_threshold_lux < 0.0 {
            return Err(AdvisorError::Configuration {
                parameter: "dark_threshold_lux".to_string(),
                value: config.dark_threshold_lux.to_string(),
                reason: "must be a non-negative illuminance".to_string(),
            });
        }

        if !config.sensor_frequency_hz.is_finite() || config.sensor_frequency_hz <= 0.0 {
            return Err(AdvisorError::Configuration {
                parameter: "sensor_frequency_hz".to_string(),
                value: config.sensor_frequency_hz.to_string(),
                reason: "must be positive".to_string(),
            });
        }

        if config.database_path.as_os_str().is_empty() {
            return Err(AdvisorError::Configuration {
                parameter: "database_path".to_string(),
                value: String::new(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
