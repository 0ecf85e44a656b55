//! Core data types for the curve advisor

use crate::core::constants::{KMH_PER_MS, MPH_PER_MS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One road curve from the curve database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveRecord {
    pub latitude: f64,
    pub longitude: f64,
    /// Physical curve radius in metres, if surveyed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl CurveRecord {
    pub fn new(latitude: f64, longitude: f64, radius: Option<f64>) -> Self {
        Self { latitude, longitude, radius }
    }
}

/// Position fix delivered by the location service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionReading {
    pub latitude: f64,
    pub longitude: f64,
    /// Ground speed in metres per second; absent when the fix carries none
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub timestamp_ms: u64,
}

impl PositionReading {
    pub fn new(latitude: f64, longitude: f64, speed: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
            speed,
            timestamp_ms: 0,
        }
    }

    pub fn with_timestamp(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    /// Speed in m/s, a missing value reads as standing still
    pub fn speed_ms(&self) -> f64 {
        self.speed.unwrap_or(0.0)
    }
}

/// Unit used for the current speed readout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedUnit {
    Mph,
    #[default]
    Kmh,
}

impl SpeedUnit {
    /// Multiplier converting m/s into this unit
    pub fn factor(self) -> f64 {
        match self {
            SpeedUnit::Mph => MPH_PER_MS,
            SpeedUnit::Kmh => KMH_PER_MS,
        }
    }

    pub fn convert(self, speed_ms: f64) -> f64 {
        speed_ms * self.factor()
    }

    pub fn label(self) -> &'static str {
        match self {
            SpeedUnit::Mph => "mph",
            SpeedUnit::Kmh => "km/h",
        }
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpeedUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mph" => Ok(SpeedUnit::Mph),
            "kmh" | "km/h" => Ok(SpeedUnit::Kmh),
            other => Err(format!("unknown speed unit '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_speed_reads_as_zero() {
        let reading = PositionReading::new(22.5, 75.9, None);
        assert_eq!(reading.speed_ms(), 0.0);
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(SpeedUnit::Kmh.convert(10.0), 36.0);
        assert!((SpeedUnit::Mph.convert(10.0) - 22.3694).abs() < 1e-9);
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("MPH".parse::<SpeedUnit>().unwrap(), SpeedUnit::Mph);
        assert_eq!("km/h".parse::<SpeedUnit>().unwrap(), SpeedUnit::Kmh);
        assert!("knots".parse::<SpeedUnit>().is_err());
    }

    #[test]
    fn test_record_without_radius_deserializes() {
        let record: CurveRecord =
            serde_json::from_str(r#"{"latitude": 22.523144, "longitude": 75.924728}"#).unwrap();
        assert_eq!(record.radius, None);
    }
}
