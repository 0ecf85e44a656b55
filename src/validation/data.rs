//! Range checks for curve records and position readings

use crate::core::{CurveRecord, PositionReading};
use crate::validation::error::{AdvisorError, AdvisorResult};
use log::warn;

/// Bounds applied when validating records and readings
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Ground speed above which a reading is logged as implausible (m/s)
    pub max_speed_ms: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_speed_ms: 150.0, // 540 km/h
        }
    }
}

/// Checks curve records and position readings before they reach the calculator
#[derive(Debug, Clone, Default)]
pub struct DataValidator {
    config: ValidationConfig,
}

impl DataValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate one curve record's coordinates; `index` is its position in the database
    pub fn validate_record(&self, index: usize, record: &CurveRecord) -> AdvisorResult<()> {
        check_coordinates(record.latitude, record.longitude)
            .map_err(|reason| AdvisorError::InvalidRecord { index, reason })
    }

    /// Radius usable for the advisory formulas, or `None` when absent or degenerate
    pub fn usable_radius(&self, index: usize, record: &CurveRecord) -> Option<f64> {
        match record.radius {
            Some(radius) if radius.is_finite() && radius > 0.0 => Some(radius),
            Some(radius) => {
                warn!("Curve record #{} has unusable radius {}; treating it as absent", index, radius);
                None
            }
            None => None,
        }
    }

    /// Validate a whole database, stopping at the first record with bad coordinates.
    /// Records keep their order; a degenerate radius is dropped from its record only.
    pub fn validate_records(&self, records: Vec<CurveRecord>) -> AdvisorResult<Vec<CurveRecord>> {
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| -> AdvisorResult<CurveRecord> {
                self.validate_record(index, &record)?;
                let radius = self.usable_radius(index, &record);
                Ok(CurveRecord { radius, ..record })
            })
            .collect()
    }

    /// Reject readings that cannot be evaluated. Implausible speeds are only logged.
    pub fn validate_reading(&self, reading: &PositionReading) -> AdvisorResult<()> {
        check_coordinates(reading.latitude, reading.longitude)
            .map_err(|reason| AdvisorError::InvalidReading { reason })?;

        if let Some(speed) = reading.speed {
            if !speed.is_finite() {
                return Err(AdvisorError::InvalidReading {
                    reason: format!("speed is not finite: {}", speed),
                });
            }
            if speed < 0.0 {
                warn!("Negative speed {} m/s reported", speed);
            } else if speed > self.config.max_speed_ms {
                warn!(
                    "Speed {} m/s exceeds plausible limit of {} m/s",
                    speed, self.config.max_speed_ms
                );
            }
        }

        Ok(())
    }
}

fn check_coordinates(latitude: f64, longitude: f64) -> Result<(), String> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(format!("latitude {} outside [-90, 90]", latitude));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(format!("longitude {} outside [-180, 180]", longitude));
    }
    Ok(())
}
