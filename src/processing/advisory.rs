//! Advisory speed calculation for a position reading against the curve table

use crate::core::constants::{
    GRAVITY_MS2, KMH_PER_MS, SAFE_SPEED_INTERCEPT, SAFE_SPEED_RADIUS_COEFFICIENT, SAFE_SPEED_SCALE,
    SIDE_FRICTION_FACTOR,
};
use crate::core::PositionReading;
use crate::processing::database::{CurveDatabase, MatchPolicy};
use log::debug;
use serde::{Deserialize, Serialize};

/// Convert metres per second to kilometres per hour
pub fn speed_to_kmh(speed_ms: f64) -> f64 {
    speed_ms * KMH_PER_MS
}

/// Empirical safe speed for a curve of radius `radius_m`, in km/h
pub fn safe_speed_kmh(radius_m: f64) -> f64 {
    (SAFE_SPEED_INTERCEPT - SAFE_SPEED_RADIUS_COEFFICIENT / radius_m) * SAFE_SPEED_SCALE * KMH_PER_MS
}

/// Lateral-acceleration design speed for a curve of radius `radius_m`, in km/h
pub fn design_speed_kmh(radius_m: f64) -> f64 {
    (SIDE_FRICTION_FACTOR * GRAVITY_MS2 * radius_m).sqrt() * KMH_PER_MS
}

/// Outcome of the curve lookup for one reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Advisory {
    /// No curve record matches the reading
    NoMatch,
    /// A curve matched but has no surveyed radius
    Unavailable { record_index: usize },
    Computed {
        record_index: usize,
        radius_m: f64,
        safe_speed_kmh: f64,
        design_speed_kmh: f64,
        warning: bool,
    },
}

impl Advisory {
    pub fn is_match(&self) -> bool {
        !matches!(self, Advisory::NoMatch)
    }

    pub fn warning(&self) -> bool {
        matches!(self, Advisory::Computed { warning: true, .. })
    }
}

/// Result of evaluating one reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub latitude: f64,
    pub longitude: f64,
    /// Reported speed in m/s, zero when the fix carried none
    pub speed_ms: f64,
    pub speed_kmh: f64,
    pub advisory: Advisory,
}

/// Stateless calculator mapping readings to advisories
#[derive(Debug, Clone, Default)]
pub struct AdvisoryCalculator {
    policy: MatchPolicy,
}

impl AdvisoryCalculator {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    pub fn evaluate(&self, reading: &PositionReading, database: &CurveDatabase) -> Evaluation {
        let speed_ms = reading.speed_ms();
        let speed_kmh = speed_to_kmh(speed_ms);

        let advisory = match database.find(reading.latitude, reading.longitude, &self.policy) {
            None => Advisory::NoMatch,
            Some((record_index, record)) => match record.radius {
                None => Advisory::Unavailable { record_index },
                Some(radius_m) => {
                    let safe = safe_speed_kmh(radius_m);
                    let design = design_speed_kmh(radius_m);
                    Advisory::Computed {
                        record_index,
                        radius_m,
                        safe_speed_kmh: safe,
                        design_speed_kmh: design,
                        warning: safe > speed_kmh || design > speed_kmh,
                    }
                }
            },
        };

        debug!(
            "Reading ({}, {}) at {:.1} km/h -> {:?}",
            reading.latitude, reading.longitude, speed_kmh, advisory
        );

        Evaluation {
            latitude: reading.latitude,
            longitude: reading.longitude,
            speed_ms,
            speed_kmh,
            advisory,
        }
    }
}
