//! Curve table loading, reloading and first-match lookup

use crate::core::CurveRecord;
use crate::processing::geo::local_distance_m;
use crate::validation::data::DataValidator;
use crate::validation::error::{AdvisorError, AdvisorResult};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How a reading's coordinates are compared against curve records.
/// Every policy returns the first record in database order that satisfies it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Bit-for-bit floating point equality of latitude and longitude
    #[default]
    Exact,
    /// Both coordinates within `degrees` of the record
    Tolerance { degrees: f64 },
    /// Record within `max_distance_m` metres on the local tangent plane
    Proximity { max_distance_m: f64 },
}

impl MatchPolicy {
    pub fn matches(&self, record: &CurveRecord, latitude: f64, longitude: f64) -> bool {
        match *self {
            MatchPolicy::Exact => record.latitude == latitude && record.longitude == longitude,
            MatchPolicy::Tolerance { degrees } => {
                (record.latitude - latitude).abs() <= degrees
                    && (record.longitude - longitude).abs() <= degrees
            }
            MatchPolicy::Proximity { max_distance_m } => {
                local_distance_m((latitude, longitude), (record.latitude, record.longitude))
                    <= max_distance_m
            }
        }
    }

    pub fn validate(&self) -> AdvisorResult<()> {
        let (parameter, value) = match *self {
            MatchPolicy::Exact => return Ok(()),
            MatchPolicy::Tolerance { degrees } => ("match_policy.degrees", degrees),
            MatchPolicy::Proximity { max_distance_m } => ("match_policy.max_distance_m", max_distance_m),
        };
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(AdvisorError::Configuration {
                parameter: parameter.to_string(),
                value: value.to_string(),
                reason: "must be a finite, non-negative number".to_string(),
            })
        }
    }
}

/// Immutable, ordered table of curve records loaded once from a JSON array
#[derive(Debug, Clone, Default)]
pub struct CurveDatabase {
    records: Vec<CurveRecord>,
    source: Option<PathBuf>,
}

impl CurveDatabase {
    pub fn from_records(records: Vec<CurveRecord>) -> AdvisorResult<Self> {
        let records = DataValidator::new().validate_records(records)?;
        Ok(Self { records, source: None })
    }

    /// Parse a JSON array of `{latitude, longitude, radius?}` objects
    pub fn from_json_str(json: &str) -> AdvisorResult<Self> {
        Self::parse(json, "<inline>")
    }

    /// Load the table from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> AdvisorResult<Self> {
        let path = path.as_ref();
        let path_str = path.to_string_lossy().to_string();

        let content = fs::read_to_string(path).map_err(|e| AdvisorError::Io {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        let mut database = Self::parse(&content, &path_str)?;
        database.source = Some(path.to_path_buf());
        info!("Loaded {} curve records from {}", database.len(), path_str);
        Ok(database)
    }

    fn parse(json: &str, source_name: &str) -> AdvisorResult<Self> {
        let records: Vec<CurveRecord> = serde_json::from_str(json).map_err(|e| AdvisorError::Parse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
        Self::from_records(records)
    }

    /// Re-read the table from the file it was loaded from.
    /// On failure the current records are kept and the error is returned.
    pub fn reload(&mut self) -> AdvisorResult<()> {
        let path = self.source.clone().ok_or_else(|| AdvisorError::Io {
            path: "<none>".to_string(),
            message: "database was not loaded from a file".to_string(),
        })?;

        match Self::load(&path) {
            Ok(fresh) => {
                *self = fresh;
                Ok(())
            }
            Err(e) => {
                error!("Error loading the database: {}", e);
                Err(e)
            }
        }
    }

    /// First record matching the coordinates under `policy`, with its index
    pub fn find(&self, latitude: f64, longitude: f64, policy: &MatchPolicy) -> Option<(usize, &CurveRecord)> {
        let found = self
            .records
            .iter()
            .enumerate()
            .find(|(_, record)| policy.matches(record, latitude, longitude));

        if let Some((index, _)) = found {
            debug!("Curve #{} matches ({}, {})", index, latitude, longitude);
        }
        found
    }

    pub fn records(&self) -> &[CurveRecord] {
        &self.records
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
