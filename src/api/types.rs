//! Display state and common API types

use crate::core::SpeedUnit;
use crate::processing::advisory::{Advisory, Evaluation};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const NOT_AVAILABLE: &str = "N/A";
pub const WARNING_TEXT: &str = "Warning: Speed Limit Exceeded!";

/// Sequence number assigned to each submitted reading
pub type Sequence = u64;

/// The display fields rendered by the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    pub current_speed: String,
    pub location: String,
    pub radius: String,
    pub safe_speed: String,
    pub design_speed: String,
    pub warning: String,
    /// Sequence of the last evaluation written to the display
    #[serde(skip)]
    last_sequence: Option<Sequence>,
}

/// What happened when an evaluation was offered to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Speed, location and advisory fields were written
    Updated,
    /// Speed and location written, advisory fields left as they were
    AdvisoryRetained,
    /// Speed and location written, advisory fields blanked
    AdvisoryCleared,
    /// A newer evaluation was already shown; nothing written
    Superseded,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_sequence(&self) -> Option<Sequence> {
        self.last_sequence
    }

    pub fn has_warning(&self) -> bool {
        !self.warning.is_empty()
    }

    /// Write an evaluation to the display fields.
    ///
    /// Evaluations older than the last applied one are dropped so a slow
    /// result can never overwrite a newer reading. A reading that matches no
    /// curve updates speed and location only, unless `clear_on_no_match` is set.
    pub fn apply(
        &mut self,
        sequence: Sequence,
        evaluation: &Evaluation,
        unit: SpeedUnit,
        clear_on_no_match: bool,
    ) -> ApplyOutcome {
        if matches!(self.last_sequence, Some(last) if sequence < last) {
            return ApplyOutcome::Superseded;
        }
        self.last_sequence = Some(sequence);

        self.current_speed = format_speed(unit.convert(evaluation.speed_ms), unit);
        self.location = format!(
            "Latitude: {}, Longitude: {}",
            evaluation.latitude, evaluation.longitude
        );

        match &evaluation.advisory {
            Advisory::NoMatch if clear_on_no_match => {
                self.clear_advisory();
                ApplyOutcome::AdvisoryCleared
            }
            Advisory::NoMatch => ApplyOutcome::AdvisoryRetained,
            Advisory::Unavailable { .. } => {
                self.radius = format!("Radius: {}", NOT_AVAILABLE);
                self.safe_speed = format!("Safe Speed: {}", NOT_AVAILABLE);
                self.design_speed = format!("Design Speed: {}", NOT_AVAILABLE);
                self.warning.clear();
                ApplyOutcome::Updated
            }
            Advisory::Computed {
                radius_m,
                safe_speed_kmh,
                design_speed_kmh,
                warning,
                ..
            } => {
                self.radius = format!("Radius: {}", radius_m);
                self.safe_speed = format!("Safe Speed: {}", format_speed(*safe_speed_kmh, SpeedUnit::Kmh));
                self.design_speed =
                    format!("Design Speed: {}", format_speed(*design_speed_kmh, SpeedUnit::Kmh));
                if *warning {
                    self.warning = WARNING_TEXT.to_string();
                } else {
                    self.warning.clear();
                }
                ApplyOutcome::Updated
            }
        }
    }

    fn clear_advisory(&mut self) {
        self.radius.clear();
        self.safe_speed.clear();
        self.design_speed.clear();
        self.warning.clear();
    }

    /// Non-empty fields in display order
    pub fn lines(&self) -> Vec<&str> {
        [
            &self.current_speed,
            &self.location,
            &self.radius,
            &self.safe_speed,
            &self.design_speed,
            &self.warning,
        ]
        .into_iter()
        .map(String::as_str)
        .filter(|line| !line.is_empty())
        .collect()
    }
}

/// Round to the nearest whole unit for display, halves toward positive infinity
pub fn format_speed(value: f64, unit: SpeedUnit) -> String {
    format!("{} {}", (value + 0.5).floor() as i64, unit.label())
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One display field per line
    #[default]
    Text,
    /// Display fields and evaluation as a JSON object
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}
