//! Curve Speed Advisor
//!
//! Converts live position readings into a speedometer readout and, when the
//! vehicle is on a known road curve, advisory safe and design speeds with an
//! over-limit warning.

pub mod core;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod hardware;
pub mod api;

// Re-export commonly used types
pub use self::core::{CurveRecord, PositionReading, SpeedUnit};
pub use processing::advisory::{design_speed_kmh, safe_speed_kmh, speed_to_kmh};
pub use processing::{Advisory, AdvisoryCalculator, CurveDatabase, Evaluation, MatchPolicy};
pub use validation::{AdvisorError, AdvisorResult, DataValidator};
pub use utils::{AdvisorConfig, ConfigurationManager};
pub use api::{
    AdvisoryPipeline, DisplayFormatter, DisplayState, OutputFormat, Session, SessionState, Theme,
    ThemeController,
};
