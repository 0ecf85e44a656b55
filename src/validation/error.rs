//! Error types for the curve advisor

use std::fmt;

/// Errors raised while loading data, validating input or driving platform services
#[derive(Debug, Clone, PartialEq)]
pub enum AdvisorError {
    /// Resource could not be read
    Io { path: String, message: String },
    /// Resource is not valid JSON of the expected shape
    Parse { source_name: String, message: String },
    /// A curve record failed validation
    InvalidRecord { index: usize, reason: String },
    /// A position reading failed validation
    InvalidReading { reason: String },
    /// Invalid configuration value
    Configuration { parameter: String, value: String, reason: String },
    /// A platform service (location, wake lock, light sensor) failed
    Platform { service: String, details: String },
}

impl fmt::Display for AdvisorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisorError::Io { path, message } => {
                write!(f, "Failed to read '{}': {}", path, message)
            }
            AdvisorError::Parse { source_name, message } => {
                write!(f, "Failed to parse '{}': {}", source_name, message)
            }
            AdvisorError::InvalidRecord { index, reason } => {
                write!(f, "Invalid curve record #{}: {}", index, reason)
            }
            AdvisorError::InvalidReading { reason } => {
                write!(f, "Invalid position reading: {}", reason)
            }
            AdvisorError::Configuration { parameter, value, reason } => {
                write!(f, "Invalid parameter '{}' = '{}': {}", parameter, value, reason)
            }
            AdvisorError::Platform { service, details } => {
                write!(f, "{} unavailable: {}", service, details)
            }
        }
    }
}

impl std::error::Error for AdvisorError {}

/// Result type for curve advisor operations
pub type AdvisorResult<T> = Result<T, AdvisorError>;

impl AdvisorError {
    /// Errors after which the previous display state must be kept as-is
    pub fn leaves_display_stale(&self) -> bool {
        matches!(
            self,
            AdvisorError::Io { .. } | AdvisorError::Parse { .. } | AdvisorError::InvalidRecord { .. }
        )
    }
}
