//! Data validation and error types

pub mod data;
pub mod error;

pub use data::{DataValidator, ValidationConfig};
pub use error::{AdvisorError, AdvisorResult};
