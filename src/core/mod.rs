//! Core types and constants for the curve advisor

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
