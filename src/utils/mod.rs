//! Utility modules

pub mod config;

pub use config::{AdvisorConfig, ConfigurationManager, LogLevel};
