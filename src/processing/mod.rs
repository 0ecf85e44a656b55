//! Curve lookup and advisory speed computation

pub mod advisory;
pub mod database;
pub mod geo;

pub use advisory::{AdvisoryCalculator, Advisory, Evaluation};
pub use database::{CurveDatabase, MatchPolicy};
