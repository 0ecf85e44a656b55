//! Latest-reading advisory pipeline
//!
//! Readings are submitted as they arrive and evaluated when the caller polls.
//! Only the newest pending reading is evaluated; readings superseded before
//! processing are dropped, and results older than what the display already
//! shows are refused.

use crate::api::types::{ApplyOutcome, DisplayState, Sequence};
use crate::core::{PositionReading, SpeedUnit};
use crate::processing::advisory::{AdvisoryCalculator, Evaluation};
use crate::processing::database::{CurveDatabase, MatchPolicy};
use crate::validation::data::DataValidator;
use crate::validation::error::AdvisorResult;
use log::{error, warn};

/// Handle returned for a submitted reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestHandle(Sequence);

impl RequestHandle {
    pub fn sequence(&self) -> Sequence {
        self.0
    }
}

/// Counters for the pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub submitted: u64,
    pub processed: u64,
    pub superseded: u64,
    pub stale_results: u64,
    pub reload_failures: u64,
}

/// A processed reading together with how the display took it
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedUpdate {
    pub handle: RequestHandle,
    pub evaluation: Evaluation,
    pub outcome: ApplyOutcome,
}

pub struct AdvisoryPipeline {
    calculator: AdvisoryCalculator,
    database: CurveDatabase,
    validator: DataValidator,
    display: DisplayState,
    unit: SpeedUnit,
    clear_on_no_match: bool,
    pending: Option<(RequestHandle, PositionReading)>,
    next_sequence: Sequence,
    stats: PipelineStats,
}

impl AdvisoryPipeline {
    pub fn new(database: CurveDatabase, policy: MatchPolicy) -> Self {
        Self {
            calculator: AdvisoryCalculator::new(policy),
            database,
            validator: DataValidator::new(),
            display: DisplayState::new(),
            unit: SpeedUnit::default(),
            clear_on_no_match: false,
            pending: None,
            next_sequence: 0,
            stats: PipelineStats::default(),
        }
    }

    pub fn with_unit(mut self, unit: SpeedUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_clear_on_no_match(mut self, clear: bool) -> Self {
        self.clear_on_no_match = clear;
        self
    }

    pub fn set_unit(&mut self, unit: SpeedUnit) {
        self.unit = unit;
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn database(&self) -> &CurveDatabase {
        &self.database
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Queue a reading, replacing any reading not yet processed
    pub fn submit(&mut self, reading: PositionReading) -> AdvisorResult<RequestHandle> {
        self.validator.validate_reading(&reading)?;

        self.next_sequence += 1;
        let handle = RequestHandle(self.next_sequence);
        self.stats.submitted += 1;

        if let Some((dropped, _)) = self.pending.replace((handle, reading)) {
            self.stats.superseded += 1;
            warn!(
                "Reading #{} superseded by #{} before evaluation",
                dropped.sequence(),
                handle.sequence()
            );
        }
        Ok(handle)
    }

    /// Evaluate the latest pending reading and write it to the display
    pub fn process(&mut self) -> Option<ProcessedUpdate> {
        let (handle, reading) = self.pending.take()?;
        let evaluation = self.calculator.evaluate(&reading, &self.database);
        let outcome = self.apply(handle, &evaluation);
        Some(ProcessedUpdate {
            handle,
            evaluation,
            outcome,
        })
    }

    /// Write a result computed elsewhere; older results than the display shows are refused
    pub fn apply(&mut self, handle: RequestHandle, evaluation: &Evaluation) -> ApplyOutcome {
        let outcome = self
            .display
            .apply(handle.sequence(), evaluation, self.unit, self.clear_on_no_match);
        if outcome == ApplyOutcome::Superseded {
            self.stats.stale_results += 1;
            warn!("Discarded stale result for reading #{}", handle.sequence());
        } else {
            self.stats.processed += 1;
        }
        outcome
    }

    /// Evaluate without touching the display
    pub fn evaluate(&self, reading: &PositionReading) -> Evaluation {
        self.calculator.evaluate(reading, &self.database)
    }

    /// Re-read the curve table. On failure the previous table and display stay as they were.
    pub fn reload_database(&mut self) -> AdvisorResult<()> {
        self.database.reload().map_err(|e| {
            self.stats.reload_failures += 1;
            error!("Keeping previous curve table: {}", e);
            e
        })
    }

    pub fn replace_database(&mut self, database: CurveDatabase) {
        self.database = database;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CurveRecord;
    use assert_fs::prelude::*;

    fn pipeline() -> AdvisoryPipeline {
        let database = CurveDatabase::from_records(vec![
            CurveRecord::new(22.523144, 75.924728, Some(200.0)),
            CurveRecord::new(22.6, 75.9, None),
        ])
        .unwrap();
        AdvisoryPipeline::new(database, MatchPolicy::Exact)
    }

    #[test]
    fn test_submit_and_process() {
        let mut pipeline = pipeline();
        let handle = pipeline
            .submit(PositionReading::new(22.523144, 75.924728, Some(60.0 / 3.6)))
            .unwrap();
        assert_eq!(handle.sequence(), 1);

        let update = pipeline.process().unwrap();
        assert_eq!(update.handle, handle);
        assert_eq!(update.outcome, ApplyOutcome::Updated);
        assert!(pipeline.display().has_warning());
        assert!(pipeline.process().is_none());
    }

    #[test]
    fn test_only_latest_reading_is_evaluated() {
        let mut pipeline = pipeline();
        pipeline.submit(PositionReading::new(22.523144, 75.924728, Some(10.0))).unwrap();
        let latest = pipeline.submit(PositionReading::new(22.6, 75.9, Some(30.0))).unwrap();

        let update = pipeline.process().unwrap();
        assert_eq!(update.handle, latest);
        assert_eq!(pipeline.display().safe_speed, "Safe Speed: N/A");
        assert_eq!(pipeline.display().current_speed, "108 km/h");

        let stats = pipeline.stats();
        assert_eq!(stats.submitted, 2);
        assert_eq!(stats.superseded, 1);
        assert_eq!(stats.processed, 1);
    }

    #[test]
    fn test_late_result_does_not_overwrite_newer() {
        let mut pipeline = pipeline();
        let older_reading = PositionReading::new(22.523144, 75.924728, Some(10.0));
        let older = pipeline.submit(older_reading.clone()).unwrap();
        let older_eval = pipeline.evaluate(&older_reading);

        pipeline.submit(PositionReading::new(22.523144, 75.924728, Some(25.0))).unwrap();
        pipeline.process().unwrap();
        assert!(!pipeline.display().has_warning());

        assert_eq!(pipeline.apply(older, &older_eval), ApplyOutcome::Superseded);
        assert!(!pipeline.display().has_warning());
        assert_eq!(pipeline.display().current_speed, "90 km/h");
        assert_eq!(pipeline.stats().stale_results, 1);
    }

    #[test]
    fn test_invalid_reading_is_rejected() {
        let mut pipeline = pipeline();
        assert!(pipeline.submit(PositionReading::new(120.0, 75.0, Some(1.0))).is_err());
        assert!(!pipeline.has_pending());
        assert_eq!(pipeline.stats().submitted, 0);
    }

    #[test]
    fn test_implausible_speeds_still_reach_display() {
        let mut pipeline = pipeline();
        pipeline.submit(PositionReading::new(1.0, 2.0, Some(160.0))).unwrap();
        let update = pipeline.process().unwrap();
        assert_eq!(update.outcome, ApplyOutcome::AdvisoryRetained);
        assert_eq!(pipeline.display().current_speed, "576 km/h");
        assert_eq!(pipeline.display().location, "Latitude: 1, Longitude: 2");

        pipeline.submit(PositionReading::new(22.523144, 75.924728, Some(-1.0))).unwrap();
        pipeline.process().unwrap();
        assert_eq!(pipeline.display().current_speed, "-4 km/h");
        assert_eq!(pipeline.display().radius, "Radius: 200");
    }

    #[test]
    fn test_no_match_leaves_advisory_stale() {
        let mut pipeline = pipeline();
        pipeline.submit(PositionReading::new(22.523144, 75.924728, Some(10.0))).unwrap();
        pipeline.process();
        let before = pipeline.display().clone();

        pipeline.submit(PositionReading::new(0.0, 0.0, Some(10.0))).unwrap();
        let update = pipeline.process().unwrap();
        assert_eq!(update.outcome, ApplyOutcome::AdvisoryRetained);
        assert_eq!(pipeline.display().safe_speed, before.safe_speed);
        assert_eq!(pipeline.display().design_speed, before.design_speed);
        assert_eq!(pipeline.display().warning, before.warning);
    }

    #[test]
    fn test_failed_reload_keeps_table_and_display() {
        let dir = assert_fs::TempDir::new().unwrap();
        let file = dir.child("database.json");
        file.write_str(r#"[{"latitude": 1.0, "longitude": 2.0, "radius": 200}]"#).unwrap();

        let database = CurveDatabase::load(file.path()).unwrap();
        let mut pipeline = AdvisoryPipeline::new(database, MatchPolicy::Exact);
        pipeline.submit(PositionReading::new(1.0, 2.0, Some(10.0))).unwrap();
        pipeline.process();
        let before = pipeline.display().clone();

        file.write_str("[{").unwrap();
        assert!(pipeline.reload_database().is_err());
        assert_eq!(pipeline.database().len(), 1);
        assert_eq!(pipeline.display(), &before);
        assert_eq!(pipeline.stats().reload_failures, 1);

        dir.close().unwrap();
    }
}
