//! Dashboard session state
//!
//! Holds the selected readout unit together with the location watch and wake
//! lock acquired while the speedometer is running. Both handles are scoped:
//! stopping the session, or dropping it, releases them.

use crate::core::{PositionReading, SpeedUnit};
use crate::hardware::{LocationProvider, WakeLockGuard, WakeLockProvider, WatchGuard, WatchOptions};
use crate::validation::error::AdvisorResult;
use log::{info, warn};

/// Whether the speedometer is tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
}

impl SessionState {
    /// Label of the start/stop control
    pub fn button_label(self) -> &'static str {
        match self {
            SessionState::Idle => "Start",
            SessionState::Running => "Stop",
        }
    }
}

pub struct Session<L: LocationProvider, W: WakeLockProvider> {
    location: L,
    wake_locks: W,
    unit: SpeedUnit,
    options: WatchOptions,
    watch: Option<WatchGuard<L>>,
    wake_lock: Option<WakeLockGuard<W>>,
}

impl<L: LocationProvider, W: WakeLockProvider> Session<L, W> {
    pub fn new(location: L, wake_locks: W, unit: SpeedUnit) -> Self {
        Self {
            location,
            wake_locks,
            unit,
            options: WatchOptions::default(),
            watch: None,
            wake_lock: None,
        }
    }

    pub fn with_options(mut self, options: WatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> SessionState {
        if self.watch.is_some() {
            SessionState::Running
        } else {
            SessionState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.watch.is_some()
    }

    pub fn unit(&self) -> SpeedUnit {
        self.unit
    }

    /// Select the readout unit; returns false when it was already selected
    pub fn select_unit(&mut self, unit: SpeedUnit) -> bool {
        if self.unit == unit {
            return false;
        }
        info!("Readout unit changed to {}", unit);
        self.unit = unit;
        true
    }

    /// Start tracking. The location watch is required; the wake lock is best effort.
    pub fn start(&mut self) -> AdvisorResult<()> {
        if self.is_running() {
            return Ok(());
        }

        self.watch = Some(WatchGuard::acquire(&self.location, self.options)?);

        match WakeLockGuard::acquire(&self.wake_locks) {
            Ok(guard) => self.wake_lock = Some(guard),
            Err(e) => warn!("Continuing without wake lock: {}", e),
        }

        info!("Session started");
        Ok(())
    }

    /// Stop tracking and release the watch and wake lock
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.wake_lock = None;
        self.watch = None;
        info!("Session stopped");
    }

    /// Start when idle, stop when running
    pub fn toggle(&mut self) -> AdvisorResult<SessionState> {
        if self.is_running() {
            self.stop();
        } else {
            self.start()?;
        }
        Ok(self.state())
    }

    pub fn has_wake_lock(&self) -> bool {
        self.wake_lock.is_some()
    }

    /// Next reading from the active watch
    pub fn poll_reading(&self) -> Option<PositionReading> {
        self.watch.as_ref().and_then(WatchGuard::poll)
    }
}
