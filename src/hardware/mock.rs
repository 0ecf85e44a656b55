//! Mock platform services for testing and replays

use crate::core::PositionReading;
use crate::hardware::services::{
    LightSensor, LocationProvider, PermissionState, WakeLockId, WakeLockProvider, WatchId,
    WatchOptions,
};
use crate::validation::error::{AdvisorError, AdvisorResult};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct LocationState {
    queue: VecDeque<PositionReading>,
    active: Option<WatchId>,
    last_options: Option<WatchOptions>,
    next_id: u32,
    unavailable: bool,
}

/// Location service fed from a queue of readings
#[derive(Debug, Clone, Default)]
pub struct MockLocationProvider {
    state: Arc<Mutex<LocationState>>,
}

impl MockLocationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider preloaded with readings delivered in order
    pub fn with_readings<I: IntoIterator<Item = PositionReading>>(readings: I) -> Self {
        let provider = Self::new();
        provider.lock().queue.extend(readings);
        provider
    }

    fn lock(&self) -> MutexGuard<'_, LocationState> {
        // a poisoned mock only happens after a failed test assertion
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push_reading(&self, reading: PositionReading) {
        self.lock().queue.push_back(reading);
    }

    /// Make the next `watch_position` call fail
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    pub fn active_watch(&self) -> Option<WatchId> {
        self.lock().active
    }

    pub fn last_options(&self) -> Option<WatchOptions> {
        self.lock().last_options
    }

    pub fn queued_reading_count(&self) -> usize {
        self.lock().queue.len()
    }
}

impl LocationProvider for MockLocationProvider {
    fn watch_position(&self, options: WatchOptions) -> AdvisorResult<WatchId> {
        let mut state = self.lock();
        if state.unavailable {
            return Err(AdvisorError::Platform {
                service: "Geolocation".to_string(),
                details: "position unavailable".to_string(),
            });
        }
        state.next_id += 1;
        let id = WatchId(state.next_id);
        state.active = Some(id);
        state.last_options = Some(options);
        Ok(id)
    }

    fn clear_watch(&self, id: WatchId) {
        let mut state = self.lock();
        if state.active == Some(id) {
            state.active = None;
        }
    }

    fn poll_reading(&self, id: WatchId) -> Option<PositionReading> {
        let mut state = self.lock();
        if state.active != Some(id) {
            return None;
        }
        state.queue.pop_front()
    }
}

#[derive(Debug, Default)]
struct WakeLockState {
    held: Vec<WakeLockId>,
    next_id: u32,
    unsupported: bool,
}

/// Wake lock service tracking which locks are held
#[derive(Debug, Clone, Default)]
pub struct MockWakeLockProvider {
    state: Arc<Mutex<WakeLockState>>,
}

impl MockWakeLockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider for a platform without the wake lock API
    pub fn unsupported() -> Self {
        let provider = Self::new();
        provider.lock().unsupported = true;
        provider
    }

    fn lock(&self) -> MutexGuard<'_, WakeLockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn held_count(&self) -> usize {
        self.lock().held.len()
    }
}

impl WakeLockProvider for MockWakeLockProvider {
    fn request(&self) -> AdvisorResult<WakeLockId> {
        let mut state = self.lock();
        if state.unsupported {
            return Err(AdvisorError::Platform {
                service: "Wake lock".to_string(),
                details: "not supported".to_string(),
            });
        }
        state.next_id += 1;
        let id = WakeLockId(state.next_id);
        state.held.push(id);
        Ok(id)
    }

    fn release(&self, id: WakeLockId) {
        self.lock().held.retain(|held| *held != id);
    }
}

/// Light sensor replaying a fixed sequence of samples
#[derive(Debug, Clone)]
pub struct MockLightSensor {
    permission: PermissionState,
    samples: VecDeque<f64>,
    frequency_hz: Option<f64>,
}

impl MockLightSensor {
    pub fn new(permission: PermissionState, samples: Vec<f64>) -> Self {
        Self {
            permission,
            samples: samples.into(),
            frequency_hz: None,
        }
    }

    pub fn is_started(&self) -> bool {
        self.frequency_hz.is_some()
    }

    pub fn frequency_hz(&self) -> Option<f64> {
        self.frequency_hz
    }
}

impl LightSensor for MockLightSensor {
    fn permission(&self) -> PermissionState {
        self.permission
    }

    fn start(&mut self, frequency_hz: f64) -> AdvisorResult<()> {
        if self.permission == PermissionState::Denied {
            return Err(AdvisorError::Platform {
                service: "Ambient light sensor".to_string(),
                details: "permission denied".to_string(),
            });
        }
        self.frequency_hz = Some(frequency_hz);
        Ok(())
    }

    fn read_illuminance(&mut self) -> Option<f64> {
        if !self.is_started() {
            return None;
        }
        self.samples.pop_front()
    }
}
