//! Service traits and scoped handles

use crate::core::PositionReading;
use crate::validation::error::AdvisorResult;
use log::debug;

/// Identifier of an active location watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(pub u32);

/// Identifier of a held wake lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WakeLockId(pub u32);

/// Options passed when starting a location watch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    pub enable_high_accuracy: bool,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
        }
    }
}

/// Source of position fixes.
///
/// Implementations are cheap handles onto a shared platform service, so a
/// clone can be kept inside a [`WatchGuard`] to release the watch later.
pub trait LocationProvider: Clone {
    /// Start delivering readings
    fn watch_position(&self, options: WatchOptions) -> AdvisorResult<WatchId>;

    /// Stop a watch; unknown ids are ignored
    fn clear_watch(&self, id: WatchId);

    /// Next reading delivered to the watch, if any
    fn poll_reading(&self, id: WatchId) -> Option<PositionReading>;
}

/// Screen wake lock service
pub trait WakeLockProvider: Clone {
    fn request(&self) -> AdvisorResult<WakeLockId>;

    fn release(&self, id: WakeLockId);
}

/// Permission state reported for the ambient light sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Prompt,
    Denied,
}

/// Ambient light sensor
pub trait LightSensor {
    fn permission(&self) -> PermissionState;

    /// Begin sampling at `frequency_hz`
    fn start(&mut self, frequency_hz: f64) -> AdvisorResult<()>;

    /// Next illuminance sample in lux, if one arrived
    fn read_illuminance(&mut self) -> Option<f64>;
}

/// Active location watch, cleared when dropped
#[derive(Debug)]
pub struct WatchGuard<L: LocationProvider> {
    provider: L,
    id: WatchId,
}

impl<L: LocationProvider> WatchGuard<L> {
    pub fn acquire(provider: &L, options: WatchOptions) -> AdvisorResult<Self> {
        let id = provider.watch_position(options)?;
        debug!("Location watch {:?} started", id);
        Ok(Self {
            provider: provider.clone(),
            id,
        })
    }

    pub fn id(&self) -> WatchId {
        self.id
    }

    pub fn poll(&self) -> Option<PositionReading> {
        self.provider.poll_reading(self.id)
    }
}

impl<L: LocationProvider> Drop for WatchGuard<L> {
    fn drop(&mut self) {
        self.provider.clear_watch(self.id);
        debug!("Location watch {:?} cleared", self.id);
    }
}

/// Held wake lock, released when dropped
#[derive(Debug)]
pub struct WakeLockGuard<W: WakeLockProvider> {
    provider: W,
    id: WakeLockId,
}

impl<W: WakeLockProvider> WakeLockGuard<W> {
    pub fn acquire(provider: &W) -> AdvisorResult<Self> {
        let id = provider.request()?;
        Ok(Self {
            provider: provider.clone(),
            id,
        })
    }

    pub fn id(&self) -> WakeLockId {
        self.id
    }
}

impl<W: WakeLockProvider> Drop for WakeLockGuard<W> {
    fn drop(&mut self) {
        self.provider.release(self.id);
    }
}
