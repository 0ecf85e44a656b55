//! Platform service abstraction layer
//!
//! The dashboard depends on three host services: a location watch, a screen
//! wake lock and an ambient light sensor. Each is a trait so the session logic
//! runs against real bindings or the mocks used in tests and replays.

pub mod services;
pub mod mock;

pub use services::{
    LightSensor, LocationProvider, PermissionState, WakeLockGuard, WakeLockId, WakeLockProvider,
    WatchGuard, WatchId, WatchOptions,
};
pub use mock::{MockLightSensor, MockLocationProvider, MockWakeLockProvider};
