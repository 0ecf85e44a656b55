//! Ambient light driven display theme

use crate::core::constants::{AMBIENT_SENSOR_FREQUENCY_HZ, DARK_THEME_THRESHOLD_LUX};
use crate::hardware::{LightSensor, PermissionState};
use crate::validation::error::AdvisorResult;
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Switches between light and dark theme from illuminance samples.
/// A sample exactly at the threshold keeps the current theme.
#[derive(Debug, Clone)]
pub struct ThemeController {
    threshold_lux: f64,
    theme: Theme,
}

impl Default for ThemeController {
    fn default() -> Self {
        Self::new(DARK_THEME_THRESHOLD_LUX)
    }
}

impl ThemeController {
    pub fn new(threshold_lux: f64) -> Self {
        Self {
            threshold_lux,
            theme: Theme::Light,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Feed one sample; returns true when the theme changed
    pub fn on_reading(&mut self, illuminance_lux: f64) -> bool {
        let next = match self.theme {
            Theme::Light if illuminance_lux < self.threshold_lux => Theme::Dark,
            Theme::Dark if illuminance_lux > self.threshold_lux => Theme::Light,
            current => current,
        };
        if next == self.theme {
            return false;
        }
        debug!("Illuminance {} lux, switching to {:?}", illuminance_lux, next);
        self.theme = next;
        true
    }
}

/// Start `sensor` unless permission was denied.
/// Returns false when the sensor was left off.
pub fn start_ambient_sensor<S: LightSensor>(sensor: &mut S, frequency_hz: Option<f64>) -> AdvisorResult<bool> {
    if sensor.permission() == PermissionState::Denied {
        info!("Ambient light sensor permission denied, theme stays fixed");
        return Ok(false);
    }
    sensor.start(frequency_hz.unwrap_or(AMBIENT_SENSOR_FREQUENCY_HZ))?;
    Ok(true)
}

/// Drain pending samples into the controller, returning the resulting theme
pub fn drain_samples<S: LightSensor>(sensor: &mut S, controller: &mut ThemeController) -> Theme {
    while let Some(lux) = sensor.read_illuminance() {
        controller.on_reading(lux);
    }
    controller.theme()
}
