//! Unit conversion factors and advisory formula coefficients

/// Kilometres per hour in one metre per second
pub const KMH_PER_MS: f64 = 3.6;

/// Miles per hour in one metre per second
pub const MPH_PER_MS: f64 = 2.23694;

/// Intercept of the empirical safe speed formula
pub const SAFE_SPEED_INTERCEPT: f64 = 88.87;

/// Radius coefficient of the empirical safe speed formula (metres)
pub const SAFE_SPEED_RADIUS_COEFFICIENT: f64 = 2554.76;

/// Scale applied to the safe speed before the km/h conversion
pub const SAFE_SPEED_SCALE: f64 = 0.278;

/// Side friction factor for the design speed formula
pub const SIDE_FRICTION_FACTOR: f64 = 0.22;

/// Gravitational acceleration used by the design speed formula (m/s^2)
pub const GRAVITY_MS2: f64 = 9.8;

/// Illuminance below which the display switches to the dark theme (lux)
pub const DARK_THEME_THRESHOLD_LUX: f64 = 3.0;

/// Ambient light sensor sampling frequency (Hz)
pub const AMBIENT_SENSOR_FREQUENCY_HZ: f64 = 0.25;
