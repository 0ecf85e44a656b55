//! Local tangent plane helpers for proximity matching

use nalgebra::Vector2;
use std::f64::consts::PI;

/// Approximate metres per degree of latitude (roughly constant)
const METERS_PER_DEG_LAT: f64 = 111_132.0;
/// Metres per degree of longitude at the equator
const METERS_PER_DEG_LON_EQUATOR: f64 = 111_320.0;

fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert a geographic coordinate to East-North metres relative to `reference`.
/// Valid for the short distances involved in curve matching.
pub fn geodetic_to_local(latitude: f64, longitude: f64, reference: (f64, f64)) -> Vector2<f64> {
    let (ref_lat, ref_lon) = reference;
    let meters_per_deg_lon = METERS_PER_DEG_LON_EQUATOR * deg_to_rad(ref_lat).cos();

    let east = (longitude - ref_lon) * meters_per_deg_lon;
    let north = (latitude - ref_lat) * METERS_PER_DEG_LAT;

    Vector2::new(east, north)
}

/// Planar distance in metres between two coordinates
pub fn local_distance_m(a: (f64, f64), b: (f64, f64)) -> f64 {
    geodetic_to_local(b.0, b.1, a).norm()
}
