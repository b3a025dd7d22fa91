//! Haversine great-circle distance.

use std::f64::consts::PI;

/// Earth's diameter in kilometres (twice the mean radius of 6371 km).
pub const EARTH_DIAMETER_KM: f64 = 12742.0;

/// Distance between two points in kilometres.
///
/// Uses the cosine form of the haversine formula:
///
/// ```text
/// a = 0.5 - cos(Δlat)/2 + cos(lat1)·cos(lat2)·(1 - cos(Δlon))/2
/// d = 12742 · asin(√a)
/// ```
///
/// Stored fixtures depend on this exact arrangement of the terms, so it is
/// not interchangeable with the `atan2` variant.
///
/// ```
/// use geopin_core::geo::distance;
///
/// let london_paris = distance(51.5074, -0.1278, 48.8566, 2.3522);
/// assert!((london_paris - 343.5).abs() < 1.0);
/// ```
#[must_use]
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let p = PI / 180.0;
    let a = 0.5 - ((lat2 - lat1) * p).cos() / 2.0
        + (lat1 * p).cos() * (lat2 * p).cos() * (1.0 - ((lon2 - lon1) * p).cos()) / 2.0;
    EARTH_DIAMETER_KM * a.sqrt().asin()
}
