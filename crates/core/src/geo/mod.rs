//! Geographic coordinates.
//!
//! [`Coordinates`] is the latitude/longitude pair carried by every address
//! and by nearest-address queries. Validation lives in [`validate`] and the
//! haversine distance in [`distance`].

pub mod distance;
pub mod validate;

use serde::{Deserialize, Serialize};

pub use distance::distance;
pub use validate::{CoordinateError, validate, validate_text};

/// A latitude/longitude pair in decimal degrees.
///
/// Missing fields deserialize to `0.0`, so `{}` is the null island.
///
/// ```
/// use geopin_core::Coordinates;
///
/// let paris: Coordinates = serde_json::from_str(r#"{"latitude": 48.8566, "longitude": 2.3522}"#).unwrap();
/// assert!(paris.validate().is_ok());
///
/// let origin: Coordinates = serde_json::from_str("{}").unwrap();
/// assert_eq!(origin, Coordinates::default());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    /// Degrees north (negative for south).
    pub latitude: f64,
    /// Degrees east (negative for west).
    pub longitude: f64,
}

impl Coordinates {
    /// Create a coordinate pair.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check both components against the accepted coordinate formats.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::InvalidLatitude`] or
    /// [`CoordinateError::InvalidLongitude`], latitude first.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        validate(self.latitude, self.longitude)
    }

    /// Great-circle distance to `other`, in kilometres.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}
