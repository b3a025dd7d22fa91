//! Latitude/longitude format validation.
//!
//! Coordinates are checked as text, not as numbers. A float is rendered to
//! its shortest round-trip form (`45.0`, `-0.5`, `1e-5`) and that string must
//! match the pattern for its axis. Anything the pattern rejects fails even if
//! it is numerically in range, e.g. `1e-5` or `12.3456789`.

use std::sync::LazyLock;

use regex::Regex;

/// Optional sign, then `90` with up to six zero decimals, or 0-89 with up to
/// six decimals.
static LATITUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+|-)?(?:90(?:(?:\.0{1,6})?)|(?:[0-9]|[1-8][0-9])(?:(?:\.[0-9]{1,6})?))$")
        .expect("Invalid regex")
});

/// Optional sign, then `180` with up to six zero decimals, or 0-179 with up to
/// six decimals.
static LONGITUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\+|-)?(?:180(?:(?:\.0{1,6})?)|(?:[0-9]|[1-9][0-9]|1[0-7][0-9])(?:(?:\.[0-9]{1,6})?))$",
    )
    .expect("Invalid regex")
});

/// Why a coordinate pair was rejected.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateError {
    /// Latitude is out of range or badly formatted.
    #[error("invalid latitude")]
    InvalidLatitude,
    /// Longitude is out of range or badly formatted.
    #[error("invalid longitude")]
    InvalidLongitude,
}

/// Validate a coordinate pair.
///
/// # Errors
///
/// Returns the first failing axis, latitude before longitude.
///
/// ```
/// use geopin_core::geo::{CoordinateError, validate};
///
/// assert_eq!(validate(45.0, 90.0), Ok(()));
/// assert_eq!(validate(90.0000001, 0.0), Err(CoordinateError::InvalidLatitude));
/// ```
pub fn validate(latitude: f64, longitude: f64) -> Result<(), CoordinateError> {
    validate_text(&canonical_text(latitude), &canonical_text(longitude))
}

/// Validate a coordinate pair given as raw text.
///
/// # Errors
///
/// Returns the first failing axis, latitude before longitude.
pub fn validate_text(latitude: &str, longitude: &str) -> Result<(), CoordinateError> {
    if !LATITUDE_RE.is_match(latitude) {
        return Err(CoordinateError::InvalidLatitude);
    }
    if !LONGITUDE_RE.is_match(longitude) {
        return Err(CoordinateError::InvalidLongitude);
    }
    Ok(())
}

/// Shortest text that round-trips to `value`, always with a decimal point
/// or an exponent.
fn canonical_text(value: f64) -> String {
    format!("{value:?}")
}
