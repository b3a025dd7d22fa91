//! Address domain type.

use serde::Serialize;

use geopin_core::{AddressId, Coordinates, UserId};

/// A saved location owned by one user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Address {
    /// Store-assigned ID.
    pub id: AddressId,
    /// Location of the address.
    pub coordinates: Coordinates,
    /// User who created the address. Never changes.
    pub writer_id: UserId,
}

/// Public view of an address, without the owner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AddressView {
    pub id: AddressId,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Address> for AddressView {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            latitude: address.coordinates.latitude,
            longitude: address.coordinates.longitude,
        }
    }
}
