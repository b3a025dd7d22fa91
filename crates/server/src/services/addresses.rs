//! Address service.
//!
//! All address operations for an authenticated user. Every by-id operation
//! runs the ownership check first:
//!
//! 1. look up the address owner;
//! 2. no owner means the address does not exist (`NotFound`);
//! 3. a different owner means `Forbidden`;
//! 4. otherwise the store operation runs.
//!
//! The check and the operation are separate storage calls. A concurrent
//! delete in between makes a read or update report `NotFound`, and makes a
//! delete a no-op.

use std::fmt;

use thiserror::Error;

use geopin_core::{AddressId, CoordinateError, Coordinates, UserId};

use crate::db::{AddressStore, RepositoryError};
use crate::models::Address;

/// What the caller was trying to do when the ownership check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressAction {
    View,
    Edit,
    Delete,
}

impl fmt::Display for AddressAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Delete => "delete",
        })
    }
}

/// Errors returned by [`AddressService`].
#[derive(Debug, Error)]
pub enum AddressError {
    /// Coordinates rejected at creation time.
    #[error(transparent)]
    Invalid(#[from] CoordinateError),

    /// The address does not exist (or the user has none, for closest lookups).
    #[error("address not found")]
    NotFound,

    /// The address belongs to someone else.
    #[error("Couldn't {0}. Wrong Authorization.")]
    Forbidden(AddressAction),

    /// Storage failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Address operations scoped to their owning user.
pub struct AddressService<'a, S> {
    store: &'a S,
}

impl<'a, S: AddressStore> AddressService<'a, S> {
    /// Create a new address service over `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Save a new address for `user_id`.
    ///
    /// Coordinates must pass [`Coordinates::validate`]; nothing is stored
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::Invalid` for rejected coordinates.
    /// Returns `AddressError::Repository` if the insert fails.
    pub async fn create(
        &self,
        coordinates: Coordinates,
        user_id: UserId,
    ) -> Result<AddressId, AddressError> {
        coordinates.validate()?;

        let id = self.store.insert(coordinates, user_id).await?;
        tracing::info!(address_id = %id, user_id = %user_id, "Address created");
        Ok(id)
    }

    /// Every address owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::Repository` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Address>, AddressError> {
        Ok(self.store.list_by_writer(user_id).await?)
    }

    /// Fetch one address owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::NotFound` if the address does not exist.
    /// Returns `AddressError::Forbidden` if another user owns it.
    pub async fn get(&self, id: AddressId, user_id: UserId) -> Result<Address, AddressError> {
        self.authorize(id, user_id, AddressAction::View).await?;
        self.read_by_id(id).await
    }

    /// Replace the coordinates of an address owned by `user_id`.
    ///
    /// Unlike [`Self::create`], the new coordinates are stored as given.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::NotFound` if the address does not exist.
    /// Returns `AddressError::Forbidden` if another user owns it.
    pub async fn update(
        &self,
        id: AddressId,
        user_id: UserId,
        coordinates: Coordinates,
    ) -> Result<(), AddressError> {
        self.authorize(id, user_id, AddressAction::Edit).await?;

        if !self.store.update(id, coordinates).await? {
            tracing::debug!(address_id = %id, "Address vanished before update");
            return Err(AddressError::NotFound);
        }
        Ok(())
    }

    /// Delete an address owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::NotFound` if the address does not exist.
    /// Returns `AddressError::Forbidden` if another user owns it.
    pub async fn delete(&self, id: AddressId, user_id: UserId) -> Result<(), AddressError> {
        self.authorize(id, user_id, AddressAction::Delete).await?;
        self.store.delete(id).await?;
        tracing::info!(address_id = %id, user_id = %user_id, "Address deleted");
        Ok(())
    }

    /// The address owned by `user_id` nearest to `query`.
    ///
    /// Scans every address the user owns; on equal distances the first one
    /// wins.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::NotFound` if the user has no addresses.
    pub async fn find_closest(
        &self,
        query: Coordinates,
        user_id: UserId,
    ) -> Result<Address, AddressError> {
        let addresses = self.store.list_by_writer(user_id).await?;
        closest(&query, addresses).ok_or(AddressError::NotFound)
    }

    /// Owner of an address, or `None` if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::Repository` if the query fails.
    pub async fn writer_id(&self, id: AddressId) -> Result<Option<UserId>, AddressError> {
        Ok(self.store.writer_id(id).await?)
    }

    async fn read_by_id(&self, id: AddressId) -> Result<Address, AddressError> {
        self.store.get(id).await?.ok_or(AddressError::NotFound)
    }

    async fn authorize(
        &self,
        id: AddressId,
        user_id: UserId,
        action: AddressAction,
    ) -> Result<(), AddressError> {
        match self.writer_id(id).await? {
            None => Err(AddressError::NotFound),
            Some(writer) if writer != user_id => {
                tracing::warn!(
                    address_id = %id,
                    user_id = %user_id,
                    action = %action,
                    "Rejected access to another user's address"
                );
                Err(AddressError::Forbidden(action))
            }
            Some(_) => Ok(()),
        }
    }
}

/// First address with the strictly smallest distance to `query`.
///
/// NaN distances never compare smaller, so they are never picked.
fn closest(query: &Coordinates, addresses: Vec<Address>) -> Option<Address> {
    let mut best: Option<(f64, Address)> = None;
    for address in addresses {
        let distance = query.distance_to(&address.coordinates);
        let min = best.as_ref().map_or(f64::INFINITY, |(d, _)| *d);
        if distance < min {
            best = Some((distance, address));
        }
    }
    best.map(|(_, address)| address)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::InMemoryAddressStore;

    const ALICE: UserId = UserId::new(1);
    const BOB: UserId = UserId::new(2);

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let store = InMemoryAddressStore::new();
        let service = AddressService::new(&store);
        let coords = Coordinates::new(51.5074, -0.1278);

        let id = service.create(coords, ALICE).await.unwrap();
        let address = service.get(id, ALICE).await.unwrap();

        assert_eq!(address.id, id);
        assert_eq!(address.coordinates, coords);
        assert_eq!(address.writer_id, ALICE);
    }

    #[tokio::test]
    async fn test_create_with_invalid_longitude_stores_nothing() {
        let store = InMemoryAddressStore::new();
        let service = AddressService::new(&store);

        let err = service
            .create(Coordinates::new(10.0, 181.0), ALICE)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AddressError::Invalid(CoordinateError::InvalidLongitude)
        ));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_with_invalid_latitude() {
        let store = InMemoryAddressStore::new();
        let service = AddressService::new(&store);

        let err = service
            .create(Coordinates::new(90.000_000_1, 0.0), ALICE)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AddressError::Invalid(CoordinateError::InvalidLatitude)
        ));
        assert_eq!(err.to_string(), "invalid latitude");
    }

    #[tokio::test]
    async fn test_list_only_returns_own_addresses() {
        let store = InMemoryAddressStore::new();
        let service = AddressService::new(&store);

        let mine = service.create(Coordinates::new(1.0, 1.0), ALICE).await.unwrap();
        service.create(Coordinates::new(2.0, 2.0), BOB).await.unwrap();

        let listed = service.list(ALICE).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, mine);
        assert!(service.list(UserId::new(3)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_writer_id_of_unknown_address_is_none() {
        let store = InMemoryAddressStore::new();
        let service = AddressService::new(&store);

        assert_eq!(service.writer_id(AddressId::new(42)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_guard_maps_missing_address_to_not_found() {
        let store = InMemoryAddressStore::new();
        let service = AddressService::new(&store);
        let missing = AddressId::new(42);

        assert!(matches!(
            service.get(missing, ALICE).await,
            Err(AddressError::NotFound)
        ));
        assert!(matches!(
            service.update(missing, ALICE, Coordinates::default()).await,
            Err(AddressError::NotFound)
        ));
        assert!(matches!(
            service.delete(missing, ALICE).await,
            Err(AddressError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_guard_rejects_other_users() {
        let store = InMemoryAddressStore::new();
        let service = AddressService::new(&store);
        let id = service.create(Coordinates::new(5.0, 5.0), ALICE).await.unwrap();

        assert!(matches!(
            service.get(id, BOB).await,
            Err(AddressError::Forbidden(AddressAction::View))
        ));
        assert!(matches!(
            service.update(id, BOB, Coordinates::new(6.0, 6.0)).await,
            Err(AddressError::Forbidden(AddressAction::Edit))
        ));
        let err = service.delete(id, BOB).await.unwrap_err();
        assert_eq!(err.to_string(), "Couldn't delete. Wrong Authorization.");

        // Nothing changed for the owner
        let address = service.get(id, ALICE).await.unwrap();
        assert_eq!(address.coordinates, Coordinates::new(5.0, 5.0));
    }

    #[tokio::test]
    async fn test_owner_can_update_and_delete() {
        let store = InMemoryAddressStore::new();
        let service = AddressService::new(&store);
        let id = service.create(Coordinates::new(5.0, 5.0), ALICE).await.unwrap();

        service
            .update(id, ALICE, Coordinates::new(7.5, -3.0))
            .await
            .unwrap();
        assert_eq!(
            service.get(id, ALICE).await.unwrap().coordinates,
            Coordinates::new(7.5, -3.0)
        );

        service.delete(id, ALICE).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_does_not_validate_coordinates() {
        // Creation validates, updates store what they are given.
        let store = InMemoryAddressStore::new();
        let service = AddressService::new(&store);
        let id = service.create(Coordinates::new(1.0, 1.0), ALICE).await.unwrap();

        service
            .update(id, ALICE, Coordinates::new(123.0, 456.0))
            .await
            .unwrap();

        assert_eq!(
            service.get(id, ALICE).await.unwrap().coordinates,
            Coordinates::new(123.0, 456.0)
        );
    }

    #[tokio::test]
    async fn test_delete_of_already_removed_row_is_noop() {
        let store = InMemoryAddressStore::new();
        let service = AddressService::new(&store);
        let id = service.create(Coordinates::new(1.0, 1.0), ALICE).await.unwrap();

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert!(!store.delete(AddressId::new(1000)).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_closest_picks_nearest() {
        let store = InMemoryAddressStore::new();
        let service = AddressService::new(&store);

        // Roughly 5 km, 1 km and 10 km east of the origin
        service.create(Coordinates::new(0.0, 0.045), ALICE).await.unwrap();
        let near = service.create(Coordinates::new(0.0, 0.009), ALICE).await.unwrap();
        service.create(Coordinates::new(0.0, 0.09), ALICE).await.unwrap();
        // Someone else's address right on top of the query point
        service.create(Coordinates::new(0.0, 0.0), BOB).await.unwrap();

        let found = service
            .find_closest(Coordinates::new(0.0, 0.0), ALICE)
            .await
            .unwrap();
        assert_eq!(found.id, near);
    }

    #[tokio::test]
    async fn test_find_closest_without_addresses_is_not_found() {
        let store = InMemoryAddressStore::new();
        let service = AddressService::new(&store);

        assert!(matches!(
            service.find_closest(Coordinates::default(), ALICE).await,
            Err(AddressError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_find_closest_keeps_first_on_ties() {
        let store = InMemoryAddressStore::new();
        let service = AddressService::new(&store);

        let first = service.create(Coordinates::new(0.0, 1.0), ALICE).await.unwrap();
        service.create(Coordinates::new(0.0, -1.0), ALICE).await.unwrap();

        let found = service
            .find_closest(Coordinates::new(0.0, 0.0), ALICE)
            .await
            .unwrap();
        assert_eq!(found.id, first);
    }

    #[test]
    fn test_closest_skips_nan_distances() {
        let address = Address {
            id: AddressId::new(1),
            coordinates: Coordinates::new(f64::NAN, 0.0),
            writer_id: ALICE,
        };
        assert!(closest(&Coordinates::default(), vec![address]).is_none());
    }

    /// Store where the row is deleted right after the ownership lookup: the
    /// owner is still reported, but the row itself is gone.
    struct VanishingStore {
        owner: UserId,
    }

    impl AddressStore for VanishingStore {
        async fn insert(
            &self,
            _coordinates: Coordinates,
            _writer_id: UserId,
        ) -> Result<AddressId, RepositoryError> {
            Ok(AddressId::new(1))
        }

        async fn list_by_writer(&self, _writer_id: UserId) -> Result<Vec<Address>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn get(&self, _id: AddressId) -> Result<Option<Address>, RepositoryError> {
            Ok(None)
        }

        async fn update(
            &self,
            _id: AddressId,
            _coordinates: Coordinates,
        ) -> Result<bool, RepositoryError> {
            Ok(false)
        }

        async fn delete(&self, _id: AddressId) -> Result<bool, RepositoryError> {
            Ok(false)
        }

        async fn writer_id(&self, _id: AddressId) -> Result<Option<UserId>, RepositoryError> {
            Ok(Some(self.owner))
        }
    }

    #[tokio::test]
    async fn test_row_deleted_after_ownership_check() {
        let store = VanishingStore { owner: ALICE };
        let service = AddressService::new(&store);
        let id = AddressId::new(7);

        assert!(matches!(
            service.get(id, ALICE).await,
            Err(AddressError::NotFound)
        ));
        assert!(matches!(
            service.update(id, ALICE, Coordinates::new(1.0, 1.0)).await,
            Err(AddressError::NotFound)
        ));
        assert!(service.delete(id, ALICE).await.is_ok());

        // The ownership check still runs first
        assert!(matches!(
            service.delete(id, BOB).await,
            Err(AddressError::Forbidden(AddressAction::Delete))
        ));
    }
}
