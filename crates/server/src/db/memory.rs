//! In-process address store.
//!
//! Keeps addresses in a `BTreeMap` behind a tokio `RwLock`. IDs are handed
//! out from an atomic counter starting at 1, so iteration order matches
//! insertion order just like a `SERIAL` key. Used by the service tests and
//! anywhere a database is not worth standing up.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};

use tokio::sync::RwLock;

use geopin_core::{AddressId, Coordinates, UserId};

use super::{AddressStore, RepositoryError};
use crate::models::Address;

/// Address store backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryAddressStore {
    rows: RwLock<BTreeMap<AddressId, Address>>,
    last_id: AtomicI32,
}

impl InMemoryAddressStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the store holds no addresses.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl AddressStore for InMemoryAddressStore {
    async fn insert(
        &self,
        coordinates: Coordinates,
        writer_id: UserId,
    ) -> Result<AddressId, RepositoryError> {
        let id = AddressId::new(self.last_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.rows.write().await.insert(
            id,
            Address {
                id,
                coordinates,
                writer_id,
            },
        );
        Ok(id)
    }

    async fn list_by_writer(&self, writer_id: UserId) -> Result<Vec<Address>, RepositoryError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .filter(|address| address.writer_id == writer_id)
            .copied()
            .collect())
    }

    async fn get(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        Ok(self.rows.read().await.get(&id).copied())
    }

    async fn update(&self, id: AddressId, coordinates: Coordinates) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.write().await;
        let Some(address) = rows.get_mut(&id) else {
            return Ok(false);
        };
        address.coordinates = coordinates;
        Ok(true)
    }

    async fn delete(&self, id: AddressId) -> Result<bool, RepositoryError> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }

    async fn writer_id(&self, id: AddressId) -> Result<Option<UserId>, RepositoryError> {
        Ok(self.rows.read().await.get(&id).map(|address| address.writer_id))
    }
}
