//! Database operations for the Geopin `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Accounts (username + Argon2id password hash)
//! - `addresses` - Saved coordinates, each owned by one user (`writer_id`)
//! - `tower_sessions.session` - Session storage, created by the session store
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p geopin-cli -- migrate
//! ```

pub mod addresses;
pub mod memory;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use geopin_core::{AddressId, Coordinates, UserId};

use crate::models::Address;

pub use addresses::AddressRepository;
pub use memory::InMemoryAddressStore;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Durable keyed storage for addresses.
///
/// Each method is a single storage operation. Nothing here checks ownership;
/// callers go through [`crate::services::addresses::AddressService`], which
/// does.
pub trait AddressStore: Send + Sync {
    /// Insert a new address owned by `writer_id` and return its ID.
    fn insert(
        &self,
        coordinates: Coordinates,
        writer_id: UserId,
    ) -> impl Future<Output = Result<AddressId, RepositoryError>> + Send;

    /// All addresses owned by `writer_id`, in the store's natural order.
    fn list_by_writer(
        &self,
        writer_id: UserId,
    ) -> impl Future<Output = Result<Vec<Address>, RepositoryError>> + Send;

    /// Look up one address by primary key.
    fn get(
        &self,
        id: AddressId,
    ) -> impl Future<Output = Result<Option<Address>, RepositoryError>> + Send;

    /// Replace the coordinates of an address. Returns `false` if no row matched.
    fn update(
        &self,
        id: AddressId,
        coordinates: Coordinates,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send;

    /// Remove an address. Returns `false` if no row matched.
    fn delete(&self, id: AddressId) -> impl Future<Output = Result<bool, RepositoryError>> + Send;

    /// Owner of an address, or `None` if it does not exist.
    fn writer_id(
        &self,
        id: AddressId,
    ) -> impl Future<Output = Result<Option<UserId>, RepositoryError>> + Send;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
