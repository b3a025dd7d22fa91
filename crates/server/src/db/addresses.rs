//! Address repository for database operations.
//!
//! Queries are checked at runtime (`query_as` + `FromRow`) so the crate builds
//! without a live database. IDs bind and decode as their newtypes through the
//! `geopin-core` `postgres` feature.

use sqlx::PgPool;

use geopin_core::{AddressId, Coordinates, UserId};

use super::{AddressStore, RepositoryError};
use crate::models::Address;

/// Row shape of the `addresses` table.
#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: AddressId,
    latitude: f64,
    longitude: f64,
    writer_id: UserId,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: row.id,
            coordinates: Coordinates::new(row.latitude, row.longitude),
            writer_id: row.writer_id,
        }
    }
}

/// Repository for address database operations.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl AddressStore for AddressRepository<'_> {
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if `writer_id` is not a known user.
    /// Returns `RepositoryError::Database` for other database errors.
    async fn insert(
        &self,
        coordinates: Coordinates,
        writer_id: UserId,
    ) -> Result<AddressId, RepositoryError> {
        let id = sqlx::query_scalar::<_, AddressId>(
            r"
            INSERT INTO addresses (latitude, longitude, writer_id)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(coordinates.latitude)
        .bind(coordinates.longitude)
        .bind(writer_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict(format!("unknown writer {writer_id}"));
            }
            RepositoryError::Database(e)
        })?;

        Ok(id)
    }

    async fn list_by_writer(&self, writer_id: UserId) -> Result<Vec<Address>, RepositoryError> {
        let rows = sqlx::query_as::<_, AddressRow>(
            r"
            SELECT id, latitude, longitude, writer_id
            FROM addresses
            WHERE writer_id = $1
            ORDER BY id
            ",
        )
        .bind(writer_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Address::from).collect())
    }

    async fn get(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(
            r"
            SELECT id, latitude, longitude, writer_id
            FROM addresses
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Address::from))
    }

    async fn update(&self, id: AddressId, coordinates: Coordinates) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE addresses
            SET latitude = $1, longitude = $2
            WHERE id = $3
            ",
        )
        .bind(coordinates.latitude)
        .bind(coordinates.longitude)
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: AddressId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn writer_id(&self, id: AddressId) -> Result<Option<UserId>, RepositoryError> {
        let writer = sqlx::query_scalar::<_, UserId>("SELECT writer_id FROM addresses WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(writer)
    }
}
