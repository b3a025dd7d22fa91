//! User management commands.
//!
//! Goes through the same registration path as `POST /auth/register`, so the
//! username and password rules are identical.

use thiserror::Error;

use geopin_core::UserId;
use geopin_server::services::{AuthError, AuthService};

use super::{MissingDatabaseUrl, database_url};

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Config(#[from] MissingDatabaseUrl),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Create a new user and return its ID.
pub async fn create(username: &str, password: &str) -> Result<UserId, UserError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = geopin_server::db::create_pool(&database_url).await?;

    let user = AuthService::new(&pool).register(username, password).await?;

    tracing::info!(
        "User created successfully! ID: {}, Username: {}",
        user.id,
        user.username
    );
    Ok(user.id)
}
