//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Auth
//! POST /auth/register          - Create an account
//! POST /auth/login             - Login, sets the session cookie
//! POST /auth/logout            - Logout
//! GET  /auth/me                - Current user (requires auth)
//!
//! # Addresses (requires auth)
//! GET    /addresses            - List the caller's addresses
//! POST   /addresses            - Save an address
//! POST   /addresses/close      - Nearest saved address to a point
//! GET    /addresses/{id}       - Fetch one address
//! PUT    /addresses/{id}       - Replace its coordinates
//! DELETE /addresses/{id}       - Delete it
//! ```

pub mod addresses;
pub mod auth;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the address routes router.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(addresses::list).post(addresses::create))
        .route("/close", post(addresses::close))
        .route(
            "/{id}",
            get(addresses::show)
                .put(addresses::update)
                .delete(addresses::delete),
        )
}

/// Build the complete API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/addresses", address_routes())
}
