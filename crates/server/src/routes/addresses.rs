//! Address route handlers.
//!
//! Every handler requires a logged-in user; the caller's ID comes from the
//! session, never from the request body.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::json;
use tracing::instrument;

use geopin_core::{AddressId, Coordinates};

use crate::error::{AppError, Result};
use crate::extract::{JsonBody, PathParams};
use crate::middleware::RequireAuth;
use crate::models::address::AddressView;
use crate::services::{AddressError, AddressService};
use crate::state::AppState;

/// Response body for the address listing.
#[derive(Debug, Serialize)]
pub struct AddressList {
    pub addresses: Vec<AddressView>,
}

/// List every address the caller owns.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<AddressList>> {
    let store = state.address_store();
    let addresses = AddressService::new(&store).list(user.id).await?;

    Ok(Json(AddressList {
        addresses: addresses.into_iter().map(AddressView::from).collect(),
    }))
}

/// Save a new address. Missing coordinates default to `0.0`.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    JsonBody(coordinates): JsonBody<Coordinates>,
) -> Result<impl IntoResponse> {
    let store = state.address_store();
    let id = AddressService::new(&store)
        .create(coordinates, user.id)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Fetch one address.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    PathParams(id): PathParams<i32>,
) -> Result<Json<AddressView>> {
    let store = state.address_store();
    let address = AddressService::new(&store)
        .get(AddressId::new(id), user.id)
        .await?;

    Ok(Json(address.into()))
}

/// Replace an address's coordinates.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    PathParams(id): PathParams<i32>,
    JsonBody(coordinates): JsonBody<Coordinates>,
) -> Result<StatusCode> {
    let store = state.address_store();
    AddressService::new(&store)
        .update(AddressId::new(id), user.id, coordinates)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete an address.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    PathParams(id): PathParams<i32>,
) -> Result<StatusCode> {
    let store = state.address_store();
    AddressService::new(&store)
        .delete(AddressId::new(id), user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Nearest of the caller's addresses to the posted point.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn close(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    JsonBody(query): JsonBody<Coordinates>,
) -> Result<Json<AddressView>> {
    let store = state.address_store();
    let address = AddressService::new(&store)
        .find_closest(query, user.id)
        .await
        .map_err(|e| match e {
            AddressError::NotFound => {
                AppError::NotFound("Couldn't find closest location.".to_string())
            }
            other => other.into(),
        })?;

    Ok(Json(address.into()))
}
