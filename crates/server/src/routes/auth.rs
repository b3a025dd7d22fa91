//! Authentication route handlers.
//!
//! Registration and session login/logout. Request and response bodies are
//! JSON; the session itself travels in the `geopin_session` cookie.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;
use tower_sessions::Session;

use geopin_core::{UserId, Username};

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::extract::JsonBody;
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Username and password, for both registration and login.
#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Keep passwords out of logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Public view of the logged-in user.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: UserId,
    pub username: Username,
}

/// Create an account.
#[instrument(skip(state, credentials), fields(username = %credentials.username))]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<impl IntoResponse> {
    let user = state
        .auth()
        .register(&credentials.username, &credentials.password)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": user.id }))))
}

/// Log in and start a session.
#[instrument(skip(state, session, credentials), fields(username = %credentials.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<StatusCode> {
    let user = state
        .auth()
        .login(&credentials.username, &credentials.password)
        .await
        .inspect_err(|_| tracing::warn!("Failed login attempt"))?;

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current).await.map_err(|e| {
        tracing::error!("Failed to set session: {e}");
        AppError::Internal("Session error".to_string())
    })?;

    set_sentry_user(&user.id, Some(user.username.as_str()));
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(StatusCode::NO_CONTENT)
}

/// End the session.
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session).await.map_err(|e| {
        tracing::error!("Failed to clear session: {e}");
        AppError::Internal("Session error".to_string())
    })?;
    clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}

/// The logged-in user, re-read from the database.
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<MeResponse>> {
    let user = state.auth().get_user(current.id).await?;

    Ok(Json(MeResponse {
        id: user.id,
        username: user.username,
    }))
}
