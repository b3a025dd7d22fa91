//! Session cookie configuration.
//!
//! Sessions live in `PostgreSQL` (`tower_sessions.session`, created by
//! `geopin migrate`) and are referenced by the `geopin_session` cookie. The
//! cookie is HttpOnly, SameSite=Lax and scoped to `/`; it is marked Secure
//! only when the public base URL is `https://`, so local HTTP logins work.

use tower_sessions::{
    Expiry, SessionManagerLayer, SessionStore,
    cookie::{SameSite, time::Duration},
};

use crate::config::ServerConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "geopin_session";

/// Sessions end after a week without requests.
pub const SESSION_INACTIVITY: Duration = Duration::days(7);

/// Wrap `store` in the session layer the API uses.
///
/// Production passes a `PostgresStore`; tests can pass a `MemoryStore`.
#[must_use]
pub fn create_session_layer<S>(store: S, config: &ServerConfig) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(SESSION_INACTIVITY))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::Request, routing::get};
    use secrecy::SecretString;
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, Session};

    use super::*;

    fn config(base_url: &str) -> ServerConfig {
        ServerConfig {
            database_url: SecretString::from("postgres://localhost/geopin_unused"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8000,
            base_url: base_url.to_string(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    async fn set_cookie_for(base_url: &str) -> String {
        async fn touch(session: Session) -> &'static str {
            session.insert("seen", true).await.unwrap();
            "ok"
        }

        let app = Router::new()
            .route("/", get(touch))
            .layer(create_session_layer(MemoryStore::default(), &config(base_url)));

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        response
            .headers()
            .get("set-cookie")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_cookie_attributes_over_http() {
        let cookie = set_cookie_for("http://localhost:8000").await;

        assert!(cookie.starts_with("geopin_session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age="));
        assert!(!cookie.contains("Secure"));
    }

    #[tokio::test]
    async fn test_cookie_is_secure_over_https() {
        let cookie = set_cookie_for("https://geopin.example").await;
        assert!(cookie.contains("Secure"));
    }
}
