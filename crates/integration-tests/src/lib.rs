//! Integration tests for Geopin.
//!
//! # Running Tests
//!
//! ```bash
//! # Service-level tests (no database needed)
//! cargo test -p geopin-integration-tests
//!
//! # HTTP tests against a running server
//! geopin migrate && geopin-server &
//! cargo test -p geopin-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `address_service` - Address workflows over the in-memory store
//! - `api` - End-to-end HTTP tests (ignored by default)

use reqwest::{Client, Response};
use serde_json::{Value, json};

/// Base URL of the server under test.
///
/// Reads `GEOPIN_BASE_URL`, defaulting to the server's own default.
#[must_use]
pub fn base_url() -> String {
    std::env::var("GEOPIN_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// HTTP client holding one user's session cookie.
pub struct TestClient {
    pub client: Client,
    pub base_url: String,
    pub username: String,
}

impl TestClient {
    /// Register a fresh user and log in.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or rejects the user.
    pub async fn register_and_login() -> Result<Self, reqwest::Error> {
        let client = Client::builder().cookie_store(true).build()?;
        // Usernames are capped at 20 characters
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let username = format!("it_{}", suffix.get(..12).unwrap_or(&suffix));

        let this = Self {
            client,
            base_url: base_url(),
            username,
        };

        let credentials = json!({ "username": this.username, "password": "integration-pass" });
        this.post("/auth/register", &credentials)
            .await?
            .error_for_status()?;
        this.post("/auth/login", &credentials)
            .await?
            .error_for_status()?;

        Ok(this)
    }

    /// A client with no session.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn anonymous() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().cookie_store(true).build()?,
            base_url: base_url(),
            username: String::new(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails to send.
    pub async fn get(&self, path: &str) -> Result<Response, reqwest::Error> {
        self.client.get(self.url(path)).send().await
    }

    /// POST `body` as JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails to send.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Response, reqwest::Error> {
        self.client.post(self.url(path)).json(body).send().await
    }

    /// PUT `body` as JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails to send.
    pub async fn put(&self, path: &str, body: &Value) -> Result<Response, reqwest::Error> {
        self.client.put(self.url(path)).json(body).send().await
    }

    /// DELETE `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails to send.
    pub async fn delete(&self, path: &str) -> Result<Response, reqwest::Error> {
        self.client.delete(self.url(path)).send().await
    }

    /// Save an address and return its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn create_address(&self, latitude: f64, longitude: f64) -> Result<i64, reqwest::Error> {
        let body: Value = self
            .post(
                "/addresses",
                &json!({ "latitude": latitude, "longitude": longitude }),
            )
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(body.get("id").and_then(Value::as_i64).unwrap_or_default())
    }
}
