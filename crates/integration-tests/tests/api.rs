//! End-to-end HTTP tests.
//!
//! These need a migrated database and a running `geopin-server` at
//! `GEOPIN_BASE_URL`, so they are ignored by default.

#![allow(clippy::unwrap_used)]

use geopin_integration_tests::TestClient;
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_health() {
    let client = TestClient::anonymous().unwrap();
    let response = client.get("/health").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = client.get("/health/ready").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_addresses_require_login() {
    let client = TestClient::anonymous().unwrap();

    let response = client.get("/addresses").await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .post("/addresses", &json!({ "latitude": 1.0, "longitude": 1.0 }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_address_crud() {
    let alice = TestClient::register_and_login().await.unwrap();

    let id = alice.create_address(51.5074, -0.1278).await.unwrap();

    let body: Value = alice.get("/addresses").await.unwrap().json().await.unwrap();
    let addresses = body["addresses"].as_array().unwrap();
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0]["id"], id);

    let path = format!("/addresses/{id}");
    let response = alice
        .put(&path, &json!({ "latitude": 48.8566, "longitude": 2.3522 }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body: Value = alice.get(&path).await.unwrap().json().await.unwrap();
    assert_eq!(
        body,
        json!({ "id": id, "latitude": 48.8566, "longitude": 2.3522 })
    );

    let response = alice.delete(&path).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = alice.get(&path).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_invalid_coordinates_rejected() {
    let alice = TestClient::register_and_login().await.unwrap();

    let response = alice
        .post("/addresses", &json!({ "latitude": 95.0, "longitude": 0.0 }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "invalid latitude" }));

    let body: Value = alice.get("/addresses").await.unwrap().json().await.unwrap();
    assert_eq!(body, json!({ "addresses": [] }));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_other_users_address_is_forbidden() {
    let alice = TestClient::register_and_login().await.unwrap();
    let bob = TestClient::register_and_login().await.unwrap();

    let id = alice.create_address(10.0, 10.0).await.unwrap();
    let path = format!("/addresses/{id}");

    let response = bob
        .put(&path, &json!({ "latitude": 0.0, "longitude": 0.0 }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Couldn't edit. Wrong Authorization." }));

    let response = bob.delete(&path).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = bob.get(&path).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_closest() {
    let alice = TestClient::register_and_login().await.unwrap();

    let response = alice
        .post("/addresses/close", &json!({ "latitude": 0.0, "longitude": 0.0 }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Couldn't find closest location." }));

    alice.create_address(0.0, 0.09).await.unwrap();
    let near = alice.create_address(0.0, 0.009).await.unwrap();

    let body: Value = alice
        .post("/addresses/close", &json!({ "latitude": 0.0, "longitude": 0.0 }))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["id"], near);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_register_login_logout() {
    let alice = TestClient::register_and_login().await.unwrap();

    let body: Value = alice.get("/auth/me").await.unwrap().json().await.unwrap();
    assert_eq!(body["username"], alice.username.as_str());

    let response = alice.post("/auth/logout", &json!({})).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = alice.get("/auth/me").await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_bad_login_rejected() {
    let alice = TestClient::register_and_login().await.unwrap();
    let stranger = TestClient::anonymous().unwrap();

    let response = stranger
        .post(
            "/auth/login",
            &json!({ "username": alice.username, "password": "wrong-password" }),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = stranger
        .post(
            "/auth/register",
            &json!({ "username": alice.username, "password": "another-pass" }),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
