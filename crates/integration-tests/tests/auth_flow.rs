//! Integration tests for registration, login, and logout.
//!
//! These tests require:
//! - A running directory server (cargo run -p gully-bazaar-server)
//! - Valid backend credentials in the server's environment
//!
//! Run with: `cargo test -p gully-bazaar-integration-tests -- --ignored`

use reqwest::StatusCode;
use serde_json::{Value, json};

use gully_bazaar_integration_tests::{base_url, client, unique_email};

const TEST_PASSWORD: &str = "n0t-a-real-passw0rd";

/// Register a throwaway shopkeeper and return the response body.
async fn register_shopkeeper(email: &str) -> Value {
    let resp = client()
        .post(format!("{}/auth/shopkeeper/register", base_url()))
        .json(&json!({
            "shopName": "Integration Test Kirana",
            "ownerName": "Test Owner",
            "email": email,
            "password": TEST_PASSWORD,
            "address": "Test Lane, Bandra",
            "latitude": 19.0596,
            "longitude": 72.8295,
            "shopType": "General Store",
        }))
        .send()
        .await
        .expect("Failed to register");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse registration")
}

#[tokio::test]
#[ignore = "Requires running directory server and backend credentials"]
async fn test_shopkeeper_registration_returns_shop_and_session() {
    let email = unique_email("register");
    let body = register_shopkeeper(&email).await;

    assert!(body["shop"]["id"].is_string());
    assert_eq!(body["shop"]["email"], email);
    assert!(body["session"]["secret"].is_string());
    let coords = &body["shop"]["coords"];
    assert!((coords["latitude"].as_f64().expect("latitude") - 19.0596).abs() < 1e-9);
}

#[tokio::test]
#[ignore = "Requires running directory server and backend credentials"]
async fn test_login_then_logout() {
    let email = unique_email("login");
    let _ = register_shopkeeper(&email).await;

    let resp = client()
        .post(format!("{}/auth/login", base_url()))
        .json(&json!({ "email": email, "password": TEST_PASSWORD }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), StatusCode::OK);

    let session: Value = resp.json().await.expect("Failed to parse session");
    let secret = session["secret"].as_str().expect("secret").to_owned();
    assert!(!secret.is_empty());

    let resp = client()
        .post(format!("{}/auth/logout", base_url()))
        .bearer_auth(&secret)
        .send()
        .await
        .expect("Failed to logout");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "Requires running directory server and backend credentials"]
async fn test_login_with_wrong_password_is_unauthorized() {
    let email = unique_email("badpass");
    let _ = register_shopkeeper(&email).await;

    let resp = client()
        .post(format!("{}/auth/login", base_url()))
        .json(&json!({ "email": email, "password": "wrong-password-1" }))
        .send()
        .await
        .expect("Failed to send login");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running directory server and backend credentials"]
async fn test_duplicate_registration_conflicts() {
    let email = unique_email("dup");
    let _ = register_shopkeeper(&email).await;

    let resp = client()
        .post(format!("{}/auth/shopkeeper/register", base_url()))
        .json(&json!({
            "shopName": "Second Shop",
            "ownerName": "Test Owner",
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .send()
        .await
        .expect("Failed to send registration");

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running directory server and backend credentials"]
async fn test_partial_coordinates_are_rejected() {
    let resp = client()
        .post(format!("{}/auth/shopkeeper/register", base_url()))
        .json(&json!({
            "shopName": "Half Mapped",
            "ownerName": "Test Owner",
            "email": unique_email("partial"),
            "password": TEST_PASSWORD,
            "latitude": 19.0596,
        }))
        .send()
        .await
        .expect("Failed to send registration");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running directory server"]
async fn test_admin_login_rejects_unlabeled_account() {
    let email = unique_email("notadmin");
    let _ = register_shopkeeper(&email).await;

    let resp = client()
        .post(format!("{}/auth/admin/login", base_url()))
        .json(&json!({ "email": email, "password": TEST_PASSWORD }))
        .send()
        .await
        .expect("Failed to send admin login");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
