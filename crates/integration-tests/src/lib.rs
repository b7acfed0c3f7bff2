//! Integration tests for Gully Bazaar.
//!
//! # Running Tests
//!
//! These tests run against a live stack:
//!
//! ```bash
//! # Start the directory server with backend credentials in the environment
//! cargo run -p gully-bazaar-server
//!
//! # Optionally seed demo data
//! cargo run -p gully-bazaar-cli -- seed
//!
//! # Run the ignored tests
//! cargo test -p gully-bazaar-integration-tests -- --ignored
//! ```
//!
//! `GB_BASE_URL` overrides the server address (default
//! `http://localhost:4000`).
//!
//! # Test Categories
//!
//! - `server_health` - Liveness and readiness endpoints
//! - `auth_flow` - Registration, login, logout round trips
//! - `catalog_flow` - Product creation and listing
//! - `nearby_query` - Nearby-shop query shape and ordering

/// Base URL for the directory API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("GB_BASE_URL").unwrap_or_else(|_| "http://localhost:4000".to_string())
}

/// A plain HTTP client for API tests.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email for a throwaway test account.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", uuid::Uuid::new_v4().simple())
}
