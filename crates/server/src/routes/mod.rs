//! HTTP route handlers for the directory API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (pings the backend)
//!
//! # Auth (rate limited)
//! POST /auth/register           - Register user + shop entry
//! POST /auth/shopkeeper/register - Register shopkeeper with shop position
//! POST /auth/login              - Create a session
//! POST /auth/admin/login        - Create a session, admin label required
//! POST /auth/logout             - Delete the presented session
//!
//! # Shops
//! GET  /shops/nearby            - Nearby shops (lat, lng, optional radius)
//! GET  /shops                   - List/search all shops (admin)
//! GET  /shops/{id}              - Shop detail
//! PATCH /shops/{id}/status      - Change visibility (owner or admin)
//! GET  /shops/{id}/products     - Products of a shop
//!
//! # Products
//! POST /products                - Add a product (session required)
//!
//! # Uploads
//! POST /uploads/images          - Upload a product image (session required)
//! ```

pub mod auth;
pub mod products;
pub mod shops;
pub mod uploads;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/shopkeeper/register", post(auth::shopkeeper_register))
        .route("/login", post(auth::login))
        .route("/admin/login", post(auth::admin_login))
        .route("/logout", post(auth::logout))
        .layer(auth_rate_limiter())
}

/// Create the shop routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/shops/nearby", get(shops::nearby))
        .route("/shops", get(shops::list))
        .route("/shops/{id}", get(shops::show))
        .route("/shops/{id}/status", patch(shops::set_status))
        .route("/shops/{id}/products", get(products::list_for_shop))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/products", post(products::add))
}

/// Create the upload routes router.
pub fn upload_routes() -> Router<AppState> {
    Router::new().route("/uploads/images", post(uploads::upload_image))
}

/// Assemble all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .merge(shop_routes())
        .merge(product_routes())
        .merge(upload_routes())
}
