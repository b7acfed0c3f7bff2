//! Authentication route handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

use crate::error::Result;
use crate::middleware::{OptionalSession, RequireSession};
use crate::services::auth::{AuthService, RegisterInput, ShopkeeperRegisterInput};
use crate::state::AppState;

/// Email/password login request.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// Register a general user and their shop entry.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<impl IntoResponse> {
    let service = AuthService::new(state.appwrite(), &state.config().appwrite);
    let registration = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

/// Register a shopkeeper with the shop's position.
pub async fn shopkeeper_register(
    State(state): State<AppState>,
    Json(input): Json<ShopkeeperRegisterInput>,
) -> Result<impl IntoResponse> {
    let service = AuthService::new(state.appwrite(), &state.config().appwrite);
    let registration = service.shopkeeper_register(input).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

/// Create a session; a stale presented session is deleted first.
pub async fn login(
    State(state): State<AppState>,
    OptionalSession(existing): OptionalSession,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse> {
    let service = AuthService::new(state.appwrite(), &state.config().appwrite);
    let session = service
        .login(existing.as_deref(), &body.email, &body.password)
        .await?;
    Ok(Json(session))
}

/// Create a session for an admin-labeled account.
pub async fn admin_login(
    State(state): State<AppState>,
    OptionalSession(existing): OptionalSession,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse> {
    let service = AuthService::new(state.appwrite(), &state.config().appwrite);
    let session = service
        .admin_login(existing.as_deref(), &body.email, &body.password)
        .await?;
    Ok(Json(session))
}

/// Delete the presented session.
pub async fn logout(
    State(state): State<AppState>,
    RequireSession(secret): RequireSession,
) -> StatusCode {
    let service = AuthService::new(state.appwrite(), &state.config().appwrite);
    service.logout(&secret).await;
    StatusCode::NO_CONTENT
}
