//! Session extraction and admin gating.
//!
//! Clients hold the explicit session object returned by login and present
//! its secret as a bearer token. There is no cookie store and no ambient
//! token state; every request carries its own session.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::appwrite::AccountUser;
use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires a bearer session secret.
///
/// The secret is not validated here — the backend rejects it on first use
/// if it is stale, which keeps unauthenticated request handling to one
/// round trip.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireSession(secret): RequireSession,
/// ) -> impl IntoResponse {
///     // act on behalf of the session
/// }
/// ```
pub struct RequireSession(pub String);

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        bearer_token(parts)
            .map(Self)
            .ok_or_else(|| AppError::Unauthorized("missing bearer session".to_string()))
    }
}

/// Extractor that requires an admin session.
///
/// Resolves the presented session to its account and checks the admin
/// label. Costs one backend round trip per request; admin routes are few
/// and low-traffic.
pub struct RequireAdmin {
    /// The resolved admin account.
    pub account: AccountUser,
    /// The presenting session's secret.
    pub session_secret: String,
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let secret = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("missing bearer session".to_string()))?;

        let account = state
            .appwrite()
            .get_account(&secret)
            .await
            .map_err(|_| AppError::Unauthorized("invalid or expired session".to_string()))?;

        if !account.is_admin() {
            return Err(AppError::PermissionDenied(
                "admin access required".to_string(),
            ));
        }

        Ok(Self {
            account,
            session_secret: secret,
        })
    }
}

/// Extractor for an optional bearer session secret.
///
/// Login handlers use this to delete a stale session before issuing a new
/// one; everything else should use [`RequireSession`].
pub struct OptionalSession(pub Option<String>);

impl<S> FromRequestParts<S> for OptionalSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(bearer_token(parts)))
    }
}

/// Pull the bearer token out of the Authorization header.
fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/shops/nearby");
        if let Some(v) = value {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_extracted() {
        let parts = parts_with_auth(Some("Bearer s3cret-token"));
        assert_eq!(bearer_token(&parts).as_deref(), Some("s3cret-token"));
    }

    #[test]
    fn test_missing_header_yields_none() {
        let parts = parts_with_auth(None);
        assert!(bearer_token(&parts).is_none());
    }

    #[test]
    fn test_wrong_scheme_yields_none() {
        let parts = parts_with_auth(Some("Basic dXNlcjpwYXNz"));
        assert!(bearer_token(&parts).is_none());
    }

    #[test]
    fn test_empty_token_yields_none() {
        let parts = parts_with_auth(Some("Bearer    "));
        assert!(bearer_token(&parts).is_none());
    }
}
