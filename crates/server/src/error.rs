//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::appwrite::AppwriteError;
use crate::geo::location::LocationError;
use crate::geo::locator::QueryError;
use crate::services::auth::AuthError;
use crate::services::catalog::CatalogError;
use crate::services::uploads::UploadError;

/// Application-level error type for the directory server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Hosted backend operation failed.
    #[error("Backend error: {0}")]
    Backend(#[from] AppwriteError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Nearby-shop query failed.
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Image upload failed with no fallback available.
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// Location access refused or unavailable.
    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is authenticated but not allowed.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-class errors to Sentry
        if matches!(
            self,
            Self::Backend(_)
                | Self::Internal(_)
                | Self::Query(_)
                | Self::Catalog(CatalogError::Backend(_) | CatalogError::DataCorruption(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Backend(_) | Self::Upload(_) => StatusCode::BAD_GATEWAY,
            Self::Query(err) => match err {
                QueryError::QueryFailed(_) => StatusCode::BAD_GATEWAY,
                QueryError::DataCorruption(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::AccountAlreadyExists => StatusCode::CONFLICT,
                AuthError::WeakPassword(_)
                | AuthError::InvalidEmail(_)
                | AuthError::InvalidPhone(_)
                | AuthError::PartialCoordinates => StatusCode::BAD_REQUEST,
                AuthError::NotAdmin => StatusCode::FORBIDDEN,
                AuthError::DataCorruption(_) | AuthError::Backend(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Catalog(err) => match err {
                CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                CatalogError::Backend(_) => StatusCode::BAD_GATEWAY,
                CatalogError::DataCorruption(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Location(err) => match err {
                LocationError::PermissionDenied(_) => StatusCode::FORBIDDEN,
                LocationError::Unavailable(_) => StatusCode::BAD_REQUEST,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Backend(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Query(QueryError::QueryFailed(_)) => {
                "Failed to fetch nearby shops".to_string()
            }
            Self::Query(QueryError::DataCorruption(_)) => "Internal server error".to_string(),
            Self::Catalog(err) => match err {
                CatalogError::NotFound(msg) => msg.clone(),
                _ => "Internal server error".to_string(),
            },
            Self::Upload(_) => "Image upload failed".to_string(),
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::AccountAlreadyExists => {
                    "An account with this email already exists".to_string()
                }
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AuthError::InvalidPhone(_) => "Invalid phone number".to_string(),
                AuthError::PartialCoordinates => {
                    "Latitude and longitude must be provided together".to_string()
                }
                AuthError::NotAdmin => "This account has no admin access".to_string(),
                _ => "Authentication error".to_string(),
            },
            _ => self.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("shop-123".to_string());
        assert_eq!(err.to_string(), "Not found: shop-123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::PermissionDenied("test".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_query_failure_maps_to_bad_gateway() {
        let err = AppError::Query(QueryError::QueryFailed(AppwriteError::NotFound(
            "gone".to_string(),
        )));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_location_denied_maps_to_forbidden() {
        let err = AppError::Location(LocationError::PermissionDenied("denied".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_not_admin_maps_to_forbidden() {
        let err = AppError::Auth(AuthError::NotAdmin);
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }
}
