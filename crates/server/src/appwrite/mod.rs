//! Typed REST client for the hosted backend (Appwrite).
//!
//! The backend owns all durable state: accounts and sessions, the shop and
//! product document collections, and the product-image bucket. This module
//! wraps its REST surface with `reqwest` the same way a storefront wraps a
//! commerce API: one cheaply-cloneable client, typed wire structs, and one
//! error enum.
//!
//! Responses are intentionally not cached; every directory query reads a
//! fresh snapshot.

mod account;
mod databases;
mod storage;
pub mod types;
mod users;

pub use types::{AccountUser, Document, DocumentList, Query, Session, StorageFile};

use std::sync::Arc;

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::config::AppwriteConfig;

use types::ApiErrorBody;

/// Errors that can occur when talking to the hosted backend.
#[derive(Debug, Error)]
pub enum AppwriteError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the request.
    #[error("backend error ({kind}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Machine-readable error type, e.g. `user_invalid_credentials`.
        kind: String,
        message: String,
    },

    /// Response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limited by the backend.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

impl AppwriteError {
    /// The machine-readable error type, when the backend supplied one.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::Api { kind, .. } => Some(kind.as_str()),
            _ => None,
        }
    }
}

/// How a request is authorized.
#[derive(Debug, Clone, Copy)]
pub enum Auth<'a> {
    /// Project header only; used for account creation and login.
    Anonymous,
    /// Server API key; full database/storage access.
    ServerKey,
    /// Act on behalf of a user session (the session secret).
    UserSession(&'a str),
}

/// Client for the hosted backend's REST API.
///
/// Cheaply cloneable; all clones share one connection pool.
#[derive(Clone)]
pub struct AppwriteClient {
    inner: Arc<AppwriteClientInner>,
}

struct AppwriteClientInner {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    api_key: SecretString,
}

impl AppwriteClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &AppwriteConfig) -> Self {
        Self {
            inner: Arc::new(AppwriteClientInner {
                http: reqwest::Client::new(),
                endpoint: config.endpoint.clone(),
                project_id: config.project_id.clone(),
                api_key: config.api_key.clone(),
            }),
        }
    }

    /// Base endpoint, without a trailing slash.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Project identifier sent with every request.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.inner.project_id
    }

    /// Liveness probe against the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or unhealthy.
    pub async fn health(&self) -> Result<(), AppwriteError> {
        let request = self.request(Method::GET, "/health", Auth::ServerKey);
        let response = request.send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    /// Build a request with project and auth headers applied.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        auth: Auth<'_>,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.inner.endpoint);
        let builder = self
            .inner
            .http
            .request(method, url)
            .header("X-Appwrite-Project", &self.inner.project_id)
            .header("X-Appwrite-Response-Format", "1.6.0");

        match auth {
            Auth::Anonymous => builder,
            Auth::ServerKey => {
                builder.header("X-Appwrite-Key", self.inner.api_key.expose_secret())
            }
            Auth::UserSession(secret) => builder.header("X-Appwrite-Session", secret),
        }
    }

    /// Send a request and decode the JSON response body.
    pub(crate) async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, AppwriteError> {
        let response = request.send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(AppwriteError::RateLimited(retry_after));
        }

        if !status.is_success() {
            return Err(Self::error_from_response(response).await);
        }

        // Get the body as text first for better error diagnostics
        let response_text = response.text().await?;

        match serde_json::from_str(&response_text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse backend response"
                );
                Err(AppwriteError::Parse(e))
            }
        }
    }

    /// Send a request expecting an empty (204) response.
    pub(crate) async fn execute_empty(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(), AppwriteError> {
        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(AppwriteError::RateLimited(retry_after));
        }

        if !status.is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(())
    }

    /// Decode a non-success response into an [`AppwriteError`].
    async fn error_from_response(response: reqwest::Response) -> AppwriteError {
        let status = response.status();
        let body_text = response.text().await.unwrap_or_default();

        let body: ApiErrorBody = serde_json::from_str(&body_text).unwrap_or(ApiErrorBody {
            message: body_text.chars().take(200).collect(),
            kind: String::new(),
            code: status.as_u16(),
        });

        if status == reqwest::StatusCode::NOT_FOUND {
            return AppwriteError::NotFound(body.message);
        }

        AppwriteError::Api {
            status: status.as_u16(),
            kind: body.kind,
            message: body.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppwriteError::NotFound("shop 64f1c2".to_string());
        assert_eq!(err.to_string(), "not found: shop 64f1c2");

        let err = AppwriteError::Api {
            status: 401,
            kind: "user_invalid_credentials".to_string(),
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "backend error (user_invalid_credentials): Invalid credentials"
        );
    }

    #[test]
    fn test_error_kind_accessor() {
        let err = AppwriteError::Api {
            status: 409,
            kind: "user_already_exists".to_string(),
            message: "duplicate".to_string(),
        };
        assert_eq!(err.kind(), Some("user_already_exists"));
        assert_eq!(AppwriteError::NotFound("x".to_string()).kind(), None);
    }

    #[test]
    fn test_rate_limited_display() {
        let err = AppwriteError::RateLimited(30);
        assert_eq!(err.to_string(), "rate limited, retry after 30 seconds");
    }
}
