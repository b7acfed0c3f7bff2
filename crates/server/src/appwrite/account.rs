//! Account and session operations.
//!
//! Account creation and login run with project-scoped (anonymous) auth, the
//! same call shape a mobile client would use; session-bound reads attach the
//! session secret.

use reqwest::Method;
use serde_json::json;
use tracing::instrument;

use super::types::{AccountUser, Session, UNIQUE_ID};
use super::{AppwriteClient, AppwriteError, Auth};

impl AppwriteClient {
    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is already registered
    /// (`user_already_exists`) or the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn create_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<AccountUser, AppwriteError> {
        let request = self
            .request(Method::POST, "/account", Auth::Anonymous)
            .json(&json!({
                "userId": UNIQUE_ID,
                "email": email,
                "password": password,
                "name": name,
            }));

        self.execute(request).await
    }

    /// Create an email/password session.
    ///
    /// The returned session carries its `secret` exactly once; callers must
    /// hold on to it to act on the user's behalf.
    ///
    /// # Errors
    ///
    /// Returns `user_invalid_credentials` when the email/password pair is
    /// wrong.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn create_email_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AppwriteError> {
        let request = self
            .request(Method::POST, "/account/sessions/email", Auth::Anonymous)
            .json(&json!({
                "email": email,
                "password": password,
            }));

        self.execute(request).await
    }

    /// Get the account a session belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired.
    #[instrument(skip(self, session_secret))]
    pub async fn get_account(&self, session_secret: &str) -> Result<AccountUser, AppwriteError> {
        let request = self.request(Method::GET, "/account", Auth::UserSession(session_secret));
        self.execute(request).await
    }

    /// Get a session by ID; `"current"` resolves the presented session.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no such session exists.
    #[instrument(skip(self, session_secret))]
    pub async fn get_session(
        &self,
        session_secret: &str,
        session_id: &str,
    ) -> Result<Session, AppwriteError> {
        let request = self.request(
            Method::GET,
            &format!("/account/sessions/{session_id}"),
            Auth::UserSession(session_secret),
        );
        self.execute(request).await
    }

    /// Delete a session by ID; `"current"` deletes the presented session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist or the request fails.
    #[instrument(skip(self, session_secret))]
    pub async fn delete_session(
        &self,
        session_secret: &str,
        session_id: &str,
    ) -> Result<(), AppwriteError> {
        let request = self.request(
            Method::DELETE,
            &format!("/account/sessions/{session_id}"),
            Auth::UserSession(session_secret),
        );
        self.execute_empty(request).await
    }

    /// Delete the session the secret belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist or the request fails.
    pub async fn delete_current_session(&self, session_secret: &str) -> Result<(), AppwriteError> {
        self.delete_session(session_secret, "current").await
    }
}
