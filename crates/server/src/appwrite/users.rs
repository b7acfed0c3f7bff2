//! Server-key user administration.
//!
//! Only the CLI reaches these endpoints today (granting the admin label);
//! they require the server API key.

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use super::types::AccountUser;
use super::{AppwriteClient, AppwriteError, Auth};

/// A page of users from the users API.
#[derive(Debug, Deserialize)]
struct UserList {
    #[allow(dead_code)]
    total: u64,
    users: Vec<AccountUser>,
}

impl AppwriteClient {
    /// Find a user by exact email.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no account matches the email.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn find_user_by_email(&self, email: &str) -> Result<AccountUser, AppwriteError> {
        let request = self
            .request(Method::GET, "/users", Auth::ServerKey)
            .query(&[("search", email)]);

        let list: UserList = self.execute(request).await?;
        list.users
            .into_iter()
            .find(|u| u.email == email)
            .ok_or_else(|| AppwriteError::NotFound(format!("no account with email {email}")))
    }

    /// Replace a user's role labels.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the user does not exist.
    #[instrument(skip(self), fields(user = %user_id))]
    pub async fn update_user_labels(
        &self,
        user_id: &str,
        labels: &[&str],
    ) -> Result<AccountUser, AppwriteError> {
        let request = self
            .request(
                Method::PUT,
                &format!("/users/{user_id}/labels"),
                Auth::ServerKey,
            )
            .json(&json!({ "labels": labels }));

        self.execute(request).await
    }
}
