//! Authentication and registration.
//!
//! All credential handling is delegated to the hosted backend's accounts
//! API; this service sequences the calls and keeps the session explicit. A
//! session is created on successful authentication, returned to the caller,
//! attached by the caller to subsequent requests, and deleted on logout —
//! there is no ambient token state anywhere in the process.

mod error;

pub use error::AuthError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gully_bazaar_core::{AccountId, Email, GeoPoint, Phone, SessionId, Shop};

use crate::appwrite::types::Session;
use crate::appwrite::{AppwriteClient, AppwriteError, Auth};
use crate::config::AppwriteConfig;
use crate::geo::directory::{RawCoords, ShopRecord, shop_from_document};

/// Minimum password length (mirrors the backend's own floor).
const MIN_PASSWORD_LENGTH: usize = 8;

/// An issued session, explicit and caller-owned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub id: SessionId,
    pub account_id: AccountId,
    /// Bearer secret for subsequent requests. Returned exactly once.
    pub secret: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<Session> for AuthSession {
    fn from(session: Session) -> Self {
        let expires_at = session
            .expire
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Self {
            id: SessionId::new(session.id),
            account_id: AccountId::new(session.user_id),
            secret: session.secret,
            expires_at,
        }
    }
}

/// Input for general registration (account plus a minimal shop entry).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub owner_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub shop_name: String,
    #[serde(default)]
    pub address: String,
    pub shop_type: Option<String>,
}

/// Input for shopkeeper registration, optionally pinning the shop on the map.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopkeeperRegisterInput {
    pub shop_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    #[serde(default)]
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub shop_type: Option<String>,
}

/// A completed registration.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub account_id: AccountId,
    pub shop: Shop,
    pub session: AuthSession,
}

/// Authentication service.
pub struct AuthService<'a> {
    client: &'a AppwriteClient,
    config: &'a AppwriteConfig,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(client: &'a AppwriteClient, config: &'a AppwriteConfig) -> Self {
        Self { client, config }
    }

    /// Register a general user and their shop entry.
    ///
    /// Sequence: create account, create session, create shop document. The
    /// steps are not transactional — a failure partway leaves the earlier
    /// steps in place, matching the backend's own semantics.
    ///
    /// # Errors
    ///
    /// Returns `AccountAlreadyExists` if the email is taken, `WeakPassword`
    /// or `InvalidEmail`/`InvalidPhone` on validation failure.
    pub async fn register(&self, input: RegisterInput) -> Result<Registration, AuthError> {
        let coords = None;
        self.create_account_with_shop(
            input.shop_name,
            input.owner_name,
            input.email,
            input.phone,
            input.password,
            input.address,
            coords,
            input.shop_type,
        )
        .await
    }

    /// Register a shopkeeper, optionally with the shop's position.
    ///
    /// # Errors
    ///
    /// As [`AuthService::register`], plus `PartialCoordinates` when exactly
    /// one of latitude/longitude is supplied.
    pub async fn shopkeeper_register(
        &self,
        input: ShopkeeperRegisterInput,
    ) -> Result<Registration, AuthError> {
        let coords = coords_from_parts(input.latitude, input.longitude)?;
        self.create_account_with_shop(
            input.shop_name,
            input.owner_name,
            input.email,
            input.phone,
            input.password,
            input.address,
            coords,
            input.shop_type,
        )
        .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn create_account_with_shop(
        &self,
        shop_name: String,
        owner_name: String,
        email: String,
        phone: Option<String>,
        password: String,
        address: String,
        coords: Option<GeoPoint>,
        shop_type: Option<String>,
    ) -> Result<Registration, AuthError> {
        let email = Email::parse(&email)?;
        validate_password(&password)?;
        let phone = phone
            .filter(|p| !p.is_empty())
            .map(|p| Phone::parse(&p))
            .transpose()?;

        // 1. Create the account
        let account = self
            .client
            .create_account(email.as_str(), &password, &owner_name)
            .await?;

        // 2. Log the fresh account in
        let session: AuthSession = self
            .client
            .create_email_session(email.as_str(), &password)
            .await?
            .into();

        // 3. Create the shop entry under the new session's permissions
        let record = ShopRecord {
            shop_name,
            owner_name,
            email: email.into_inner(),
            phone: phone.map(|p| p.as_str().to_owned()).unwrap_or_default(),
            location: address,
            location_coords: coords.map(RawCoords::from),
            registration_date: Utc::now(),
            is_active: true,
            shop_type: shop_type.unwrap_or_else(|| "shopkeeper".to_owned()),
        };

        let doc = self
            .client
            .create_document::<ShopRecord, ShopRecord>(
                &self.config.database_id,
                &self.config.shops_collection_id,
                record,
                Auth::UserSession(&session.secret),
            )
            .await?;

        let shop =
            shop_from_document(doc).map_err(|e| AuthError::DataCorruption(e.to_string()))?;

        tracing::info!(shop = %shop.id, account = %account.id, "shop registered");

        Ok(Registration {
            account_id: AccountId::new(account.id),
            shop,
            session,
        })
    }

    /// Log in with email and password.
    ///
    /// If the caller presents a stale session it is deleted first, so an
    /// account never accumulates sessions from repeated logins on the same
    /// device. A missing stale session is not an error.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` when the email/password pair is wrong.
    pub async fn login(
        &self,
        existing_session: Option<&str>,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let email = Email::parse(email)?;

        if let Some(secret) = existing_session {
            match self.client.delete_current_session(secret).await {
                Ok(()) | Err(AppwriteError::NotFound(_)) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "failed to delete stale session before login");
                }
            }
        }

        let session = self
            .client
            .create_email_session(email.as_str(), password)
            .await?;

        Ok(session.into())
    }

    /// Log in and verify the account carries the admin label.
    ///
    /// On a non-admin account the freshly created session is deleted again
    /// before the error surfaces, so the failed attempt leaves nothing
    /// behind.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` on a bad pair and `NotAdmin` when the
    /// account lacks the label.
    pub async fn admin_login(
        &self,
        existing_session: Option<&str>,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let session = self.login(existing_session, email, password).await?;

        let account = self.client.get_account(&session.secret).await?;
        if !account.is_admin() {
            if let Err(e) = self.client.delete_current_session(&session.secret).await {
                tracing::warn!(error = %e, "failed to delete session after admin check");
            }
            return Err(AuthError::NotAdmin);
        }

        Ok(session)
    }

    /// Delete the presented session.
    ///
    /// Logout is best-effort: a failure is logged and the caller proceeds,
    /// since the client discards its secret either way.
    pub async fn logout(&self, session_secret: &str) {
        if let Err(e) = self.client.delete_current_session(session_secret).await {
            tracing::warn!(error = %e, "logout failed");
        }
    }
}

/// Both-or-neither coordinate intake.
fn coords_from_parts(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<GeoPoint>, AuthError> {
    match (latitude, longitude) {
        (Some(lat), Some(lng)) => Ok(Some(GeoPoint::new(lat, lng))),
        (None, None) => Ok(None),
        _ => Err(AuthError::PartialCoordinates),
    }
}

/// Validate password strength.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn test_coords_require_both_components() {
        assert!(coords_from_parts(Some(19.0), Some(72.8)).unwrap().is_some());
        assert!(coords_from_parts(None, None).unwrap().is_none());
        assert!(matches!(
            coords_from_parts(Some(19.0), None),
            Err(AuthError::PartialCoordinates)
        ));
        assert!(matches!(
            coords_from_parts(None, Some(72.8)),
            Err(AuthError::PartialCoordinates)
        ));
    }

    #[test]
    fn test_session_conversion_parses_expiry() {
        let wire = Session {
            id: "s1".to_string(),
            user_id: "u1".to_string(),
            secret: "tok".to_string(),
            expire: Some("2026-09-01T12:00:00+00:00".to_string()),
        };
        let session = AuthSession::from(wire);
        assert_eq!(session.id.as_str(), "s1");
        assert_eq!(session.account_id.as_str(), "u1");
        assert!(session.expires_at.is_some());
    }

    #[test]
    fn test_session_conversion_tolerates_missing_expiry() {
        let wire = Session {
            id: "s1".to_string(),
            user_id: "u1".to_string(),
            secret: "tok".to_string(),
            expire: None,
        };
        assert!(AuthSession::from(wire).expires_at.is_none());
    }
}
