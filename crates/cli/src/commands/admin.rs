//! Admin account management.

use gully_bazaar_server::appwrite::{AccountUser, AppwriteClient};
use gully_bazaar_server::config::ServerConfig;

/// Grant the admin label to the account with the given email.
///
/// Existing labels are preserved; granting twice is a no-op.
///
/// # Errors
///
/// Fails when no account matches the email or the backend rejects the
/// update.
pub async fn grant(email: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    let client = AppwriteClient::new(&config.appwrite);

    let user = client.find_user_by_email(email).await?;
    if user.is_admin() {
        tracing::info!(user = %user.id, email = %email, "account already has the admin label");
        return Ok(());
    }

    let mut labels: Vec<&str> = user.labels.iter().map(String::as_str).collect();
    labels.push(AccountUser::ADMIN_LABEL);
    let updated = client.update_user_labels(&user.id, &labels).await?;

    tracing::info!(
        user = %updated.id,
        email = %email,
        labels = ?updated.labels,
        "admin label granted"
    );
    Ok(())
}
