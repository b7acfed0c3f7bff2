//! Status and role enums.

use serde::{Deserialize, Serialize};

/// Whether a shop is visible in the directory.
///
/// New shops are active on registration; only the owning shopkeeper or an
/// admin may change this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShopStatus {
    #[default]
    Active,
    Inactive,
}

impl ShopStatus {
    /// True when the shop should appear in listings and nearby results.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Role attached to an authenticated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// Browsing end user.
    #[default]
    Customer,
    /// Owns a registered shop.
    Shopkeeper,
    /// Directory oversight.
    Admin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_status_default_active() {
        assert!(ShopStatus::default().is_active());
        assert!(!ShopStatus::Inactive.is_active());
    }

    #[test]
    fn test_role_serde_snake_case() {
        let json = serde_json::to_string(&AccountRole::Shopkeeper).expect("serialize");
        assert_eq!(json, "\"shopkeeper\"");
    }
}
