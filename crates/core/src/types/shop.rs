//! Shop record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::geo::GeoPoint;
use super::id::ShopId;
use super::phone::Phone;
use super::status::ShopStatus;

/// A registered storefront entity.
///
/// Owned by the hosted backend's document store; created at registration,
/// read-mostly afterward, mutated only by its owning shopkeeper or an admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    /// Backend document ID.
    pub id: ShopId,
    /// Display name shown in listings.
    pub name: String,
    /// Name of the owning shopkeeper.
    pub owner_name: String,
    /// Contact email of the owner account.
    pub email: Email,
    /// Contact phone, if the shopkeeper provided one.
    pub phone: Option<Phone>,
    /// Free-text address string as entered at registration.
    pub address: String,
    /// Registered position. `None` when the shopkeeper registered without
    /// placing the shop on the map; such shops never appear in nearby
    /// results.
    pub coords: Option<GeoPoint>,
    /// Category/type label, e.g. "General Store".
    pub category: String,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
    /// Directory visibility.
    pub status: ShopStatus,
}

impl Shop {
    /// True when the shop has a usable coordinate pair.
    #[must_use]
    pub const fn has_coords(&self) -> bool {
        self.coords.is_some()
    }
}
