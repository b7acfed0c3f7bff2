//! Candidate-set retrieval from the shops collection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gully_bazaar_core::{Email, GeoPoint, Phone, Shop, ShopId, ShopStatus};

use crate::appwrite::types::Query;
use crate::appwrite::{AppwriteClient, Auth, Document};
use crate::config::AppwriteConfig;

use super::locator::QueryError;

/// Single-page cap when listing the shops collection.
///
/// There is no geospatial index behind this; the whole collection is
/// transferred and ranked in memory, so the page cap is also the ceiling on
/// how many shops the directory can rank. Swapping `LinearScanLocator` for
/// an indexed locator lifts this without touching callers.
const CANDIDATE_PAGE_LIMIT: u32 = 1000;

/// Wire shape of a shop document, matching the collection schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopRecord {
    pub shop_name: String,
    pub owner_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Free-text address string.
    #[serde(default)]
    pub location: String,
    /// Registered position. Stored records may carry a partial or absent
    /// pair; decoding collapses anything short of both components to `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_coords: Option<RawCoords>,
    pub registration_date: DateTime<Utc>,
    pub is_active: bool,
    #[serde(rename = "type", default)]
    pub shop_type: String,
}

/// Coordinate pair as stored, where either component may be missing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawCoords {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl RawCoords {
    /// Collapse to a usable point only when both components are present.
    #[must_use]
    pub fn into_point(self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
            _ => None,
        }
    }
}

impl From<GeoPoint> for RawCoords {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: Some(point.latitude),
            longitude: Some(point.longitude),
        }
    }
}

/// Convert a stored document into the domain [`Shop`].
///
/// A record missing either coordinate component becomes a shop with
/// `coords: None` — it stays in the directory but never ranks in nearby
/// results. That exclusion is policy, not an error. A record whose email
/// fails to parse, by contrast, is data corruption and fails the query.
pub fn shop_from_document(doc: Document<ShopRecord>) -> Result<Shop, QueryError> {
    let record = doc.data;

    let email = Email::parse(&record.email).map_err(|e| {
        QueryError::DataCorruption(format!("shop {}: invalid email: {e}", doc.id))
    })?;

    let phone = if record.phone.is_empty() {
        None
    } else {
        // Stored phones predate validation; keep what parses, drop the rest.
        Phone::parse(&record.phone).ok()
    };

    let status = if record.is_active {
        ShopStatus::Active
    } else {
        ShopStatus::Inactive
    };

    Ok(Shop {
        id: ShopId::new(doc.id),
        name: record.shop_name,
        owner_name: record.owner_name,
        email,
        phone,
        address: record.location,
        coords: record.location_coords.and_then(RawCoords::into_point),
        category: record.shop_type,
        registered_at: record.registration_date,
        status,
    })
}

/// Source of the full candidate set for nearby queries.
#[async_trait]
pub trait ShopDirectory: Send + Sync {
    /// Fetch a fresh snapshot of all shop records.
    ///
    /// # Errors
    ///
    /// Fails with the underlying cause when retrieval fails; never returns a
    /// partial set.
    async fn all_shops(&self) -> Result<Vec<Shop>, QueryError>;
}

/// Directory backed by the hosted backend's shops collection.
pub struct AppwriteShopDirectory {
    client: AppwriteClient,
    database_id: String,
    collection_id: String,
}

impl AppwriteShopDirectory {
    /// Create a directory over the configured shops collection.
    #[must_use]
    pub fn new(client: AppwriteClient, config: &AppwriteConfig) -> Self {
        Self {
            client,
            database_id: config.database_id.clone(),
            collection_id: config.shops_collection_id.clone(),
        }
    }
}

#[async_trait]
impl ShopDirectory for AppwriteShopDirectory {
    async fn all_shops(&self) -> Result<Vec<Shop>, QueryError> {
        // One round trip, no filter pushdown: the backend has no geo index,
        // so every invocation transfers the full collection.
        let list = self
            .client
            .list_documents::<ShopRecord>(
                &self.database_id,
                &self.collection_id,
                &[Query::Limit(CANDIDATE_PAGE_LIMIT)],
                Auth::ServerKey,
            )
            .await?;

        list.documents
            .into_iter()
            .map(shop_from_document)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record_json(coords: &str) -> String {
        format!(
            r#"{{
                "$id": "64f1c2",
                "shopName": "Sai Kirana Stores",
                "ownerName": "S. Patil",
                "email": "patil@example.com",
                "phone": "+91 98765 43210",
                "location": "Linking Road, Bandra West",
                {coords}
                "registrationDate": "2024-01-15T09:30:00Z",
                "isActive": true,
                "type": "General Store"
            }}"#
        )
    }

    #[test]
    fn test_decode_with_full_coords() {
        let json = record_json(
            r#""locationCoords": {"latitude": 19.0607, "longitude": 72.8362},"#,
        );
        let doc: Document<ShopRecord> = serde_json::from_str(&json).unwrap();
        let shop = shop_from_document(doc).unwrap();

        let coords = shop.coords.unwrap();
        assert!((coords.latitude - 19.0607).abs() < f64::EPSILON);
        assert!((coords.longitude - 72.8362).abs() < f64::EPSILON);
        assert_eq!(shop.name, "Sai Kirana Stores");
        assert_eq!(shop.category, "General Store");
        assert!(shop.status.is_active());
    }

    #[test]
    fn test_decode_without_coords() {
        let doc: Document<ShopRecord> = serde_json::from_str(&record_json("")).unwrap();
        let shop = shop_from_document(doc).unwrap();
        assert!(shop.coords.is_none());
    }

    #[test]
    fn test_partial_coords_collapse_to_none() {
        let json = record_json(r#""locationCoords": {"latitude": 19.0607},"#);
        let doc: Document<ShopRecord> = serde_json::from_str(&json).unwrap();
        let shop = shop_from_document(doc).unwrap();
        // One component is as unusable as zero components.
        assert!(shop.coords.is_none());
    }

    #[test]
    fn test_invalid_email_is_data_corruption() {
        let json = record_json("").replace("patil@example.com", "not-an-email");
        let doc: Document<ShopRecord> = serde_json::from_str(&json).unwrap();
        assert!(matches!(
            shop_from_document(doc),
            Err(QueryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_unparseable_phone_is_dropped() {
        let json = record_json("").replace("+91 98765 43210", "call me maybe");
        let doc: Document<ShopRecord> = serde_json::from_str(&json).unwrap();
        let shop = shop_from_document(doc).unwrap();
        assert!(shop.phone.is_none());
    }
}
