//! The nearby-shop locator seam.

use async_trait::async_trait;
use thiserror::Error;

use gully_bazaar_core::{GeoPoint, RankedShop, rank_by_distance};

use crate::appwrite::AppwriteError;

use super::directory::ShopDirectory;

/// Errors from a nearby-shop query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Candidate-set retrieval failed; carries the underlying cause. The
    /// query yields no partial result and is not retried.
    #[error("nearby-shop query failed: {0}")]
    QueryFailed(#[from] AppwriteError),

    /// A stored record violated the collection schema in a way exclusion
    /// does not cover (missing coordinates are handled by exclusion, not
    /// by this variant).
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Finds shops near a point.
///
/// The only implementation today scans the full collection linearly. The
/// trait exists so an indexed locator (geohash buckets, R-tree) can replace
/// the scan without changing callers.
#[async_trait]
pub trait ShopLocator: Send + Sync {
    /// Shops within `radius_m` meters of `center`, each annotated with its
    /// distance in kilometers, ordered ascending.
    ///
    /// Every call reads a fresh snapshot of the candidate set. Concurrent
    /// callers do not interfere and share no cached state.
    ///
    /// # Errors
    ///
    /// Fails with [`QueryError::QueryFailed`] when retrieval fails; never
    /// returns a partial result.
    async fn nearby(&self, center: GeoPoint, radius_m: f64)
    -> Result<Vec<RankedShop>, QueryError>;
}

/// Locator that fetches the full candidate set and ranks it in memory.
///
/// One backend round trip per invocation, then a pure filter-and-sort. No
/// fan-out, no batching, no result cache. Linear in the collection size — a
/// known ceiling, carried deliberately until an indexed locator exists.
pub struct LinearScanLocator<D> {
    directory: D,
}

impl<D> LinearScanLocator<D> {
    /// Create a locator over the given candidate source.
    pub const fn new(directory: D) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl<D: ShopDirectory> ShopLocator for LinearScanLocator<D> {
    async fn nearby(
        &self,
        center: GeoPoint,
        radius_m: f64,
    ) -> Result<Vec<RankedShop>, QueryError> {
        let candidates = self.directory.all_shops().await?;
        Ok(rank_by_distance(center, radius_m, candidates))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{TimeZone, Utc};
    use gully_bazaar_core::{Email, Shop, ShopId, ShopStatus};

    const CENTER: GeoPoint = GeoPoint::new(19.0760, 72.8777);

    fn shop(name: &str, coords: Option<GeoPoint>) -> Shop {
        Shop {
            id: ShopId::new(format!("shop-{name}")),
            name: name.to_owned(),
            owner_name: "Owner".to_owned(),
            email: Email::parse("owner@example.com").unwrap(),
            phone: None,
            address: String::new(),
            coords,
            category: "General Store".to_owned(),
            registered_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
            status: ShopStatus::Active,
        }
    }

    /// Directory serving a fixed set, counting fetches.
    struct FixedDirectory {
        shops: Vec<Shop>,
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl ShopDirectory for FixedDirectory {
        async fn all_shops(&self) -> Result<Vec<Shop>, QueryError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.shops.clone())
        }
    }

    /// Directory that always fails retrieval.
    struct FailingDirectory;

    #[async_trait]
    impl ShopDirectory for FailingDirectory {
        async fn all_shops(&self) -> Result<Vec<Shop>, QueryError> {
            Err(QueryError::QueryFailed(AppwriteError::NotFound(
                "collection unreachable".to_string(),
            )))
        }
    }

    #[tokio::test]
    async fn test_nearby_ranks_and_filters() {
        let nearby_point = GeoPoint::new(CENTER.latitude + 0.005, CENTER.longitude);
        let faraway_point = GeoPoint::new(CENTER.latitude + 1.0, CENTER.longitude);

        let locator = LinearScanLocator::new(FixedDirectory {
            shops: vec![
                shop("far", Some(faraway_point)),
                shop("near", Some(nearby_point)),
                shop("uncharted", None),
            ],
            fetches: AtomicUsize::new(0),
        });

        let result = locator.nearby(CENTER, 3000.0).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].shop.name, "near");
        assert!(result[0].distance_km < 3.0);
    }

    #[tokio::test]
    async fn test_each_call_reads_a_fresh_snapshot() {
        let directory = FixedDirectory {
            shops: vec![shop("here", Some(CENTER))],
            fetches: AtomicUsize::new(0),
        };
        let locator = LinearScanLocator::new(directory);

        let _ = locator.nearby(CENTER, 3000.0).await.unwrap();
        let _ = locator.nearby(CENTER, 3000.0).await.unwrap();

        assert_eq!(locator.directory.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retrieval_failure_propagates_without_partial_result() {
        let locator = LinearScanLocator::new(FailingDirectory);
        let err = locator.nearby(CENTER, 3000.0).await.unwrap_err();
        assert!(matches!(err, QueryError::QueryFailed(_)));
        assert!(err.to_string().starts_with("nearby-shop query failed"));
    }
}
