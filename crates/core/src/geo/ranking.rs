//! Nearby-shop filtering and ranking.

use serde::{Deserialize, Serialize};

use super::distance::haversine_distance_m;
use crate::types::geo::GeoPoint;
use crate::types::shop::Shop;

/// Default search radius for nearby-shop queries, in meters.
pub const DEFAULT_NEARBY_RADIUS_M: f64 = 3000.0;

/// A shop annotated with its distance from a query center.
///
/// The distance is computed per query and never persisted; it is valid only
/// for the query/response cycle that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedShop {
    #[serde(flatten)]
    pub shop: Shop,
    /// Great-circle distance from the query center, in kilometers.
    pub distance_km: f64,
}

/// Rank a candidate set of shops by distance from `center`.
///
/// - Shops without a coordinate pair are excluded: distance cannot be
///   computed for them, and they are never defaulted to zero or silently
///   included at infinity. This is policy, not an error.
/// - Shops farther than `radius_m` meters (strictly greater; the boundary
///   itself is included) are filtered out.
/// - Results are sorted ascending by distance. An undefined distance sorts
///   as infinitely far; the sort is stable.
///
/// Returns freshly built values; the input records are consumed, never
/// mutated in place.
#[must_use]
pub fn rank_by_distance(center: GeoPoint, radius_m: f64, shops: Vec<Shop>) -> Vec<RankedShop> {
    let mut ranked: Vec<RankedShop> = shops
        .into_iter()
        .filter_map(|shop| {
            let coords = shop.coords?;
            let meters = haversine_distance_m(center, coords);
            (meters <= radius_m).then(|| RankedShop {
                shop,
                distance_km: meters / 1000.0,
            })
        })
        .collect();

    ranked.sort_by(|a, b| sort_key(a).total_cmp(&sort_key(b)));
    ranked
}

/// Ascending sort key; NaN sorts as infinitely far.
fn sort_key(ranked: &RankedShop) -> f64 {
    if ranked.distance_km.is_nan() {
        f64::INFINITY
    } else {
        ranked.distance_km
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geo::distance::EARTH_RADIUS_M;
    use crate::types::email::Email;
    use crate::types::id::ShopId;
    use crate::types::status::ShopStatus;
    use chrono::{TimeZone, Utc};

    const MUMBAI: GeoPoint = GeoPoint::new(19.0760, 72.8777);

    /// Meters covered by one degree of latitude under the spherical model.
    const METERS_PER_DEGREE: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

    fn shop(name: &str, coords: Option<GeoPoint>) -> Shop {
        Shop {
            id: ShopId::new(format!("shop-{name}")),
            name: name.to_owned(),
            owner_name: "Owner".to_owned(),
            email: Email::parse("owner@example.com").unwrap(),
            phone: None,
            address: "Linking Road, Bandra".to_owned(),
            coords,
            category: "General Store".to_owned(),
            registered_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
            status: ShopStatus::Active,
        }
    }

    /// A shop placed `meters` due north of `center`.
    fn shop_north_of(name: &str, center: GeoPoint, meters: f64) -> Shop {
        let delta_deg = meters / METERS_PER_DEGREE;
        shop(
            name,
            Some(GeoPoint::new(center.latitude + delta_deg, center.longitude)),
        )
    }

    #[test]
    fn test_excludes_shops_without_coords_at_any_radius() {
        let candidates = vec![shop("no-coords", None)];
        let result = rank_by_distance(MUMBAI, f64::MAX, candidates);
        assert!(result.is_empty());
    }

    #[test]
    fn test_ordering_invariant_ascending() {
        let candidates = vec![
            shop_north_of("far", MUMBAI, 2_500.0),
            shop_north_of("near", MUMBAI, 100.0),
            shop_north_of("mid", MUMBAI, 1_200.0),
        ];
        let result = rank_by_distance(MUMBAI, DEFAULT_NEARBY_RADIUS_M, candidates);
        assert_eq!(result.len(), 3);
        for pair in result.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
        assert_eq!(result[0].shop.name, "near");
        assert_eq!(result[2].shop.name, "far");
    }

    #[test]
    fn test_radius_boundary_is_inclusive() {
        // Pin the <= comparison: query with the radius set to the exact
        // distance the kernel computes for this candidate.
        let candidate = shop_north_of("on-the-line", MUMBAI, 3_000.0);
        let exact = haversine_distance_m(MUMBAI, candidate.coords.unwrap());

        let included = rank_by_distance(MUMBAI, exact, vec![candidate.clone()]);
        assert_eq!(included.len(), 1);

        // Any radius short of the computed distance excludes it.
        let excluded = rank_by_distance(MUMBAI, exact - 0.001, vec![candidate]);
        assert!(excluded.is_empty());
    }

    #[test]
    fn test_just_beyond_radius_is_excluded() {
        let candidates = vec![shop_north_of("beyond", MUMBAI, 3_001.0)];
        let result = rank_by_distance(MUMBAI, DEFAULT_NEARBY_RADIUS_M, candidates);
        assert!(result.is_empty());
    }

    #[test]
    fn test_idempotent_for_fixed_candidate_set() {
        let candidates = vec![
            shop_north_of("a", MUMBAI, 900.0),
            shop_north_of("b", MUMBAI, 450.0),
            shop("c", None),
        ];

        let first = rank_by_distance(MUMBAI, DEFAULT_NEARBY_RADIUS_M, candidates.clone());
        let second = rank_by_distance(MUMBAI, DEFAULT_NEARBY_RADIUS_M, candidates);

        assert_eq!(first.len(), second.len());
        for (x, y) in first.iter().zip(&second) {
            assert_eq!(x.shop.id, y.shop.id);
            assert!((x.distance_km - y.distance_km).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_mumbai_scenario() {
        // Candidates at 500 m, 2999 m, ~3000 m, 3001 m, plus one with no
        // coordinates. Radius 3000 m keeps exactly the first three, in
        // ascending order, annotated in kilometers. The boundary candidate
        // sits a hair inside the line so the assertion does not hinge on
        // the last ulp of the conversion.
        let candidates = vec![
            shop_north_of("boundary", MUMBAI, 3_000.0 - 1e-6),
            shop("uncharted", None),
            shop_north_of("close", MUMBAI, 500.0),
            shop_north_of("beyond", MUMBAI, 3_001.0),
            shop_north_of("inside", MUMBAI, 2_999.0),
        ];

        let result = rank_by_distance(MUMBAI, 3_000.0, candidates);

        let names: Vec<&str> = result.iter().map(|r| r.shop.name.as_str()).collect();
        assert_eq!(names, ["close", "inside", "boundary"]);

        assert!((result[0].distance_km - 0.5).abs() < 1e-6);
        assert!((result[1].distance_km - 2.999).abs() < 1e-6);
        assert!((result[2].distance_km - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_radius_keeps_only_coincident_shops() {
        let candidates = vec![
            shop("here", Some(MUMBAI)),
            shop_north_of("there", MUMBAI, 1.0),
        ];
        let result = rank_by_distance(MUMBAI, 0.0, candidates);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].shop.name, "here");
        assert!(result[0].distance_km.abs() < f64::EPSILON);
    }
}
