//! Great-circle distance via the haversine formula.

use crate::types::geo::GeoPoint;

/// Mean Earth radius in meters (spherical approximation).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Distance between antipodal points under the spherical approximation,
/// i.e. half the mean circumference. Upper bound for any return value of
/// [`haversine_distance_m`].
pub const MAX_ANTIPODAL_DISTANCE_M: f64 = EARTH_RADIUS_M * std::f64::consts::PI;

/// Great-circle distance between two points, in meters.
///
/// Uses the haversine formula against a spherical Earth. Inputs are decimal
/// degrees; ranges are not validated — out-of-range values produce
/// mathematically defined but meaningless results, which is the caller's
/// responsibility to avoid.
///
/// Pure function: no side effects, no shared state, safe to call
/// concurrently.
#[must_use]
pub fn haversine_distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const MUMBAI: GeoPoint = GeoPoint::new(19.0760, 72.8777);
    const PUNE: GeoPoint = GeoPoint::new(18.5204, 73.8567);

    #[test]
    fn test_coincident_points_are_zero() {
        assert!(haversine_distance_m(MUMBAI, MUMBAI).abs() < f64::EPSILON);
        let origin = GeoPoint::new(0.0, 0.0);
        assert!(haversine_distance_m(origin, origin).abs() < f64::EPSILON);
    }

    #[test]
    fn test_symmetry() {
        let forward = haversine_distance_m(MUMBAI, PUNE);
        let backward = haversine_distance_m(PUNE, MUMBAI);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        // One degree of longitude at the equator is ~111.195 km under the
        // spherical approximation (R * pi / 180).
        let d = haversine_distance_m(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn test_triangle_inequality_within_tolerance() {
        let a = MUMBAI;
        let b = PUNE;
        let c = GeoPoint::new(18.9220, 72.8347); // Colaba

        let ab = haversine_distance_m(a, b);
        let ac = haversine_distance_m(a, c);
        let cb = haversine_distance_m(c, b);

        // Exact inequality is not guaranteed under floating point; allow a
        // small absolute slack.
        assert!(ab <= ac + cb + 1e-6);
    }

    #[test]
    fn test_approaches_antipodal_maximum() {
        let d = haversine_distance_m(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        assert!((d - MAX_ANTIPODAL_DISTANCE_M).abs() < 1.0, "got {d}");
        assert!(d <= MAX_ANTIPODAL_DISTANCE_M + 1e-6);
    }

    #[test]
    fn test_known_city_pair() {
        // Mumbai to Pune is roughly 120 km as the crow flies.
        let d = haversine_distance_m(MUMBAI, PUNE);
        assert!((d - 120_000.0).abs() < 5_000.0, "got {d}");
    }

    #[test]
    fn test_non_negative() {
        let d = haversine_distance_m(GeoPoint::new(-33.8688, 151.2093), MUMBAI);
        assert!(d >= 0.0);
    }
}
