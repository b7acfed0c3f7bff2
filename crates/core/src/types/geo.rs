//! Geographic point type.

use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
///
/// Represents either a browsing user's current position or a shop's
/// registered position. A shop's coordinate field is `Option<GeoPoint>`:
/// either both components are present or the shop has no coordinate at all.
/// Partially-present coordinates cannot be expressed.
///
/// Latitude and longitude ranges are not validated here; callers that accept
/// untrusted input are responsible for range checks. Out-of-range values
/// produce mathematically defined but meaningless distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees (−90..90).
    pub latitude: f64,
    /// Longitude in decimal degrees (−180..180).
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point from decimal-degree components.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_field_names() {
        let p = GeoPoint::new(19.0760, 72.8777);
        let json = serde_json::to_value(p).expect("serialize");
        assert!((json["latitude"].as_f64().expect("latitude") - 19.0760).abs() < f64::EPSILON);
        assert!((json["longitude"].as_f64().expect("longitude") - 72.8777).abs() < f64::EPSILON);
    }
}
