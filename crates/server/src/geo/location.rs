//! Device-position source.
//!
//! Stands in for the phone's location sensor when the directory is driven
//! from somewhere without one (the CLI, tests). One sample per request, no
//! continuous tracking, and a refused permission surfaces once as
//! [`LocationError::PermissionDenied`] — callers abort, they do not retry.

use async_trait::async_trait;
use thiserror::Error;

use gully_bazaar_core::GeoPoint;

/// Errors from requesting the current position.
#[derive(Debug, Error)]
pub enum LocationError {
    /// Access to the position was refused. Surfaced to the user as an
    /// actionable message; the operation aborts.
    #[error("location permission denied: {0}")]
    PermissionDenied(String),

    /// No position is available from this source.
    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// A single position sample.
#[derive(Debug, Clone, Copy)]
pub struct LocationSample {
    pub point: GeoPoint,
    /// Reported accuracy radius in meters.
    pub accuracy_m: f64,
}

/// Yields one position sample on request.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Request the current position.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::PermissionDenied`] when access is refused
    /// and [`LocationError::Unavailable`] when no sample can be produced.
    async fn current_position(&self) -> Result<LocationSample, LocationError>;
}

/// A fixed position, for callers that already know where they are.
pub struct FixedLocationSource(pub LocationSample);

#[async_trait]
impl LocationSource for FixedLocationSource {
    async fn current_position(&self) -> Result<LocationSample, LocationError> {
        Ok(self.0)
    }
}

/// Position from `GB_DEVICE_LAT` / `GB_DEVICE_LNG` (+ optional
/// `GB_DEVICE_ACCURACY`). Setting `GB_LOCATION_DENIED` simulates a refused
/// permission prompt.
pub struct EnvLocationSource;

#[async_trait]
impl LocationSource for EnvLocationSource {
    async fn current_position(&self) -> Result<LocationSample, LocationError> {
        sample_from_values(
            std::env::var("GB_DEVICE_LAT").ok(),
            std::env::var("GB_DEVICE_LNG").ok(),
            std::env::var("GB_DEVICE_ACCURACY").ok(),
            std::env::var("GB_LOCATION_DENIED").is_ok(),
        )
    }
}

/// Build a sample from raw string values; the env source is a thin wrapper.
fn sample_from_values(
    lat: Option<String>,
    lng: Option<String>,
    accuracy: Option<String>,
    denied: bool,
) -> Result<LocationSample, LocationError> {
    if denied {
        return Err(LocationError::PermissionDenied(
            "Permission to access location was denied".to_string(),
        ));
    }

    let (lat, lng) = match (lat, lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => {
            return Err(LocationError::Unavailable(
                "no device position configured (set GB_DEVICE_LAT and GB_DEVICE_LNG)".to_string(),
            ));
        }
    };

    let latitude = lat
        .parse::<f64>()
        .map_err(|e| LocationError::Unavailable(format!("bad latitude: {e}")))?;
    let longitude = lng
        .parse::<f64>()
        .map_err(|e| LocationError::Unavailable(format!("bad longitude: {e}")))?;
    let accuracy_m = accuracy
        .map(|a| {
            a.parse::<f64>()
                .map_err(|e| LocationError::Unavailable(format!("bad accuracy: {e}")))
        })
        .transpose()?
        .unwrap_or(50.0);

    Ok(LocationSample {
        point: GeoPoint::new(latitude, longitude),
        accuracy_m,
    })
}
