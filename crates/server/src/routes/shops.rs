//! Shop route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use gully_bazaar_core::{DEFAULT_NEARBY_RADIUS_M, GeoPoint, RankedShop, ShopId, ShopStatus};

use crate::error::{AppError, Result};
use crate::middleware::{RequireAdmin, RequireSession};
use crate::services::catalog::CatalogService;
use crate::state::AppState;

/// Query parameters for the nearby-shop endpoint.
#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub lat: f64,
    pub lng: f64,
    /// Search radius in meters; defaults to 3000.
    pub radius: Option<f64>,
}

/// Query parameters for the admin shop listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Case-insensitive search over shop and owner names.
    pub q: Option<String>,
}

/// Body for the visibility change endpoint.
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: ShopStatus,
}

/// Shops within a radius of the caller's position, ordered by distance.
///
/// The public surface of the geospatial kernel: takes (lat, lng, optional
/// radius in meters) and returns shop records annotated with `distance_km`,
/// ascending. Coordinates are validated here at the API boundary; the
/// kernel itself trusts its inputs.
pub async fn nearby(
    State(state): State<AppState>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<Vec<RankedShop>>> {
    validate_latitude(params.lat)?;
    validate_longitude(params.lng)?;

    let radius_m = match params.radius {
        None => DEFAULT_NEARBY_RADIUS_M,
        Some(r) if r.is_finite() && r >= 0.0 => r,
        Some(r) => {
            return Err(AppError::BadRequest(format!(
                "radius must be a non-negative number of meters, got {r}"
            )));
        }
    };

    let center = GeoPoint::new(params.lat, params.lng);
    let ranked = state.locator().nearby(center, radius_m).await?;
    Ok(Json(ranked))
}

/// List or search all shops. Admin oversight only.
pub async fn list(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse> {
    let service = CatalogService::new(state.appwrite(), &state.config().appwrite);
    let shops = service.list_shops(params.q.as_deref()).await?;
    Ok(Json(shops))
}

/// Shop detail.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let service = CatalogService::new(state.appwrite(), &state.config().appwrite);
    let shop = service.get_shop(&ShopId::new(id)).await?;
    Ok(Json(shop))
}

/// Change a shop's directory visibility.
///
/// Allowed for the owning shopkeeper (matched by account email) and for
/// admin-labeled accounts.
pub async fn set_status(
    State(state): State<AppState>,
    RequireSession(secret): RequireSession,
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> Result<impl IntoResponse> {
    let shop_id = ShopId::new(id);
    let service = CatalogService::new(state.appwrite(), &state.config().appwrite);

    let account = state
        .appwrite()
        .get_account(&secret)
        .await
        .map_err(|_| AppError::Unauthorized("invalid or expired session".to_string()))?;

    if !account.is_admin() {
        let shop = service.get_shop(&shop_id).await?;
        if shop.email.as_str() != account.email {
            return Err(AppError::PermissionDenied(
                "only the owning shopkeeper or an admin may change a shop".to_string(),
            ));
        }
    }

    let shop = service.set_shop_status(&shop_id, body.status).await?;
    Ok(Json(shop))
}

fn validate_latitude(lat: f64) -> Result<()> {
    if lat.is_finite() && (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "latitude must be within -90..90, got {lat}"
        )))
    }
}

fn validate_longitude(lng: f64) -> Result<()> {
    if lng.is_finite() && (-180.0..=180.0).contains(&lng) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "longitude must be within -180..180, got {lng}"
        )))
    }
}
