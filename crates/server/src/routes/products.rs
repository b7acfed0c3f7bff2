//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use gully_bazaar_core::{NewProduct, Price, ShopId};

use crate::error::Result;
use crate::middleware::RequireSession;
use crate::services::catalog::CatalogService;
use crate::state::AppState;

/// Body for product creation, in the shape the mobile client posts.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductBody {
    pub shop_id: String,
    pub name: String,
    /// Decimal amount in the default currency.
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub stock_quantity: u32,
}

/// Add a product under a shop.
pub async fn add(
    State(state): State<AppState>,
    RequireSession(secret): RequireSession,
    Json(body): Json<AddProductBody>,
) -> Result<impl IntoResponse> {
    let service = CatalogService::new(state.appwrite(), &state.config().appwrite);

    let shop_id = ShopId::new(body.shop_id);
    let product = NewProduct {
        name: body.name,
        price: Price::rupees(body.price),
        description: body.description,
        image_url: body.image_url,
        category: body.category,
        sku: body.sku,
        stock_quantity: body.stock_quantity,
    };

    let created = service.add_product(&secret, &shop_id, product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Products of a shop, in backend-default order.
pub async fn list_for_shop(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let service = CatalogService::new(state.appwrite(), &state.config().appwrite);
    let products = service.get_shop_products(&ShopId::new(id)).await?;
    Ok(Json(products))
}
