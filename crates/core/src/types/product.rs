//! Product records.

use serde::{Deserialize, Serialize};

use super::id::{ProductId, ShopId};
use super::price::Price;

/// A product listed under a shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Backend document ID.
    pub id: ProductId,
    /// Owning shop.
    pub shop_id: ShopId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Free-text description.
    pub description: String,
    /// Publicly dereferenceable image URL, or the original local reference
    /// when the upload fell back.
    pub image_url: String,
    /// Category label, e.g. "Grocery".
    pub category: String,
    /// Stock-keeping unit, empty when the shopkeeper did not assign one.
    pub sku: String,
    /// On-hand quantity. Informational only; no reservation is enforced.
    pub stock_quantity: u32,
}

/// Input for creating a product.
///
/// The backend assigns the document ID; the owning shop is supplied
/// separately by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
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
