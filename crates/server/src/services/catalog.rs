//! Shop and product catalog operations.
//!
//! Thin passthroughs to the document store. Writes are single round trips
//! with no idempotency key — a repeated call after a timeout can create a
//! duplicate product, and the collection schema is the only uniqueness
//! guard.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gully_bazaar_core::{NewProduct, Price, Product, ProductId, Shop, ShopId, ShopStatus};

use crate::appwrite::types::Query;
use crate::appwrite::{AppwriteClient, AppwriteError, Auth, Document};
use crate::config::AppwriteConfig;
use crate::geo::directory::{ShopRecord, shop_from_document};
use crate::geo::locator::QueryError;

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Backend error.
    #[error("backend error: {0}")]
    Backend(#[from] AppwriteError),

    /// Requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A stored record violated the collection schema.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl From<QueryError> for CatalogError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::QueryFailed(e) => Self::Backend(e),
            QueryError::DataCorruption(msg) => Self::DataCorruption(msg),
        }
    }
}

/// Wire shape of a product document, matching the collection schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub shop_id: String,
    pub name: String,
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

/// Convert a stored document into the domain [`Product`].
fn product_from_document(doc: Document<ProductRecord>) -> Product {
    let record = doc.data;
    Product {
        id: ProductId::new(doc.id),
        shop_id: ShopId::new(record.shop_id),
        name: record.name,
        price: Price::rupees(record.price),
        description: record.description,
        image_url: record.image_url,
        category: record.category,
        sku: record.sku,
        stock_quantity: record.stock_quantity,
    }
}

/// Catalog service over the shops and products collections.
pub struct CatalogService<'a> {
    client: &'a AppwriteClient,
    config: &'a AppwriteConfig,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(client: &'a AppwriteClient, config: &'a AppwriteConfig) -> Self {
        Self { client, config }
    }

    /// Create one product under a shop.
    ///
    /// No client-side uniqueness or linkage check against shop existence;
    /// the write is attributed to the presenting session.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection rejects the payload or the
    /// request fails.
    pub async fn add_product(
        &self,
        session_secret: &str,
        shop_id: &ShopId,
        product: NewProduct,
    ) -> Result<Product, CatalogError> {
        let record = ProductRecord {
            shop_id: shop_id.as_str().to_owned(),
            name: product.name,
            price: product.price.amount,
            description: product.description,
            image_url: product.image_url,
            category: product.category,
            sku: product.sku,
            stock_quantity: product.stock_quantity,
        };

        let doc = self
            .client
            .create_document::<ProductRecord, ProductRecord>(
                &self.config.database_id,
                &self.config.products_collection_id,
                record,
                Auth::UserSession(session_secret),
            )
            .await?;

        let product = product_from_document(doc);
        tracing::info!(product = %product.id, shop = %product.shop_id, "product added");
        Ok(product)
    }

    /// All products whose `shopId` equals the given shop, in backend-default
    /// order (no explicit sort is imposed).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_shop_products(&self, shop_id: &ShopId) -> Result<Vec<Product>, CatalogError> {
        let list = self
            .client
            .list_documents::<ProductRecord>(
                &self.config.database_id,
                &self.config.products_collection_id,
                &[Query::Equal("shopId", shop_id.as_str().to_owned())],
                Auth::ServerKey,
            )
            .await?;

        Ok(list.documents.into_iter().map(product_from_document).collect())
    }

    /// Get a single shop by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no such shop exists.
    pub async fn get_shop(&self, shop_id: &ShopId) -> Result<Shop, CatalogError> {
        let doc = self
            .client
            .get_document::<ShopRecord>(
                &self.config.database_id,
                &self.config.shops_collection_id,
                shop_id.as_str(),
                Auth::ServerKey,
            )
            .await
            .map_err(|e| match e {
                AppwriteError::NotFound(_) => {
                    CatalogError::NotFound(format!("shop {shop_id}"))
                }
                other => CatalogError::Backend(other),
            })?;

        Ok(shop_from_document(doc)?)
    }

    /// List all shops, optionally filtered by a case-insensitive search over
    /// name and owner.
    ///
    /// The filter runs client-side over the full listing, the same way the
    /// oversight screens search.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_shops(&self, search: Option<&str>) -> Result<Vec<Shop>, CatalogError> {
        let list = self
            .client
            .list_documents::<ShopRecord>(
                &self.config.database_id,
                &self.config.shops_collection_id,
                &[],
                Auth::ServerKey,
            )
            .await?;

        let mut shops = list
            .documents
            .into_iter()
            .map(shop_from_document)
            .collect::<Result<Vec<Shop>, QueryError>>()?;

        if let Some(needle) = search {
            let needle = needle.to_lowercase();
            shops.retain(|s| {
                s.name.to_lowercase().contains(&needle)
                    || s.owner_name.to_lowercase().contains(&needle)
            });
        }

        Ok(shops)
    }

    /// Set a shop's directory visibility.
    ///
    /// Authorization (owning shopkeeper or admin) is the route's job; the
    /// write itself runs with server privileges.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no such shop exists.
    pub async fn set_shop_status(
        &self,
        shop_id: &ShopId,
        status: ShopStatus,
    ) -> Result<Shop, CatalogError> {
        let doc = self
            .client
            .update_document::<serde_json::Value, ShopRecord>(
                &self.config.database_id,
                &self.config.shops_collection_id,
                shop_id.as_str(),
                serde_json::json!({ "isActive": status.is_active() }),
                Auth::ServerKey,
            )
            .await
            .map_err(|e| match e {
                AppwriteError::NotFound(_) => {
                    CatalogError::NotFound(format!("shop {shop_id}"))
                }
                other => CatalogError::Backend(other),
            })?;

        Ok(shop_from_document(doc)?)
    }
}
