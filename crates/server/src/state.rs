//! Application state shared across handlers.

use std::sync::Arc;

use crate::appwrite::AppwriteClient;
use crate::config::ServerConfig;
use crate::geo::directory::AppwriteShopDirectory;
use crate::geo::locator::{LinearScanLocator, ShopLocator};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// backend client, the configured locator, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    appwrite: AppwriteClient,
    locator: Arc<dyn ShopLocator>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Wires the linear-scan locator over the backend shops collection; the
    /// locator sits behind a trait object so an indexed implementation can
    /// be dropped in here without touching handlers.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let appwrite = AppwriteClient::new(&config.appwrite);
        let directory = AppwriteShopDirectory::new(appwrite.clone(), &config.appwrite);
        let locator: Arc<dyn ShopLocator> = Arc::new(LinearScanLocator::new(directory));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                appwrite,
                locator,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the hosted backend client.
    #[must_use]
    pub fn appwrite(&self) -> &AppwriteClient {
        &self.inner.appwrite
    }

    /// Get a reference to the shop locator.
    #[must_use]
    pub fn locator(&self) -> &dyn ShopLocator {
        self.inner.locator.as_ref()
    }
}
