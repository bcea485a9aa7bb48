//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cart::{CartStore, Notifier, TracingNotifier};
use crate::catalog::{Catalog, CatalogError, CatalogService};
use crate::checkout::Checkout;
use crate::config::StorefrontConfig;
use crate::storage::{FileStore, KeyValueStore};

/// Error building application state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The cart sits behind an async
/// mutex so cart operations run one at a time; catalog queries share the
/// immutable menu and run concurrently.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogService,
    cart: Mutex<CartStore>,
    checkout: Checkout,
}

impl AppState {
    /// Assemble state from already-built parts.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        storage: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let catalog = CatalogService::new(catalog, config.catalog_latency);
        let cart = CartStore::load(storage, notifier.clone());
        let checkout = Checkout::new(config.checkout_delay, notifier);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(cart),
                checkout,
            }),
        }
    }

    /// Build state from configuration: the configured or built-in menu, a
    /// file store in the data directory, and log-based notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if `CATALOG_PATH` is set and the file cannot be loaded.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, StartupError> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_json_file(path)?,
            None => Catalog::seeded(),
        };
        tracing::info!(items = catalog.items().len(), "Catalog loaded");

        let storage = Arc::new(FileStore::new(config.data_dir.clone()));
        Ok(Self::new(config, catalog, storage, Arc::new(TracingNotifier)))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog query service.
    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    /// Get the cart store lock.
    #[must_use]
    pub fn cart(&self) -> &Mutex<CartStore> {
        &self.inner.cart
    }

    /// Get a reference to the order placement service.
    #[must_use]
    pub fn checkout(&self) -> &Checkout {
        &self.inner.checkout
    }
}
