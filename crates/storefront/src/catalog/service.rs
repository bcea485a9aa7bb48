//! Asynchronous, read-only catalog queries.

use std::sync::Arc;

use tasty_eats_core::{Category, ItemId, MenuItem};
use tracing::instrument;

use super::{Catalog, CatalogQuery, Latency};

/// Answers menu queries as if they came from a remote backend.
///
/// Every query awaits the configured [`Latency`] and then answers from the
/// in-memory catalog. Queries cannot fail and never change anything, so they
/// may run concurrently. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct CatalogService {
    catalog: Arc<Catalog>,
    latency: Latency,
}

impl CatalogService {
    #[must_use]
    pub fn new(catalog: Catalog, latency: Latency) -> Self {
        Self {
            catalog: Arc::new(catalog),
            latency,
        }
    }

    /// The configured latency strategy.
    #[must_use]
    pub const fn latency(&self) -> Latency {
        self.latency
    }

    /// Every item, in catalog order.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Vec<MenuItem> {
        self.latency.wait(CatalogQuery::ListAll).await;
        self.catalog.items().to_vec()
    }

    /// The item with `id`, or `None`.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &ItemId) -> Option<MenuItem> {
        self.latency.wait(CatalogQuery::GetById).await;
        self.catalog.items().iter().find(|item| &item.id == id).cloned()
    }

    /// Items whose category equals `label` exactly; `"All"` returns everything.
    #[instrument(skip(self))]
    pub async fn list_by_category(&self, label: &str) -> Vec<MenuItem> {
        self.latency.wait(CatalogQuery::ByCategory).await;
        self.catalog
            .items()
            .iter()
            .filter(|item| item.in_category(label))
            .cloned()
            .collect()
    }

    /// `All` followed by each distinct category in first-seen order.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Vec<Category> {
        self.latency.wait(CatalogQuery::Categories).await;
        Category::list_for(self.catalog.items())
    }

    /// Case-insensitive substring search on item names.
    ///
    /// A blank query behaves exactly like [`CatalogService::list_all`].
    /// Any other query is matched as given, surrounding whitespace included.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Vec<MenuItem> {
        if query.trim().is_empty() {
            return self.list_all().await;
        }
        let needle = query.to_lowercase();

        self.latency.wait(CatalogQuery::Search).await;
        self.catalog
            .items()
            .iter()
            .filter(|item| item.name_contains(&needle))
            .cloned()
            .collect()
    }

    /// The first `limit` items in catalog order.
    #[instrument(skip(self))]
    pub async fn featured(&self, limit: usize) -> Vec<MenuItem> {
        self.latency.wait(CatalogQuery::Featured).await;
        self.catalog.items().iter().take(limit).cloned().collect()
    }
}
