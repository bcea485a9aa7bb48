//! Menu browsing commands.

use tasty_eats_core::{ALL_CATEGORY, ItemId};
use tasty_eats_storefront::catalog::CatalogService;

use super::CliError;
use crate::output;

/// List items matching `search`, or else in `category` (default `All`).
pub async fn list(catalog: &CatalogService, category: Option<&str>, search: Option<&str>) -> String {
    let items = match search {
        Some(query) => catalog.search(query).await,
        None => {
            catalog
                .list_by_category(category.unwrap_or(ALL_CATEGORY))
                .await
        }
    };
    output::menu_table(&items)
}

pub async fn featured(catalog: &CatalogService, limit: usize) -> String {
    output::menu_table(&catalog.featured(limit).await)
}

/// Details of one item.
///
/// # Errors
///
/// Returns [`CliError::UnknownItem`] if no item has this ID.
pub async fn show(catalog: &CatalogService, id: &ItemId) -> Result<String, CliError> {
    catalog
        .get_by_id(id)
        .await
        .map(|item| output::menu_item(&item))
        .ok_or_else(|| CliError::UnknownItem(id.clone()))
}

pub async fn categories(catalog: &CatalogService) -> String {
    output::categories(&catalog.list_categories().await)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tasty_eats_storefront::catalog::{Catalog, Latency};

    fn catalog() -> CatalogService {
        CatalogService::new(Catalog::seeded(), Latency::Instant)
    }

    #[tokio::test]
    async fn test_search_overrides_category() {
        let text = list(&catalog(), Some("Pizza"), Some("sushi")).await;
        assert!(text.contains("Sushi Rolls"));
        assert!(!text.contains("Margherita Pizza"));
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let text = list(&catalog(), Some("Curry"), None).await;
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("Chicken Tikka Masala"));

        let everything = list(&catalog(), None, None).await;
        assert_eq!(everything.lines().count(), 6);
    }

    #[tokio::test]
    async fn test_show_unknown_item() {
        let err = show(&catalog(), &ItemId::new("99")).await.unwrap_err();
        assert_eq!(err.to_string(), "No menu item with ID 99");
    }

    #[tokio::test]
    async fn test_categories_start_with_all() {
        let text = categories(&catalog()).await;
        assert!(text.lines().next().unwrap().ends_with("All"));
        assert_eq!(text.lines().count(), 7);
    }
}
