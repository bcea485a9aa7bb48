//! Cart management commands.
//!
//! Each mutating command prints the notification it produced (if any)
//! followed by the updated cart.

use tasty_eats_core::{ItemId, Notification};
use tasty_eats_storefront::cart::CartStore;
use tasty_eats_storefront::catalog::CatalogService;

use super::CliError;
use crate::output;

fn report(store: &CartStore, notification: Option<&Notification>) -> String {
    let mut out = notification.map(output::notification).unwrap_or_default();
    out.push_str(&output::cart(store));
    out
}

pub fn show(store: &CartStore) -> String {
    output::cart(store)
}

/// Add one unit of a menu item.
///
/// # Errors
///
/// Returns an error if the item is unknown or the cart cannot be saved.
pub async fn add(
    store: &mut CartStore,
    catalog: &CatalogService,
    id: &ItemId,
) -> Result<String, CliError> {
    let item = catalog
        .get_by_id(id)
        .await
        .ok_or_else(|| CliError::UnknownItem(id.clone()))?;
    let notification = store.add_item(item)?;
    Ok(report(store, notification.as_ref()))
}

/// Remove an item's line.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove(store: &mut CartStore, id: &ItemId) -> Result<String, CliError> {
    let notification = store.remove_item(id)?;
    Ok(report(store, notification.as_ref()))
}

/// Set an item's quantity.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn set_quantity(store: &mut CartStore, id: &ItemId, quantity: i64) -> Result<String, CliError> {
    let notification = store.update_quantity(id, quantity)?;
    Ok(report(store, notification.as_ref()))
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn clear(store: &mut CartStore) -> Result<String, CliError> {
    let notification = store.clear_cart()?;
    Ok(report(store, notification.as_ref()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use tasty_eats_storefront::cart::RecordingNotifier;
    use tasty_eats_storefront::catalog::{Catalog, Latency};
    use tasty_eats_storefront::storage::FileStore;

    fn open(dir: &std::path::Path) -> CartStore {
        CartStore::load(
            Arc::new(FileStore::new(dir)),
            Arc::new(RecordingNotifier::new()),
        )
    }

    #[tokio::test]
    async fn test_cart_survives_between_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = CatalogService::new(Catalog::seeded(), Latency::Instant);

        let mut first = open(dir.path());
        let text = add(&mut first, &catalog, &ItemId::new("1")).await.unwrap();
        assert!(text.starts_with("[ok] Added Margherita Pizza to your cart"));
        set_quantity(&mut first, &ItemId::new("1"), 2).unwrap();
        drop(first);

        let second = open(dir.path());
        assert_eq!(second.total_items(), 2);
        assert!(show(&second).contains("$25.98"));
    }

    #[tokio::test]
    async fn test_add_unknown_item_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = CatalogService::new(Catalog::seeded(), Latency::Instant);
        let mut store = open(dir.path());

        let result = add(&mut store, &catalog, &ItemId::new("nope")).await;

        assert!(matches!(result, Err(CliError::UnknownItem(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_zero_reports_removal() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(dir.path());
        store.add_item(&Catalog::seeded().items()[2]).unwrap();

        let text = set_quantity(&mut store, &ItemId::new("3"), 0).unwrap();

        assert_eq!(
            text,
            "[info] Removed Caesar Salad from your cart\nYour cart is empty.\n"
        );
    }

    #[test]
    fn test_clear_reports_and_empties() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(dir.path());
        let text = clear(&mut store).unwrap();
        assert_eq!(text, "[info] Cart cleared\nYour cart is empty.\n");
    }
}
