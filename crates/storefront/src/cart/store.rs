//! The cart store.

use std::sync::Arc;

use rust_decimal::Decimal;
use tasty_eats_core::{Cart, CartCommand, CartLine, CartTotals, ItemId, LineCandidate, Notification};
use tracing::{debug, info, instrument, warn};

use super::Notifier;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "tasty-eats-cart";

/// The authoritative cart for one session.
///
/// Constructed once per session with [`CartStore::load`] and passed to
/// whatever needs it. Every mutation writes the full cart to storage before
/// returning. The in-memory cart is the working copy; if a write fails the
/// change is kept in memory, announced, and the error returned.
pub struct CartStore {
    cart: Cart,
    storage: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Rehydrate the cart from storage.
    ///
    /// Never fails: an absent value starts an empty cart, and a value that
    /// cannot be read or decoded is logged, discarded, and replaced by an
    /// empty cart.
    #[instrument(skip_all)]
    pub fn load(storage: Arc<dyn KeyValueStore>, notifier: Arc<dyn Notifier>) -> Self {
        let cart = match storage.get(CART_STORAGE_KEY) {
            Ok(None) => {
                debug!("No stored cart, starting empty");
                Cart::new()
            }
            Ok(Some(raw)) => match Cart::from_json(&raw) {
                Ok(cart) => {
                    info!(lines = cart.len(), items = cart.total_items(), "Restored cart");
                    cart
                }
                Err(e) => {
                    warn!(error = %e, "Discarding malformed stored cart");
                    if let Err(e) = storage.remove(CART_STORAGE_KEY) {
                        warn!(error = %e, "Failed to remove malformed stored cart");
                    }
                    Cart::new()
                }
            },
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart, starting empty");
                Cart::new()
            }
        };

        Self {
            cart,
            storage,
            notifier,
        }
    }

    /// Add one unit of an item.
    ///
    /// Announces "Added …" for a new line or "Added another …" for an
    /// existing one.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be written to storage.
    #[instrument(skip_all)]
    pub fn add_item(
        &mut self,
        candidate: impl Into<LineCandidate>,
    ) -> Result<Option<Notification>, StorageError> {
        let candidate = candidate.into();
        debug!(id = %candidate.id, "Adding item");
        self.commit(CartCommand::Add(candidate))
    }

    /// Remove an item's line. Unknown ids change nothing and announce nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be written to storage.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, id: &ItemId) -> Result<Option<Notification>, StorageError> {
        self.commit(CartCommand::Remove(id.clone()))
    }

    /// Set an item's quantity. Anything below 1 behaves exactly like
    /// [`CartStore::remove_item`].
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be written to storage.
    #[instrument(skip(self))]
    pub fn update_quantity(
        &mut self,
        id: &ItemId,
        quantity: i64,
    ) -> Result<Option<Notification>, StorageError> {
        self.commit(CartCommand::SetQuantity {
            id: id.clone(),
            quantity,
        })
    }

    /// Empty the cart. Always announces "Cart cleared".
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be written to storage.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<Option<Notification>, StorageError> {
        self.commit(CartCommand::Clear)
    }

    fn commit(&mut self, command: CartCommand) -> Result<Option<Notification>, StorageError> {
        let notification = self.cart.apply(command).and_then(|event| {
            debug!(?event, "Cart changed");
            event.notification()
        });
        if let Some(notification) = &notification {
            self.notifier.notify(notification);
        }

        self.persist()?;
        Ok(notification)
    }

    fn persist(&self) -> Result<(), StorageError> {
        let raw = self.cart.to_json()?;
        self.storage.set(CART_STORAGE_KEY, &raw)
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.cart.subtotal()
    }

    #[must_use]
    pub fn tax(&self) -> Decimal {
        self.cart.tax()
    }

    #[must_use]
    pub fn delivery_fee(&self) -> Decimal {
        self.cart.delivery_fee()
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::RecordingNotifier;
    use crate::storage::MemoryStore;
    use tasty_eats_core::{DELIVERY_FEE, MenuItem};

    fn item(id: &str, name: &str, cents: i64) -> MenuItem {
        MenuItem {
            id: ItemId::new(id),
            name: name.to_owned(),
            price: Decimal::new(cents, 2),
            image: format!("https://img.example.com/{id}.jpg"),
            category: "Pizza".to_owned(),
            description: None,
        }
    }

    fn margherita() -> MenuItem {
        item("1", "Margherita Pizza", 1299)
    }

    fn fresh() -> (CartStore, Arc<MemoryStore>, Arc<RecordingNotifier>) {
        let storage = Arc::new(MemoryStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let store = CartStore::load(storage.clone(), notifier.clone());
        (store, storage, notifier)
    }

    /// A storage backend whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey(key.to_owned()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_first_run_starts_empty() {
        let (store, storage, notifier) = fresh();
        assert!(store.is_empty());
        assert_eq!(storage.get(CART_STORAGE_KEY).unwrap(), None);
        assert!(notifier.all().is_empty());
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let (mut store, storage, _) = fresh();
        let stored = || Cart::from_json(&storage.get(CART_STORAGE_KEY).unwrap().unwrap()).unwrap();

        store.add_item(margherita()).unwrap();
        assert_eq!(&stored(), store.cart());

        store.add_item(margherita()).unwrap();
        assert_eq!(stored().total_items(), 2);

        store.update_quantity(&ItemId::new("1"), 5).unwrap();
        assert_eq!(stored().total_items(), 5);

        store.remove_item(&ItemId::new("1")).unwrap();
        assert!(stored().is_empty());

        store.add_item(margherita()).unwrap();
        store.clear_cart().unwrap();
        assert!(stored().is_empty());
    }

    #[test]
    fn test_notifications_follow_operations() {
        let (mut store, _, notifier) = fresh();

        store.add_item(margherita()).unwrap();
        store.add_item(margherita()).unwrap();
        store.update_quantity(&ItemId::new("1"), 3).unwrap();
        store.remove_item(&ItemId::new("missing")).unwrap();
        store.remove_item(&ItemId::new("1")).unwrap();
        store.clear_cart().unwrap();

        assert_eq!(
            notifier.messages(),
            vec![
                "Added Margherita Pizza to your cart",
                "Added another Margherita Pizza to your cart",
                "Removed Margherita Pizza from your cart",
                "Cart cleared",
            ]
        );
    }

    #[test]
    fn test_returned_notification_matches_announced() {
        let (mut store, _, notifier) = fresh();
        let returned = store.add_item(margherita()).unwrap().unwrap();
        assert_eq!(notifier.all(), vec![returned]);
    }

    #[test]
    fn test_update_to_zero_removes_and_announces_removal() {
        let (mut store, _, notifier) = fresh();
        store.add_item(margherita()).unwrap();

        let notification = store.update_quantity(&ItemId::new("1"), 0).unwrap();

        assert!(store.is_empty());
        assert_eq!(store.delivery_fee(), Decimal::ZERO);
        assert_eq!(
            notification.map(|n| n.message),
            Some("Removed Margherita Pizza from your cart".to_owned())
        );
        assert_eq!(notifier.all().len(), 2);
    }

    #[test]
    fn test_restart_restores_identical_cart() {
        let storage = Arc::new(MemoryStore::new());
        let notifier = Arc::new(RecordingNotifier::new());

        let mut first = CartStore::load(storage.clone(), notifier.clone());
        first.add_item(item("3", "Caesar Salad", 899)).unwrap();
        first.add_item(margherita()).unwrap();
        first.update_quantity(&ItemId::new("3"), 4).unwrap();

        let second = CartStore::load(storage, notifier);
        assert_eq!(second.lines(), first.lines());
        assert_eq!(second.totals(), first.totals());
    }

    #[test]
    fn test_malformed_stored_cart_is_discarded() {
        let storage = Arc::new(MemoryStore::with_entry(CART_STORAGE_KEY, "{not json"));
        let notifier = Arc::new(RecordingNotifier::new());

        let store = CartStore::load(storage.clone(), notifier.clone());

        assert!(store.is_empty());
        assert_eq!(storage.get(CART_STORAGE_KEY).unwrap(), None);
        assert!(notifier.all().is_empty());
    }

    #[test]
    fn test_stored_cart_with_overflowing_totals_is_discarded() {
        let raw = r#"{"version":1,"items":[{"id":"1","name":"Margherita Pizza",
            "price":"79228162514264337593543950335","image":"","category":"Pizza","quantity":2}]}"#;
        let storage = Arc::new(MemoryStore::with_entry(CART_STORAGE_KEY, raw));

        let store = CartStore::load(storage.clone(), Arc::new(RecordingNotifier::new()));

        assert!(store.is_empty());
        assert_eq!(store.totals(), CartTotals::ZERO);
        assert_eq!(storage.get(CART_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_single_margherita_scenario() {
        let (mut store, _, _) = fresh();
        store.add_item(margherita()).unwrap();

        assert_eq!(store.subtotal(), Decimal::new(1299, 2));
        assert_eq!(store.total_items(), 1);
        assert_eq!(store.delivery_fee(), DELIVERY_FEE);
        assert_eq!(store.tax().round_dp(2), Decimal::new(107, 2));
        assert_eq!(store.total().round_dp(2), Decimal::new(1705, 2));
    }

    #[test]
    fn test_failed_write_keeps_change_in_memory() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut store = CartStore::load(Arc::new(ReadOnlyStore), notifier.clone());

        let result = store.add_item(margherita());

        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
        assert_eq!(store.total_items(), 1);
        assert_eq!(notifier.all().len(), 1);
    }
}
