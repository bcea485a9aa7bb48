//! Mocked order placement.
//!
//! Nothing is charged and no order is sent anywhere. Placing an order
//! validates the form, waits a moment to imitate payment processing, records
//! a confirmation, and empties the cart.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tasty_eats_core::{
    CartLine, CartTotals, CheckoutDetails, Email, Notification, ValidationError,
};
use thiserror::Error;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::cart::{CartStore, Notifier};
use crate::storage::StorageError;

/// Why an order could not be placed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty!")]
    EmptyCart,

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("order placed but the cart could not be cleared: {0}")]
    Storage(#[from] StorageError),
}

/// Receipt for a placed order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderConfirmation {
    pub order_number: Uuid,
    pub placed_at: DateTime<Utc>,
    pub customer_name: String,
    pub email: Email,
    pub delivery_address: String,
    pub card_last_four: String,
    pub lines: Vec<CartLine>,
    /// Totals rounded to cents.
    pub totals: CartTotals,
}

/// Places mock orders against a cart store.
#[derive(Clone)]
pub struct Checkout {
    processing_delay: Duration,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for Checkout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checkout")
            .field("processing_delay", &self.processing_delay)
            .finish_non_exhaustive()
    }
}

impl Checkout {
    #[must_use]
    pub fn new(processing_delay: Duration, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            processing_delay,
            notifier,
        }
    }

    /// Place an order for everything in `cart`.
    ///
    /// On success the cart is cleared (announcing "Cart cleared") and
    /// "Order placed successfully!" is announced and returned.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Invalid`] if a form field is missing or the email is malformed
    /// - [`CheckoutError::EmptyCart`] if there is nothing to order
    /// - [`CheckoutError::Storage`] if the emptied cart could not be persisted
    #[instrument(skip(self, cart))]
    pub async fn place_order(
        &self,
        cart: &mut CartStore,
        details: &CheckoutDetails,
    ) -> Result<(OrderConfirmation, Notification), CheckoutError> {
        let checkout = details.validate()?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        if !self.processing_delay.is_zero() {
            tokio::time::sleep(self.processing_delay).await;
        }

        let confirmation = OrderConfirmation {
            order_number: Uuid::new_v4(),
            placed_at: Utc::now(),
            customer_name: checkout.name,
            email: checkout.email,
            delivery_address: format!(
                "{}, {} {}",
                checkout.address, checkout.city, checkout.zip_code
            ),
            card_last_four: checkout.card_last_four,
            lines: cart.lines().to_vec(),
            totals: cart.totals().rounded(),
        };

        cart.clear_cart()?;

        info!(
            order_number = %confirmation.order_number,
            items = confirmation.totals.total_items,
            total = %confirmation.totals.total,
            "Order placed"
        );
        let notification = Notification::success("Order placed successfully!");
        self.notifier.notify(&notification);

        Ok((confirmation, notification))
    }
}
