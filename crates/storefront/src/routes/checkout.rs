//! Checkout route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tasty_eats_core::{CheckoutDetails, Notification};
use tracing::instrument;

use super::cart::CartView;
use crate::checkout::OrderConfirmation;
use crate::error::Result;
use crate::state::AppState;

/// Response to a placed order.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub order: OrderConfirmation,
    pub notification: Notification,
    /// The cart after checkout, always empty.
    pub cart: CartView,
}

/// Place a mock order for the whole cart.
///
/// Holds the cart lock for the simulated processing time so no cart change
/// can slip in between validation and clearing.
#[instrument(skip(state, details))]
pub async fn place_order(
    State(state): State<AppState>,
    Json(details): Json<CheckoutDetails>,
) -> Result<Json<CheckoutResponse>> {
    let mut store = state.cart().lock().await;
    let (order, notification) = state.checkout().place_order(&mut store, &details).await?;

    Ok(Json(CheckoutResponse {
        order,
        notification,
        cart: CartView::from(&*store),
    }))
}
