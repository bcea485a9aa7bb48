//! Cart route handlers.
//!
//! Every mutation returns the updated cart together with the notification it
//! produced, so clients can show a toast without a second request.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tasty_eats_core::{CartLine, ItemId, Notification};
use tracing::instrument;

use crate::cart::CartStore;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    #[serde(flatten)]
    pub line: CartLine,
    pub line_total: Decimal,
}

/// Cart display data with totals rounded to cents.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub item_count: u64,
}

impl From<&CartStore> for CartView {
    fn from(store: &CartStore) -> Self {
        let totals = store.totals().rounded();
        Self {
            items: store
                .lines()
                .iter()
                .map(|line| CartItemView {
                    line: line.clone(),
                    line_total: line.line_total(),
                })
                .collect(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            delivery_fee: totals.delivery_fee,
            total: totals.total,
            item_count: totals.total_items,
        }
    }
}

/// Response to a cart mutation.
#[derive(Debug, Clone, Serialize)]
pub struct CartMutationResponse {
    pub cart: CartView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

impl CartMutationResponse {
    fn new(store: &CartStore, notification: Option<Notification>) -> Json<Self> {
        Json(Self {
            cart: CartView::from(store),
            notification,
        })
    }
}

/// Cart badge count.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CartCount {
    pub count: u64,
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub id: ItemId,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

/// Current cart contents and totals.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let store = state.cart().lock().await;
    Json(CartView::from(&*store))
}

/// Total number of units in the cart.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    let store = state.cart().lock().await;
    Json(CartCount {
        count: store.total_items(),
    })
}

/// Add one unit of a menu item.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartMutationResponse>> {
    let item = state
        .catalog()
        .get_by_id(&request.id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("menu item {}", request.id)))?;

    add_breadcrumb("cart", "Added item", Some(&[("item_id", item.id.as_str())]));

    let mut store = state.cart().lock().await;
    let notification = store.add_item(item)?;
    Ok(CartMutationResponse::new(&store, notification))
}

/// Set an item's quantity. Zero or less removes it.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<CartMutationResponse>> {
    let quantity = request.quantity.to_string();
    add_breadcrumb(
        "cart",
        "Updated quantity",
        Some(&[("item_id", id.as_str()), ("quantity", quantity.as_str())]),
    );

    let mut store = state.cart().lock().await;
    let notification = store.update_quantity(&id, request.quantity)?;
    Ok(CartMutationResponse::new(&store, notification))
}

/// Remove an item's line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> Result<Json<CartMutationResponse>> {
    add_breadcrumb("cart", "Removed item", Some(&[("item_id", id.as_str())]));

    let mut store = state.cart().lock().await;
    let notification = store.remove_item(&id)?;
    Ok(CartMutationResponse::new(&store, notification))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Json<CartMutationResponse>> {
    add_breadcrumb("cart", "Cleared cart", None);

    let mut store = state.cart().lock().await;
    let notification = store.clear_cart()?;
    Ok(CartMutationResponse::new(&store, notification))
}
