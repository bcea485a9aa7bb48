//! Menu route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tasty_eats_core::{ALL_CATEGORY, Category, ItemId, MenuItem};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Number of items on the featured shelf when no limit is given.
pub const DEFAULT_FEATURED_LIMIT: usize = 3;

/// Menu listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    /// Exact category label; defaults to `All`.
    pub category: Option<String>,
    /// Name search; takes precedence over `category` when present.
    pub q: Option<String>,
}

/// Featured listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<usize>,
}

/// List menu items by search term or category.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Json<Vec<MenuItem>> {
    let items = match query.q {
        Some(q) => state.catalog().search(&q).await,
        None => {
            let category = query.category.as_deref().unwrap_or(ALL_CATEGORY);
            state.catalog().list_by_category(category).await
        }
    };
    Json(items)
}

/// First few items of the menu.
#[instrument(skip(state))]
pub async fn featured(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> Json<Vec<MenuItem>> {
    let limit = query.limit.unwrap_or(DEFAULT_FEATURED_LIMIT);
    Json(state.catalog().featured(limit).await)
}

/// A single menu item.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<ItemId>) -> Result<Json<MenuItem>> {
    state
        .catalog()
        .get_by_id(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("menu item {id}")))
}

/// Category filter options, `All` first.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog().list_categories().await)
}
