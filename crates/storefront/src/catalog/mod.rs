//! Menu catalog and its query service.
//!
//! A [`Catalog`] is the fixed, validated list of menu items for the process
//! lifetime. [`CatalogService`] answers read-only queries over it, suspending
//! each call according to an injected [`Latency`].

mod latency;
mod seed;
mod service;

pub use latency::{CatalogQuery, Latency};
pub use service::CatalogService;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use tasty_eats_core::{CartTotals, ItemId, MenuItem};
use thiserror::Error;

/// Errors building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("menu item id {0} is used more than once")]
    DuplicateId(ItemId),

    #[error("menu item {0} has a negative price")]
    NegativePrice(ItemId),

    #[error("menu item {0} is priced too high to total a cart")]
    PriceTooLarge(ItemId),
}

/// An immutable, ordered set of menu items with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Build a catalog, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if two items share an id, a price is negative, or a
    /// single unit of an item would overflow the cart totals.
    pub fn new(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice(item.id.clone()));
            }
            if CartTotals::checked_from_subtotal(item.price, 1, true).is_none() {
                return Err(CatalogError::PriceTooLarge(item.id.clone()));
            }
            if !seen.insert(&item.id) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    /// The built-in demo menu.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            items: seed::menu(),
        }
    }

    /// Load a catalog from a JSON array of menu items.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the items
    /// fail validation.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_owned(),
            source,
        })?;
        let items = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_owned(),
            source,
        })?;
        Self::new(items)
    }

    /// Items in definition order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }
}
