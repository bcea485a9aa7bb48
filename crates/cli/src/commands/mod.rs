//! CLI command implementations.
//!
//! Each command returns the text to print; `main` writes it to stdout.

pub mod cart;
pub mod menu;

use tasty_eats_core::ItemId;
use tasty_eats_storefront::catalog::CatalogError;
use tasty_eats_storefront::storage::StorageError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The menu file could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The cart could not be saved.
    #[error("Failed to save cart: {0}")]
    Storage(#[from] StorageError),

    /// No menu item has this ID.
    #[error("No menu item with ID {0}")]
    UnknownItem(ItemId),
}
