//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ItemId, MenuItem};

/// One menu item plus the quantity selected for purchase.
///
/// A line never holds quantity 0: the cart drops a line instead of storing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ItemId,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub category: String,
    pub quantity: u32,
}

impl CartLine {
    /// Create a line for `candidate` with quantity 1.
    #[must_use]
    pub fn first(candidate: LineCandidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            price: candidate.price,
            image: candidate.image,
            category: candidate.category,
            quantity: 1,
        }
    }

    /// `price * quantity`, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.checked_line_total().unwrap_or(Decimal::MAX)
    }

    /// `price * quantity`, or `None` if it does not fit in a [`Decimal`].
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// The fields of a line without its quantity, as passed to an add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCandidate {
    pub id: ItemId,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub category: String,
}

impl From<&MenuItem> for LineCandidate {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
            category: item.category.clone(),
        }
    }
}

impl From<MenuItem> for LineCandidate {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
            image: item.image,
            category: item.category,
        }
    }
}
