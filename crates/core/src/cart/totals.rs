//! Derived cart totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::price::round_cents;

/// Sales tax applied to the subtotal (8.25%).
pub const TAX_RATE: Decimal = Decimal::from_parts(825, 0, 0, false, 4);

/// Flat delivery fee charged on any non-empty cart.
pub const DELIVERY_FEE: Decimal = Decimal::from_parts(299, 0, 0, false, 2);

/// Every derived value of a cart, computed in one pass.
///
/// Figures are exact; call [`CartTotals::rounded`] before showing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub total_items: u64,
}

impl CartTotals {
    /// Totals of an empty cart.
    pub const ZERO: Self = Self {
        subtotal: Decimal::ZERO,
        tax: Decimal::ZERO,
        delivery_fee: Decimal::ZERO,
        total: Decimal::ZERO,
        total_items: 0,
    };

    /// Compute totals from a subtotal and item count.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal, total_items: u64, has_lines: bool) -> Self {
        let tax = subtotal.saturating_mul(TAX_RATE);
        let delivery_fee = delivery_fee(has_lines);
        Self {
            subtotal,
            tax,
            delivery_fee,
            total: subtotal.saturating_add(tax).saturating_add(delivery_fee),
            total_items,
        }
    }

    /// Like [`CartTotals::from_subtotal`], but `None` if any figure overflows.
    #[must_use]
    pub fn checked_from_subtotal(
        subtotal: Decimal,
        total_items: u64,
        has_lines: bool,
    ) -> Option<Self> {
        let tax = subtotal.checked_mul(TAX_RATE)?;
        let delivery_fee = delivery_fee(has_lines);
        Some(Self {
            subtotal,
            tax,
            delivery_fee,
            total: subtotal.checked_add(tax)?.checked_add(delivery_fee)?,
            total_items,
        })
    }

    /// Each monetary figure rounded to cents for display.
    ///
    /// The total is rounded from the exact sum, so it can differ by a cent
    /// from the sum of the rounded parts.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            subtotal: round_cents(self.subtotal),
            tax: round_cents(self.tax),
            delivery_fee: round_cents(self.delivery_fee),
            total: round_cents(self.total),
            total_items: self.total_items,
        }
    }
}

const fn delivery_fee(has_lines: bool) -> Decimal {
    if has_lines { DELIVERY_FEE } else { Decimal::ZERO }
}

impl Default for CartTotals {
    fn default() -> Self {
        Self::ZERO
    }
}
