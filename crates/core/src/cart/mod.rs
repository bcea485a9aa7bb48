//! The shopping cart engine.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s with at most one line per
//! item id. All mutations go through [`Cart::apply`], which changes the cart
//! and reports what happened as a [`CartEvent`]. Callers own persistence and
//! turn events into user-facing [`Notification`]s.
//!
//! # Invariants
//!
//! - Lines keep insertion order; new items are appended, nothing is re-sorted.
//! - Every line has quantity >= 1.
//! - Item ids are unique across lines.
//! - Every figure in [`Cart::checked_totals`] fits in a [`Decimal`]; a change
//!   that would overflow one is refused.

mod line;
mod notification;
mod persisted;
mod totals;

pub use line::{CartLine, LineCandidate};
pub use notification::{Notification, NotificationLevel};
pub use persisted::{CART_SCHEMA_VERSION, DecodeError};
pub use totals::{CartTotals, DELIVERY_FEE, TAX_RATE};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ItemId;

/// A requested change to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Add one unit of an item, creating its line if needed.
    Add(LineCandidate),
    /// Drop the line for an item.
    Remove(ItemId),
    /// Set an absolute quantity; anything below 1 removes the line.
    SetQuantity { id: ItemId, quantity: i64 },
    /// Drop every line.
    Clear,
}

/// What a command actually did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    Added { id: ItemId, name: String },
    AddedAnother { id: ItemId, name: String, quantity: u32 },
    Removed { id: ItemId, name: String },
    QuantityChanged { id: ItemId, quantity: u32 },
    Cleared,
}

/// An ordered collection of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Apply a command in place, returning the event to announce.
    ///
    /// Returns `None` when the command referenced an id that is not in the
    /// cart, or when an add or quantity change would push the totals past
    /// what a [`Decimal`] can hold; the cart is left unchanged in both cases.
    pub fn apply(&mut self, command: CartCommand) -> Option<CartEvent> {
        if matches!(command, CartCommand::Add(_) | CartCommand::SetQuantity { .. }) {
            let mut next = self.clone();
            let event = next.step(command)?;
            if next.checked_totals().is_none() {
                return None;
            }
            *self = next;
            return Some(event);
        }
        self.step(command)
    }

    fn step(&mut self, command: CartCommand) -> Option<CartEvent> {
        match command {
            CartCommand::Add(candidate) => Some(self.add(candidate)),
            CartCommand::Remove(id) => self.remove(&id),
            CartCommand::SetQuantity { id, quantity } => {
                if quantity < 1 {
                    return self.remove(&id);
                }
                let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                let line = self.lines.iter_mut().find(|line| line.id == id)?;
                line.quantity = quantity;
                Some(CartEvent::QuantityChanged { id, quantity })
            }
            CartCommand::Clear => {
                self.lines.clear();
                Some(CartEvent::Cleared)
            }
        }
    }

    /// Pure form of [`Cart::apply`]: returns the next cart and the event,
    /// leaving `self` untouched.
    #[must_use]
    pub fn transition(&self, command: CartCommand) -> (Self, Option<CartEvent>) {
        let mut next = self.clone();
        let event = next.apply(command);
        (next, event)
    }

    fn add(&mut self, candidate: LineCandidate) -> CartEvent {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == candidate.id) {
            line.quantity = line.quantity.saturating_add(1);
            return CartEvent::AddedAnother {
                id: candidate.id,
                name: candidate.name,
                quantity: line.quantity,
            };
        }

        let event = CartEvent::Added {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
        };
        self.lines.push(CartLine::first(candidate));
        event
    }

    fn remove(&mut self, id: &ItemId) -> Option<CartEvent> {
        let index = self.lines.iter().position(|line| &line.id == id)?;
        let line = self.lines.remove(index);
        Some(CartEvent::Removed {
            id: line.id,
            name: line.name,
        })
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.checked_subtotal().unwrap_or(Decimal::MAX)
    }

    /// The subtotal, or `None` if it does not fit in a [`Decimal`].
    #[must_use]
    pub fn checked_subtotal(&self) -> Option<Decimal> {
        self.lines.iter().try_fold(Decimal::ZERO, |sum, line| {
            sum.checked_add(line.checked_line_total()?)
        })
    }

    /// Subtotal times [`TAX_RATE`].
    #[must_use]
    pub fn tax(&self) -> Decimal {
        self.subtotal().saturating_mul(TAX_RATE)
    }

    /// [`DELIVERY_FEE`] for a non-empty cart, zero otherwise.
    #[must_use]
    pub fn delivery_fee(&self) -> Decimal {
        if self.is_empty() {
            Decimal::ZERO
        } else {
            DELIVERY_FEE
        }
    }

    /// Subtotal plus tax plus delivery fee.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.subtotal()
            .saturating_add(self.tax())
            .saturating_add(self.delivery_fee())
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// All derived values at once.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::from_subtotal(self.subtotal(), self.total_items(), !self.is_empty())
    }

    /// All derived values, or `None` if any of them overflows.
    #[must_use]
    pub fn checked_totals(&self) -> Option<CartTotals> {
        CartTotals::checked_from_subtotal(
            self.checked_subtotal()?,
            self.total_items(),
            !self.is_empty(),
        )
    }
}
