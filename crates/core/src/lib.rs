//! Tasty Eats Core - Shared types and the cart engine.
//!
//! This crate provides the domain types used across all Tasty Eats components:
//! - `storefront` - JSON API serving the menu, cart, and mocked checkout
//! - `cli` - Command-line tools for browsing the menu and editing the cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no async, no
//! storage backends. Cart mutations are expressed as state transitions that
//! return the event to announce, so callers decide how to persist and notify.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, and menu items
//! - [`cart`] - Cart lines, transitions, totals, and the persisted format
//! - [`checkout`] - Checkout form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod types;

pub use cart::{
    Cart, CartCommand, CartEvent, CartLine, CartTotals, DELIVERY_FEE, LineCandidate,
    Notification, NotificationLevel, TAX_RATE,
};
pub use checkout::{CheckoutDetails, CheckoutField, ValidatedCheckout, ValidationError};
pub use types::*;
