//! Core types for Tasty Eats.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod menu;
pub mod price;

pub use email::{Email, EmailError};
pub use id::*;
pub use menu::{ALL_CATEGORY, Category, MenuItem};
pub use price::Price;
