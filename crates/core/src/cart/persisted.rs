//! JSON layout of a stored cart.
//!
//! Carts are written as `{"version": 1, "items": [...]}`. A bare array of
//! lines (the unversioned layout, with numeric prices) is still accepted when
//! reading.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Cart, CartLine};
use crate::types::ItemId;

/// Current persisted schema version.
pub const CART_SCHEMA_VERSION: u32 = 1;

/// Why a stored cart could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("stored cart is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported cart schema version {0}")]
    UnsupportedVersion(u32),
    #[error("item {0} appears on more than one line")]
    DuplicateLine(ItemId),
    #[error("item {0} has quantity 0")]
    ZeroQuantity(ItemId),
    #[error("item {0} has a negative price")]
    NegativePrice(ItemId),
    #[error("cart totals are too large to represent")]
    TotalOverflow,
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    items: &'a [CartLine],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Stored {
    Versioned { version: u32, items: Vec<CartLine> },
    Unversioned(Vec<CartLine>),
}

impl Cart {
    /// Serialize the cart in the current schema.
    ///
    /// # Errors
    ///
    /// Returns an error only if serialization itself fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&Envelope {
            version: CART_SCHEMA_VERSION,
            items: &self.lines,
        })
    }

    /// Decode a stored cart, checking the line invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the value is not a cart, has an unknown
    /// version, or breaks an invariant (duplicate ids, zero quantity,
    /// negative price, totals that overflow).
    pub fn from_json(raw: &str) -> Result<Self, DecodeError> {
        let lines = match serde_json::from_str::<Stored>(raw)? {
            Stored::Versioned { version, items } if version == CART_SCHEMA_VERSION => items,
            Stored::Versioned { version, .. } => {
                return Err(DecodeError::UnsupportedVersion(version));
            }
            Stored::Unversioned(items) => items,
        };

        let mut seen = HashSet::with_capacity(lines.len());
        for line in &lines {
            if line.quantity == 0 {
                return Err(DecodeError::ZeroQuantity(line.id.clone()));
            }
            if line.price < Decimal::ZERO {
                return Err(DecodeError::NegativePrice(line.id.clone()));
            }
            if !seen.insert(&line.id) {
                return Err(DecodeError::DuplicateLine(line.id.clone()));
            }
        }

        let cart = Self { lines };
        if cart.checked_totals().is_none() {
            return Err(DecodeError::TotalOverflow);
        }
        Ok(cart)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::{CartCommand, LineCandidate};

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        for (id, name, cents) in [
            ("2", "Chicken Tikka Masala", 1499),
            ("1", "Margherita Pizza", 1299),
            ("2", "Chicken Tikka Masala", 1499),
        ] {
            cart.apply(CartCommand::Add(LineCandidate {
                id: ItemId::new(id),
                name: name.to_owned(),
                price: Decimal::new(cents, 2),
                image: format!("https://img.example.com/{id}.jpg"),
                category: "Mains".to_owned(),
            }));
        }
        cart
    }

    #[test]
    fn test_round_trip_preserves_order_and_quantities() {
        let cart = sample_cart();
        let restored = Cart::from_json(&cart.to_json().unwrap()).unwrap();

        assert_eq!(restored, cart);
        assert_eq!(restored.lines()[0].id.as_str(), "2");
        assert_eq!(restored.lines()[0].quantity, 2);
    }

    #[test]
    fn test_written_layout_is_versioned() {
        let json: serde_json::Value =
            serde_json::from_str(&sample_cart().to_json().unwrap()).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["items"].as_array().unwrap().len(), 2);
        assert_eq!(json["items"][1]["name"], "Margherita Pizza");
    }

    #[test]
    fn test_reads_unversioned_array_with_numeric_prices() {
        let raw = r#"[{"id":"1","name":"Margherita Pizza","price":12.99,
            "image":"https://img.example.com/1.jpg","category":"Pizza","quantity":3}]"#;

        let cart = Cart::from_json(raw).unwrap();
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.subtotal(), Decimal::new(3897, 2));
    }

    #[test]
    fn test_rejects_malformed_values() {
        assert!(matches!(Cart::from_json("not json"), Err(DecodeError::Json(_))));
        assert!(matches!(
            Cart::from_json(r#"{"items": 5}"#),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(
            Cart::from_json(r#"{"version": 9, "items": []}"#),
            Err(DecodeError::UnsupportedVersion(9))
        ));
    }

    #[test]
    fn test_rejects_invariant_violations() {
        let line = |id: &str, quantity: u32| {
            format!(
                r#"{{"id":"{id}","name":"x","price":"1.00","image":"i","category":"c","quantity":{quantity}}}"#
            )
        };

        let zero = format!("[{}]", line("1", 0));
        assert!(matches!(
            Cart::from_json(&zero),
            Err(DecodeError::ZeroQuantity(_))
        ));

        let duplicate = format!("[{},{}]", line("1", 1), line("1", 2));
        assert!(matches!(
            Cart::from_json(&duplicate),
            Err(DecodeError::DuplicateLine(_))
        ));
    }

    #[test]
    fn test_rejects_totals_that_overflow() {
        let raw = r#"{"version":1,"items":[{"id":"1","name":"x",
            "price":"79228162514264337593543950335","image":"i","category":"c","quantity":2}]}"#;
        assert!(matches!(
            Cart::from_json(raw),
            Err(DecodeError::TotalOverflow)
        ));

        // Each line fits on its own but the sum does not.
        let half = r#"{"id":"ID","name":"x","price":"50000000000000000000000000000",
            "image":"i","category":"c","quantity":1}"#;
        let raw = format!("[{},{}]", half.replace("ID", "1"), half.replace("ID", "2"));
        assert!(matches!(
            Cart::from_json(&raw),
            Err(DecodeError::TotalOverflow)
        ));
    }
}
