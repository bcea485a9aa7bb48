//! Session cart with write-through persistence.
//!
//! [`CartStore`] wraps the core [`Cart`](tasty_eats_core::Cart) engine: it
//! applies each change, announces the resulting notification through a
//! [`Notifier`], and writes the whole cart to a
//! [`KeyValueStore`](crate::storage::KeyValueStore).

mod notifier;
mod store;

pub use notifier::{Notifier, RecordingNotifier, TracingNotifier};
pub use store::{CART_STORAGE_KEY, CartStore};
