//! Tasty Eats storefront library.
//!
//! Menu catalog, persistent cart, and mocked checkout, exposed as a library
//! so the binary, the CLI, and the integration tests share one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;
