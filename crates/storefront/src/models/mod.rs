//! Domain models for the storefront.

pub mod cart;

pub use cart::{Cart, CartEntry, Totals};
