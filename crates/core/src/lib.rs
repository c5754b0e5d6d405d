//! SmartBite Core - Shared types library.
//!
//! This crate provides common types used across all SmartBite components:
//! - `storefront` - The storefront interaction layer (auth, cart, navigation)
//! - `cli` - Command-line shell driving a storefront session
//!
//! # Architecture
//!
//! The core crate contains only types and helpers - no I/O, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe item IDs and money helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
