//! SmartBite Storefront interaction layer.
//!
//! Session-flag authentication gating, navigation link state, and a
//! shopping cart with quantity/tax/total computation, persisted through an
//! origin-scoped key-value store and rendered into HTML fragments.
//!
//! # Architecture
//!
//! - [`state::AppState`] owns the persistent store, the transient session
//!   store, the event bus, and the configuration. It is the single state
//!   container; nothing lives in module-level globals.
//! - [`services`] hold the mutation logic: auth flag and redirect policy,
//!   cart add/update/remove with persistence after every mutation.
//! - [`presenters`] are pure render functions from state to askama
//!   fragments (navigation links, cart line items, badge count).
//! - Navigation is an effect: operations return [`services::Redirect`]
//!   values the application shell applies, never a hidden jump.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod presenters;
pub mod services;
pub mod state;
pub mod store;
