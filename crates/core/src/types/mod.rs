//! Shared type definitions.

mod id;
pub mod money;

pub use id::{ItemId, ItemIdError};
