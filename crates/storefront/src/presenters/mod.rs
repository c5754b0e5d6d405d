//! Presenters: pure render functions from state to HTML fragments.
//!
//! Presenters never mutate state; they take state by reference and produce
//! askama templates the shell can render wherever fragments are needed.

pub mod cart;
pub mod nav;
