//! Storefront services: the defined mutation paths for auth and cart state.

pub mod auth;
pub mod cart;

use std::time::Duration;

/// A navigation effect: go to the given target.
///
/// Operations return redirects instead of performing hidden jumps; the
/// application shell applies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Target path.
    pub target: String,
}

impl Redirect {
    /// Create a redirect to the given target.
    #[must_use]
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

/// A navigation effect the shell should apply after a delay.
///
/// Represents the post-login redirect: a scheduled, cancelable-in-principle
/// timer, not a suspension of the operation that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayedRedirect {
    /// Target path.
    pub target: String,
    /// How long the shell should wait before navigating.
    pub delay: Duration,
}
