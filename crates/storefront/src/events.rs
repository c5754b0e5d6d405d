//! Process-local publish/subscribe dispatcher.
//!
//! State components publish typed events; presenters subscribe instead of
//! reaching into each other. Delivery is synchronous, in subscription order,
//! within the single execution context.

use std::sync::{Mutex, PoisonError};

/// Payload of the auth-state-changed notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthEvent {
    /// Whether the user is authenticated after the change.
    pub authenticated: bool,
}

type AuthHandler = Box<dyn FnMut(&AuthEvent) + Send>;

/// Dispatcher for auth-state-changed notifications.
///
/// Handlers are invoked synchronously by [`EventBus::emit`], in the order
/// they were subscribed.
#[derive(Default)]
pub struct EventBus {
    handlers: Mutex<Vec<AuthHandler>>,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for auth events.
    pub fn subscribe(&self, handler: impl FnMut(&AuthEvent) + Send + 'static) {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(handler));
    }

    /// Deliver an event to all current subscribers.
    pub fn emit(&self, event: &AuthEvent) {
        let mut handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
        for handler in handlers.iter_mut() {
            handler(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("EventBus").field("handlers", &count).finish()
    }
}
