//! Origin-scoped key-value storage.
//!
//! The storefront persists all state as string key/value pairs, mirroring
//! browser local storage: synchronous get/set/remove, surviving reloads.
//! Store operations are infallible by contract; a backend that can fail
//! (e.g. the file-backed store) logs the failure and keeps serving its
//! in-memory copy.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// A persistent string-keyed map with synchronous operations.
///
/// Implementations use interior mutability so shared references can write,
/// matching the single-execution-context model: every operation runs to
/// completion before the next one starts.
pub trait KeyValueStore: Send + Sync {
    /// Get the value for a key, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a key to a value, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Remove a key. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// Store keys used by the storefront.
pub mod keys {
    /// Session flag: `"true"` when authenticated, absent otherwise.
    pub const AUTHENTICATED: &str = "isAuthenticated";

    /// Display name of the logged-in user.
    pub const USERNAME: &str = "username";

    /// Legacy key from an earlier release; read for cleanup only.
    pub const USER_EMAIL: &str = "userEmail";

    /// Optional remember-me flag.
    pub const REMEMBER_ME: &str = "rememberMe";

    /// Cart blob: one JSON object mapping item ID to entry.
    pub const CART: &str = "cart";

    /// Transient session key: redirect target stored when an
    /// unauthenticated action bounces to the login page.
    pub const REDIRECT_URL: &str = "redirectUrl";
}
