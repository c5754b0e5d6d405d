//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
///
/// Validation failures are recovered locally and shown inline to the user;
/// nothing here is fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Username or password field was empty.
    #[error("Please enter both username and password")]
    MissingCredentials,
}
