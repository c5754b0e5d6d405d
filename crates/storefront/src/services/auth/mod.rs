//! Authentication service.
//!
//! Owns the session flag and the redirect/gating policy derived from it.
//! This is demo-grade authentication by design: any non-empty credential
//! pair succeeds, and "logout" just clears the flag. The interesting part
//! is the state machine around it, not the credential check.

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};

use crate::events::AuthEvent;
use crate::state::AppState;
use crate::store::keys;

use super::{DelayedRedirect, Redirect};

/// Transient message shown after a successful login.
const LOGIN_SUCCESS_MESSAGE: &str = "Login successful! Redirecting...";

/// Login form data.
#[derive(Debug)]
pub struct LoginForm {
    /// Username (any non-empty value is accepted).
    pub username: String,
    /// Password (any non-empty value is accepted, never persisted).
    pub password: SecretString,
    /// Whether the remember-me flag should be persisted.
    pub remember_me: bool,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Transient success message to show inline.
    pub message: String,
    /// Redirect the shell applies after the configured delay.
    pub redirect: DelayedRedirect,
}

/// Result of a page-load auth check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCheck {
    /// Current value of the auth flag.
    pub authenticated: bool,
    /// Redirect to apply, if the current page is not allowed in this state.
    pub redirect: Option<Redirect>,
}

/// Authentication service.
///
/// Constructed per-operation over borrowed application state; holds no
/// state of its own, so the flag is re-read from the store on every check
/// and never cached across page loads.
pub struct AuthService<'a> {
    state: &'a AppState,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Whether the auth flag is currently set in the store.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.store().get(keys::AUTHENTICATED).as_deref() == Some("true")
    }

    /// Display name of the logged-in user, if any.
    #[must_use]
    pub fn username(&self) -> Option<String> {
        self.state.store().get(keys::USERNAME)
    }

    /// Check the auth state for the current page.
    ///
    /// Re-reads the flag from the store, emits an auth-change notification,
    /// and returns the gating decision:
    ///
    /// - authenticated on the login page redirects to the menu page
    /// - unauthenticated on a protected page redirects to the login page
    pub fn check(&self, current_path: &str) -> AuthCheck {
        let authenticated = self.is_authenticated();
        let config = self.state.config();

        self.state.events().emit(&AuthEvent { authenticated });

        let redirect = if authenticated && config.is_login_page(current_path) {
            Some(Redirect::to(config.pages.menu.clone()))
        } else if !authenticated && config.is_protected(current_path) {
            Some(Redirect::to(config.pages.login.clone()))
        } else {
            None
        };

        AuthCheck {
            authenticated,
            redirect,
        }
    }

    /// Log in with the given form data.
    ///
    /// No real credential verification happens; any non-empty pair succeeds.
    /// On success the flag and username are persisted, an auth-change
    /// notification is emitted, and the returned redirect targets the stored
    /// session redirect (cleared here) or the menu page by default.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either field is empty.
    pub fn login(&self, form: &LoginForm) -> Result<LoginOutcome, AuthError> {
        if form.username.is_empty() || form.password.expose_secret().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let store = self.state.store();
        store.set(keys::AUTHENTICATED, "true");
        store.set(keys::USERNAME, &form.username);
        if form.remember_me {
            store.set(keys::REMEMBER_ME, "true");
        }

        self.state.events().emit(&AuthEvent {
            authenticated: true,
        });

        let session = self.state.session();
        let target = session
            .get(keys::REDIRECT_URL)
            .unwrap_or_else(|| self.state.config().pages.menu.clone());
        session.remove(keys::REDIRECT_URL);

        tracing::info!(username = %form.username, %target, "login succeeded");

        Ok(LoginOutcome {
            message: LOGIN_SUCCESS_MESSAGE.to_owned(),
            redirect: DelayedRedirect {
                target,
                delay: self.state.config().login_redirect_delay,
            },
        })
    }

    /// Log out unconditionally.
    ///
    /// Clears the auth flag, username, the legacy email key, the remember-me
    /// flag, and the entire cart; emits an auth-change notification; returns
    /// a redirect to the home page. Cannot fail.
    pub fn logout(&self) -> Redirect {
        let store = self.state.store();
        store.remove(keys::AUTHENTICATED);
        store.remove(keys::USERNAME);
        store.remove(keys::USER_EMAIL);
        store.remove(keys::REMEMBER_ME);
        store.remove(keys::CART);

        self.state.events().emit(&AuthEvent {
            authenticated: false,
        });

        tracing::info!("logged out");

        Redirect::to(self.state.config().pages.home.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::config::StorefrontConfig;

    fn state() -> AppState {
        AppState::new(StorefrontConfig::default())
    }

    fn login_form(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: username.to_owned(),
            password: SecretString::from(password.to_owned()),
            remember_me: false,
        }
    }

    #[test]
    fn test_login_empty_fields_rejected() {
        let state = state();
        let auth = AuthService::new(&state);

        assert_eq!(
            auth.login(&login_form("", "secret")),
            Err(AuthError::MissingCredentials)
        );
        assert_eq!(
            auth.login(&login_form("alice", "")),
            Err(AuthError::MissingCredentials)
        );
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_login_persists_flag_and_username() {
        let state = state();
        let auth = AuthService::new(&state);

        let outcome = auth.login(&login_form("alice", "secret")).unwrap();
        assert!(auth.is_authenticated());
        assert_eq!(auth.username(), Some("alice".to_owned()));
        assert_eq!(outcome.redirect.target, "menu.html");
        assert_eq!(outcome.redirect.delay.as_millis(), 1000);
        // remember_me was false, so the key stays absent
        assert_eq!(state.store().get(keys::REMEMBER_ME), None);
    }

    #[test]
    fn test_login_remember_me_persisted() {
        let state = state();
        let auth = AuthService::new(&state);

        let mut form = login_form("alice", "secret");
        form.remember_me = true;
        auth.login(&form).unwrap();
        assert_eq!(state.store().get(keys::REMEMBER_ME), Some("true".to_owned()));
    }

    #[test]
    fn test_login_uses_stored_redirect_and_clears_it() {
        let state = state();
        state.session().set(keys::REDIRECT_URL, "menu.html#pizza");

        let auth = AuthService::new(&state);
        let outcome = auth.login(&login_form("alice", "secret")).unwrap();

        assert_eq!(outcome.redirect.target, "menu.html#pizza");
        assert_eq!(state.session().get(keys::REDIRECT_URL), None);
    }

    #[test]
    fn test_check_emits_event_with_current_flag() {
        let state = state();
        let seen = Arc::new(AtomicBool::new(false));
        {
            let seen = Arc::clone(&seen);
            state.events().subscribe(move |event| {
                seen.store(event.authenticated, Ordering::SeqCst);
            });
        }

        let auth = AuthService::new(&state);
        auth.login(&login_form("alice", "secret")).unwrap();
        auth.check("menu.html");
        assert!(seen.load(Ordering::SeqCst));
    }

    #[test]
    fn test_check_redirects_authenticated_away_from_login() {
        let state = state();
        let auth = AuthService::new(&state);
        auth.login(&login_form("alice", "secret")).unwrap();

        let check = auth.check("login.html");
        assert!(check.authenticated);
        assert_eq!(check.redirect, Some(Redirect::to("menu.html")));
    }

    #[test]
    fn test_check_redirects_unauthenticated_from_protected() {
        let state = state();
        let auth = AuthService::new(&state);

        let check = auth.check("/shop/cart.html");
        assert!(!check.authenticated);
        assert_eq!(check.redirect, Some(Redirect::to("login.html")));

        let check = auth.check("orders.html");
        assert_eq!(check.redirect, Some(Redirect::to("login.html")));
    }

    #[test]
    fn test_check_no_redirect_on_public_pages() {
        let state = state();
        let auth = AuthService::new(&state);

        assert_eq!(auth.check("index.html").redirect, None);
        assert_eq!(auth.check("menu.html").redirect, None);
        // Login page is fine while unauthenticated
        assert_eq!(auth.check("login.html").redirect, None);
    }

    #[test]
    fn test_logout_clears_everything() {
        let state = state();
        let auth = AuthService::new(&state);
        auth.login(&login_form("alice", "secret")).unwrap();
        state.store().set(keys::USER_EMAIL, "alice@example.com");
        state.store().set(keys::CART, "{\"p1\":{}}");

        let redirect = auth.logout();
        assert_eq!(redirect, Redirect::to("index.html"));
        assert!(!auth.is_authenticated());
        assert_eq!(state.store().get(keys::USERNAME), None);
        assert_eq!(state.store().get(keys::USER_EMAIL), None);
        assert_eq!(state.store().get(keys::REMEMBER_ME), None);
        assert_eq!(state.store().get(keys::CART), None);
    }

    #[test]
    fn test_logout_from_any_state_cannot_fail() {
        let state = state();
        let auth = AuthService::new(&state);
        // Never logged in; logout is still a clean no-op plus redirect
        let redirect = auth.logout();
        assert_eq!(redirect.target, "index.html");
    }
}
