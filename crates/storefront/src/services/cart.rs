//! Cart service.
//!
//! Loads the cart blob from the store, applies mutations through the model,
//! and persists the full cart after every change. Adding is gated on the
//! auth flag: an unauthenticated add stores the current location for the
//! post-login redirect and bounces to the login page instead.

use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

use smartbite_core::{ItemId, ItemIdError};

use crate::models::{Cart, Totals};
use crate::services::auth::AuthService;
use crate::state::AppState;
use crate::store::keys;

use super::Redirect;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Item ID failed validation.
    #[error("invalid item id: {0}")]
    InvalidItemId(#[from] ItemIdError),

    /// Item price was negative.
    #[error("invalid price: {0}")]
    InvalidPrice(Decimal),

    /// Item image was an absolute URL that does not parse.
    #[error("invalid image url: {0}")]
    InvalidImage(String),
}

/// Result of an add-to-cart attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// Item added; the updated cart.
    Added(Cart),
    /// Not authenticated: the add was aborted and the shell should apply
    /// this redirect to the login page. The current location was stored as
    /// the post-login redirect target.
    LoginRequired(Redirect),
}

/// Cart service.
pub struct CartService<'a> {
    state: &'a AppState,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Load the cart from the store.
    ///
    /// An absent key is an empty cart; a corrupt blob is logged and treated
    /// as empty rather than crashing.
    #[must_use]
    pub fn cart(&self) -> Cart {
        let Some(blob) = self.state.store().get(keys::CART) else {
            return Cart::new();
        };

        match serde_json::from_str(&blob) {
            Ok(cart) => cart,
            Err(e) => {
                tracing::warn!("corrupt cart blob, treating as empty: {e}");
                Cart::new()
            }
        }
    }

    /// Derive subtotal, tax, and total with the configured tax rate.
    #[must_use]
    pub fn totals(&self, cart: &Cart) -> Totals {
        cart.totals(self.state.config().tax_rate)
    }

    /// Add one unit of an item to the cart.
    ///
    /// Unauthenticated adds are aborted: the current location is stored as
    /// the post-login redirect target and `AddOutcome::LoginRequired` is
    /// returned. Otherwise the quantity is incremented (or the entry
    /// inserted with quantity 1) and the full cart is persisted.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the ID, price, or image fails validation.
    pub fn add_item(
        &self,
        id: &str,
        name: &str,
        price: Decimal,
        image: &str,
        current_path: &str,
    ) -> Result<AddOutcome, CartError> {
        if !AuthService::new(self.state).is_authenticated() {
            self.state.session().set(keys::REDIRECT_URL, current_path);
            tracing::debug!(%current_path, "unauthenticated add, redirecting to login");
            return Ok(AddOutcome::LoginRequired(Redirect::to(
                self.state.config().pages.login.clone(),
            )));
        }

        let id = ItemId::parse(id)?;
        if price.is_sign_negative() {
            return Err(CartError::InvalidPrice(price));
        }
        validate_image(image)?;

        let mut cart = self.cart();
        cart.add(id, name.to_owned(), price, image.to_owned());
        self.persist(&cart);

        Ok(AddOutcome::Added(cart))
    }

    /// Apply a signed quantity delta to an item.
    ///
    /// No-op when the item is absent; a resulting quantity of zero or below
    /// removes the entry. Persists only when the cart changed.
    #[must_use]
    pub fn update_quantity(&self, id: &ItemId, delta: i64) -> Cart {
        let mut cart = self.cart();
        if cart.update_quantity(id, delta) {
            self.persist(&cart);
        }
        cart
    }

    /// Remove an item unconditionally. No-op when absent.
    #[must_use]
    pub fn remove_item(&self, id: &ItemId) -> Cart {
        let mut cart = self.cart();
        if cart.remove(id) {
            self.persist(&cart);
        }
        cart
    }

    fn persist(&self, cart: &Cart) {
        match serde_json::to_string(cart) {
            Ok(blob) => self.state.store().set(keys::CART, &blob),
            Err(e) => tracing::warn!("failed to serialize cart: {e}"),
        }
    }
}

/// Validate an item image reference.
///
/// Relative paths (`img.png`) are accepted as-is; anything that looks like
/// an absolute URL must parse.
fn validate_image(image: &str) -> Result<(), CartError> {
    match Url::parse(image) {
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => Ok(()),
        Err(e) => {
            tracing::debug!(%image, "rejected image url: {e}");
            Err(CartError::InvalidImage(image.to_owned()))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::services::auth::LoginForm;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn id(s: &str) -> ItemId {
        ItemId::parse(s).unwrap()
    }

    fn logged_in_state() -> AppState {
        let state = AppState::new(StorefrontConfig::default());
        AuthService::new(&state)
            .login(&LoginForm {
                username: "alice".to_owned(),
                password: SecretString::from("secret".to_owned()),
                remember_me: false,
            })
            .unwrap();
        state
    }

    fn added(outcome: AddOutcome) -> Cart {
        match outcome {
            AddOutcome::Added(cart) => cart,
            AddOutcome::LoginRequired(_) => panic!("expected item to be added"),
        }
    }

    #[test]
    fn test_add_requires_auth_and_stores_redirect() {
        let state = AppState::new(StorefrontConfig::default());
        let cart = CartService::new(&state);

        let outcome = cart
            .add_item("p1", "Pizza", dec("199.00"), "img.png", "menu.html")
            .unwrap();

        assert_eq!(
            outcome,
            AddOutcome::LoginRequired(Redirect::to("login.html"))
        );
        assert_eq!(
            state.session().get(keys::REDIRECT_URL),
            Some("menu.html".to_owned())
        );
        // The add was aborted: nothing persisted
        assert_eq!(state.store().get(keys::CART), None);
    }

    #[test]
    fn test_add_persists_cart_blob() {
        let state = logged_in_state();
        let cart = CartService::new(&state);

        let updated = added(
            cart.add_item("p1", "Pizza", dec("199.00"), "img.png", "menu.html")
                .unwrap(),
        );
        assert_eq!(updated.get(&id("p1")).unwrap().quantity, 1);
        assert_eq!(updated.item_count(), 1);

        // Re-reading goes through the store, not a cached copy
        let reloaded = cart.cart();
        assert_eq!(reloaded, updated);
    }

    #[test]
    fn test_add_twice_increments() {
        let state = logged_in_state();
        let cart = CartService::new(&state);

        cart.add_item("p1", "Pizza", dec("199.00"), "img.png", "menu.html")
            .unwrap();
        let updated = added(
            cart.add_item("p1", "Pizza", dec("199.00"), "img.png", "menu.html")
                .unwrap(),
        );

        assert_eq!(updated.len(), 1);
        assert_eq!(updated.get(&id("p1")).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_rejects_negative_price() {
        let state = logged_in_state();
        let cart = CartService::new(&state);

        let result = cart.add_item("p1", "Pizza", dec("-1"), "img.png", "menu.html");
        assert!(matches!(result, Err(CartError::InvalidPrice(_))));
    }

    #[test]
    fn test_add_rejects_empty_id() {
        let state = logged_in_state();
        let cart = CartService::new(&state);

        let result = cart.add_item("", "Pizza", dec("1"), "img.png", "menu.html");
        assert!(matches!(result, Err(CartError::InvalidItemId(_))));
    }

    #[test]
    fn test_add_accepts_relative_and_absolute_images() {
        let state = logged_in_state();
        let cart = CartService::new(&state);

        cart.add_item("p1", "Pizza", dec("1"), "img.png", "menu.html")
            .unwrap();
        cart.add_item(
            "p2",
            "Burger",
            dec("2"),
            "https://cdn.example.com/burger.png",
            "menu.html",
        )
        .unwrap();

        let result = cart.add_item("p3", "Cake", dec("3"), "https://exa mple.com/x", "menu.html");
        assert!(matches!(result, Err(CartError::InvalidImage(_))));
    }

    #[test]
    fn test_update_quantity_removes_at_zero() {
        let state = logged_in_state();
        let cart = CartService::new(&state);
        cart.add_item("p1", "Pizza", dec("100"), "img.png", "menu.html")
            .unwrap();
        cart.add_item("p1", "Pizza", dec("100"), "img.png", "menu.html")
            .unwrap();

        let updated = cart.update_quantity(&id("p1"), -2);
        assert!(updated.is_empty());
        // Removal was persisted
        assert!(cart.cart().is_empty());
    }

    #[test]
    fn test_update_quantity_absent_is_noop() {
        let state = logged_in_state();
        let cart = CartService::new(&state);

        let updated = cart.update_quantity(&id("ghost"), 1);
        assert!(updated.is_empty());
        assert_eq!(state.store().get(keys::CART), None);
    }

    #[test]
    fn test_remove_item_persists() {
        let state = logged_in_state();
        let cart = CartService::new(&state);
        cart.add_item("p1", "Pizza", dec("100"), "img.png", "menu.html")
            .unwrap();

        let updated = cart.remove_item(&id("p1"));
        assert!(updated.is_empty());
        assert!(cart.cart().is_empty());
    }

    #[test]
    fn test_corrupt_blob_treated_as_empty() {
        let state = logged_in_state();
        state.store().set(keys::CART, "{broken");

        let cart = CartService::new(&state);
        assert!(cart.cart().is_empty());
    }

    #[test]
    fn test_totals_use_configured_rate() {
        let state = logged_in_state();
        let cart = CartService::new(&state);
        cart.add_item("p1", "Pizza", dec("100"), "img.png", "menu.html")
            .unwrap();

        let totals = cart.totals(&cart.cart());
        assert_eq!(totals.subtotal, dec("100"));
        assert_eq!(totals.tax, dec("1.4"));
        assert_eq!(totals.total, dec("101.4"));
    }
}
