//! Cart presenter.
//!
//! Renders the cart into a line-item list fragment and a badge count
//! fragment. All amounts are preformatted to fixed two-decimal strings;
//! templates stay dumb.

use askama::Template;
use rust_decimal::Decimal;

use smartbite_core::types::money::format_amount;

use crate::models::Cart;

/// Cart item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub line_subtotal: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

impl CartView {
    /// Build a view from the cart with the given tax rate.
    ///
    /// The cart map is unordered; items are sorted by ID so rendering is
    /// deterministic.
    #[must_use]
    pub fn build(cart: &Cart, tax_rate: Decimal) -> Self {
        let mut items: Vec<CartItemView> = cart
            .iter()
            .map(|(id, entry)| CartItemView {
                id: id.to_string(),
                name: entry.name.clone(),
                image: entry.image.clone(),
                price: format_amount(entry.price),
                quantity: entry.quantity,
                line_subtotal: format_amount(entry.line_subtotal()),
            })
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));

        let totals = cart.totals(tax_rate);
        Self {
            items,
            subtotal: format_amount(totals.subtotal),
            tax: format_amount(totals.tax),
            total: format_amount(totals.total),
        }
    }

    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self::build(&Cart::new(), Decimal::ZERO)
    }
}

/// Cart items fragment template.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template.
///
/// Rendered even when the count is zero.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}
