//! Money helpers built on decimal arithmetic.
//!
//! Prices and totals are carried as [`Decimal`] at full precision; rounding
//! happens only at the display boundary. Display rounding uses
//! midpoint-away-from-zero to match fixed-point display semantics.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to two decimal places for display.
///
/// The stored amount keeps full precision; this is only for presentation.
#[must_use]
pub fn round_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as a fixed two-decimal string (e.g. `"199.00"`).
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = round_display(amount);
    rounded.rescale(2);
    rounded.to_string()
}
