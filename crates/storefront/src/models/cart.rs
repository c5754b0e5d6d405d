//! Cart model: item entries and derived totals.
//!
//! The cart is an unordered mapping from item ID to entry, persisted as one
//! JSON object. Subtotal, tax, and total are always derived, never stored.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use smartbite_core::ItemId;

/// One cart line: a menu item with its accumulated quantity.
///
/// Invariant: `quantity >= 1`. An entry that would drop to zero or below is
/// removed from the cart instead of being stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Display name of the item.
    pub name: String,
    /// Unit price, full precision.
    pub price: Decimal,
    /// Image URL or relative path.
    pub image: String,
    /// Number of units, always at least 1.
    pub quantity: u32,
}

impl CartEntry {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Derived cart amounts at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Sum of price times quantity over all entries.
    pub subtotal: Decimal,
    /// Subtotal times the configured tax rate.
    pub tax: Decimal,
    /// Subtotal plus tax.
    pub total: Decimal,
}

/// The shopping cart: item ID to entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: HashMap<ItemId, CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up an entry by ID.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&CartEntry> {
        self.entries.get(id)
    }

    /// Iterate over entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &CartEntry)> {
        self.entries.iter()
    }

    /// Add one unit of an item: increment the quantity when the ID is
    /// already present, otherwise insert a new entry with quantity 1.
    pub fn add(&mut self, id: ItemId, name: String, price: Decimal, image: String) {
        self.entries
            .entry(id)
            .and_modify(|entry| entry.quantity += 1)
            .or_insert(CartEntry {
                name,
                price,
                image,
                quantity: 1,
            });
    }

    /// Apply a signed quantity delta to an entry.
    ///
    /// No-op when the ID is absent. A resulting quantity of zero or below
    /// removes the entry, preserving the `quantity >= 1` invariant.
    ///
    /// Returns `true` if the cart changed.
    pub fn update_quantity(&mut self, id: &ItemId, delta: i64) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            return false;
        };

        let updated = i64::from(entry.quantity).saturating_add(delta);
        if updated <= 0 {
            self.entries.remove(id);
        } else {
            entry.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
        }
        true
    }

    /// Remove an entry unconditionally. No-op when the ID is absent.
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Total quantity across all entries (the badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.entries
            .values()
            .map(|entry| u64::from(entry.quantity))
            .sum()
    }

    /// Sum of price times quantity over all entries.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.entries
            .values()
            .map(CartEntry::line_subtotal)
            .sum()
    }

    /// Derive subtotal, tax, and total for the given tax rate.
    #[must_use]
    pub fn totals(&self, tax_rate: Decimal) -> Totals {
        let subtotal = self.subtotal();
        let tax = subtotal * tax_rate;
        Totals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}
