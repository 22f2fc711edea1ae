//! Order quantities per recipe.
//!
//! The cart only ever stores positive quantities: an adjustment that brings a
//! recipe to zero or below removes it. Entries iterate in recipe order.

use std::collections::BTreeMap;
use tracing::debug;

/// Net order state, keyed by 0-based catalogue index
///
/// The cart does not know the catalogue. Callers validate indices before
/// calling [`adjust`](Self::adjust).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: BTreeMap<usize, i64>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` (positive or negative) to the quantity for `recipe_index`
    ///
    /// Returns the quantity now stored, or 0 if the entry was removed.
    pub fn adjust(&mut self, recipe_index: usize, delta: i64) -> i64 {
        let current = self.quantity(recipe_index);
        let updated = current.saturating_add(delta);

        if updated > 0 {
            self.entries.insert(recipe_index, updated);
        } else {
            self.entries.remove(&recipe_index);
        }

        debug!(recipe_index, delta, quantity = updated.max(0), "Cart adjusted");
        updated.max(0)
    }

    /// Stored quantity for `recipe_index`, 0 when absent
    pub fn quantity(&self, recipe_index: usize) -> i64 {
        self.entries.get(&recipe_index).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct recipes in the cart
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `(recipe_index, quantity)` pairs in ascending recipe order
    pub fn iter(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.entries.iter().map(|(&index, &quantity)| (index, quantity))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<(usize, i64)> for Cart {
    /// Applies each pair as an [`adjust`](Cart::adjust) call, in order
    fn from_iter<T: IntoIterator<Item = (usize, i64)>>(iter: T) -> Self {
        let mut cart = Cart::new();
        for (index, delta) in iter {
            cart.adjust(index, delta);
        }
        cart
    }
}
