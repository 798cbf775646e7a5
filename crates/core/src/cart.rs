//! The cart snapshot and its merge/clamp operations.
//!
//! All operations here are pure: they take an immutable snapshot and return
//! a new one. The storefront's cart store owns the current snapshot and
//! handles persistence; this module owns the rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::VariantId;

/// One entry in the cart: a product variant and its quantity.
///
/// `display_name` and `unit_price` are a snapshot of catalog data taken when
/// the line was first added; they are never refreshed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Merge key: at most one line per variant.
    pub product_id: VariantId,
    /// Catalog display name at add time.
    pub display_name: String,
    /// Catalog unit price at add time.
    pub unit_price: Decimal,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Price of the whole line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// An ordered sequence of cart lines.
///
/// Insertion order is significant for display only; correctness is keyed on
/// variant identity. Invariant: no two lines share a `product_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines (not total quantity).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Merge a candidate line into the cart.
    ///
    /// If a line with the candidate's variant already exists, its quantity
    /// grows by the candidate's quantity and every other field keeps the
    /// existing line's snapshot - the candidate's name and price are
    /// discarded. Otherwise the candidate is appended as a new line.
    #[must_use]
    pub fn with_line(&self, candidate: CartLine) -> Self {
        let mut lines = self.lines.clone();
        match lines
            .iter_mut()
            .find(|line| line.product_id == candidate.product_id)
        {
            Some(existing) => existing.quantity += candidate.quantity,
            None => lines.push(candidate),
        }
        Self { lines }
    }

    /// Replace the quantity of the line at `index`.
    ///
    /// Requests below 1 are dropped, not converted to removal: this path can
    /// never drive a line to zero. Out-of-range indices are also dropped,
    /// since the UI may re-render while items shift underneath it.
    #[must_use]
    pub fn with_quantity(&self, index: usize, quantity: u32) -> Self {
        if quantity < 1 || index >= self.lines.len() {
            return self.clone();
        }
        let mut lines = self.lines.clone();
        lines[index].quantity = quantity;
        Self { lines }
    }

    /// Remove the line at `index`, if it exists.
    #[must_use]
    pub fn without_line(&self, index: usize) -> Self {
        if index >= self.lines.len() {
            return self.clone();
        }
        let mut lines = self.lines.clone();
        lines.remove(index);
        Self { lines }
    }

    /// Sum of `unit_price x quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, price: i64, quantity: u32) -> CartLine {
        CartLine {
            product_id: VariantId::from(id),
            display_name: format!("variant {id}"),
            unit_price: Decimal::from(price),
            quantity,
        }
    }

    #[test]
    fn adding_same_variant_sums_quantities() {
        let cart = Cart::new()
            .with_line(line("A", 350, 1))
            .with_line(line("A", 350, 2));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.total(), Decimal::from(1050));
    }

    #[test]
    fn merge_keeps_original_snapshot() {
        let original = line("A", 350, 1);
        let mut repriced = line("A", 999, 1);
        repriced.display_name = "renamed".to_owned();

        let cart = Cart::new().with_line(original.clone()).with_line(repriced);

        assert_eq!(cart.lines()[0].unit_price, original.unit_price);
        assert_eq!(cart.lines()[0].display_name, original.display_name);
    }

    #[test]
    fn never_two_lines_with_same_variant() {
        let mut cart = Cart::new();
        for id in ["A", "B", "A", "C", "B", "A"] {
            cart = cart.with_line(line(id, 100, 1));
        }
        let mut ids: Vec<_> = cart.lines().iter().map(|l| l.product_id.clone()).collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids.dedup();
        assert_eq!(ids.len(), cart.len());
    }

    #[test]
    fn distinct_variants_append_in_insertion_order() {
        let cart = Cart::new()
            .with_line(line("B", 100, 1))
            .with_line(line("A", 100, 1));
        let ids: Vec<_> = cart.lines().iter().map(|l| l.product_id.as_str().to_owned()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn quantity_below_one_is_dropped() {
        let cart = Cart::new().with_line(line("A", 350, 2));
        let unchanged = cart.with_quantity(0, 0);
        assert_eq!(unchanged, cart);
    }

    #[test]
    fn quantity_update_replaces_value() {
        let cart = Cart::new().with_line(line("A", 350, 2)).with_quantity(0, 5);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let cart = Cart::new().with_line(line("A", 350, 1));
        assert_eq!(cart.with_quantity(7, 3), cart);
        assert_eq!(cart.without_line(7), cart);
    }

    #[test]
    fn removal_preserves_remaining_order() {
        let cart = Cart::new()
            .with_line(line("A", 100, 1))
            .with_line(line("B", 100, 1))
            .with_line(line("C", 100, 1))
            .without_line(1);
        let ids: Vec<_> = cart.lines().iter().map(|l| l.product_id.as_str().to_owned()).collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    #[test]
    fn empty_cart_totals_zero() {
        assert_eq!(Cart::new().total(), Decimal::ZERO);
    }

    #[test]
    fn serde_round_trip_preserves_lines_and_order() {
        let cart = Cart::new()
            .with_line(line("B", 350, 2))
            .with_line(line("A", 200, 1));
        let json = serde_json::to_string(&cart).unwrap();
        let reloaded: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, cart);
    }
}
