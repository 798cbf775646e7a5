//! Cart store: owns the cart snapshot and writes it through to the cache.
//!
//! The cache value seeds the in-memory cart at startup; after that the
//! in-memory cart is authoritative and every mutation re-writes the cache.
//! A failed write is logged and swallowed - the mutation in memory always
//! succeeds, the cart just won't survive a reload.

use rust_decimal::Decimal;

use tahadu_core::{Cart, CartLine};

use crate::storage::{KeyValueStore, keys};

/// Owns the list of line items.
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a cart store, seeding from the cache.
    ///
    /// A missing or malformed cache entry starts the cart empty.
    pub fn new(storage: S) -> Self {
        let cart = match storage.get::<Cart>(keys::CART) {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!("Failed to read cached cart, starting empty: {e}");
                Cart::new()
            }
        };
        Self { cart, storage }
    }

    /// The current cart snapshot.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Merge a candidate line into the cart (see [`Cart::with_line`]).
    pub fn add_item(&mut self, candidate: CartLine) {
        self.cart = self.cart.with_line(candidate);
        self.persist();
    }

    /// Replace the quantity of the line at `index`; requests below 1 are
    /// silently dropped.
    pub fn set_quantity(&mut self, index: usize, quantity: u32) {
        self.cart = self.cart.with_quantity(index, quantity);
        self.persist();
    }

    /// Remove the line at `index`, resolved against the current snapshot.
    pub fn remove_item(&mut self, index: usize) {
        self.cart = self.cart.without_line(index);
        self.persist();
    }

    /// Empty the cart and delete its cache entry (the key itself is
    /// removed, not re-written as an empty list).
    pub fn clear(&mut self) {
        self.cart = Cart::new();
        if let Err(e) = self.storage.remove(keys::CART) {
            tracing::warn!("Failed to remove cached cart: {e}");
        }
    }

    /// Sum of `unit_price x quantity` over all lines. Pure, no side effect.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    fn persist(&self) {
        if let Err(e) = self.storage.set(keys::CART, &self.cart) {
            tracing::warn!("Failed to persist cart: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tahadu_core::VariantId;

    use crate::storage::MemoryStore;

    fn line(id: &str, price: i64, quantity: u32) -> CartLine {
        CartLine {
            product_id: VariantId::from(id),
            display_name: format!("variant {id}"),
            unit_price: Decimal::from(price),
            quantity,
        }
    }

    #[test]
    fn starts_empty_without_cache() {
        let store = CartStore::new(MemoryStore::new());
        assert!(store.is_empty());
    }

    #[test]
    fn mutations_write_through_to_cache() {
        let storage = MemoryStore::new();
        let mut store = CartStore::new(storage.clone());

        store.add_item(line("A", 350, 1));

        let cached: Cart = storage.get(keys::CART).unwrap().unwrap();
        assert_eq!(cached, *store.cart());
    }

    #[test]
    fn cache_seeds_a_fresh_store() {
        let storage = MemoryStore::new();
        {
            let mut store = CartStore::new(storage.clone());
            store.add_item(line("B", 350, 2));
            store.add_item(line("A", 200, 1));
        }

        let reloaded = CartStore::new(storage);
        let ids: Vec<_> = reloaded
            .lines()
            .iter()
            .map(|l| l.product_id.as_str().to_owned())
            .collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn malformed_cache_starts_empty() {
        let storage = MemoryStore::new();
        storage.set_raw(keys::CART, "not a cart");
        let store = CartStore::new(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn repeated_add_merges_and_totals() {
        let mut store = CartStore::new(MemoryStore::new());
        store.add_item(line("A", 350, 1));
        store.add_item(line("A", 350, 2));

        assert_eq!(store.lines().len(), 1);
        assert_eq!(store.lines()[0].quantity, 3);
        assert_eq!(store.total(), Decimal::from(1050));
    }

    #[test]
    fn quantity_floor_is_enforced() {
        let mut store = CartStore::new(MemoryStore::new());
        store.add_item(line("A", 350, 2));

        store.set_quantity(0, 0);
        assert_eq!(store.lines()[0].quantity, 2);

        store.set_quantity(0, 4);
        assert_eq!(store.lines()[0].quantity, 4);
    }

    #[test]
    fn clear_removes_the_cache_key() {
        let storage = MemoryStore::new();
        let mut store = CartStore::new(storage.clone());
        store.add_item(line("A", 350, 1));
        assert!(storage.contains(keys::CART));

        store.clear();

        assert!(store.is_empty());
        assert!(!storage.contains(keys::CART));
    }

    #[test]
    fn out_of_range_removal_is_ignored() {
        let mut store = CartStore::new(MemoryStore::new());
        store.add_item(line("A", 350, 1));
        store.remove_item(5);
        assert_eq!(store.lines().len(), 1);
    }
}
