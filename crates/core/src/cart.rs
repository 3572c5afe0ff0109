//! The cart store.
//!
//! A [`Cart`] is an ordered list of [`CartItem`]s, unique by product ID.
//! It changes only through [`Cart::add`], [`Cart::update_quantity`],
//! [`Cart::remove`], [`Cart::clear`] and [`Cart::confirm_checkout`]; none of
//! them can fail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{LineItem, Price, Product, ProductId, calculate_total};

/// A product plus a purchase quantity. The quantity is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// The product's ID.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }
}

impl LineItem for CartItem {
    fn unit_price(&self) -> Price {
        self.product.price
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Items in first-insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `price * quantity` over all items.
    #[must_use]
    pub fn total(&self) -> Price {
        calculate_total(&self.items)
    }

    /// Look up an item by product ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Add one unit of `product`.
    ///
    /// Increments the quantity if the product is already in the cart,
    /// otherwise appends it with quantity 1.
    pub fn add(&mut self, product: &Product) {
        match self.items.iter_mut().find(|item| item.id() == &product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem {
                product: product.clone(),
                quantity: 1,
            }),
        }
    }

    /// Set the quantity of the item with `id` to exactly `quantity`.
    ///
    /// A quantity of zero or less removes the item. Quantities beyond
    /// `u32::MAX` saturate. Unknown IDs are ignored.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.items.iter_mut().find(|item| item.id() == id) {
            item.quantity = quantity;
        }
    }

    /// Remove the item with `id`. No-op if absent.
    pub fn remove(&mut self, id: &ProductId) {
        self.items.retain(|item| item.id() != id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Convert the cart into a finalized order and reset it to empty.
    ///
    /// Returns `None` (and leaves the cart alone) if the cart is empty.
    pub fn confirm_checkout(&mut self, placed_at: DateTime<Utc>) -> Option<OrderSnapshot> {
        if self.is_empty() {
            return None;
        }

        Some(OrderSnapshot {
            items: std::mem::take(&mut self.items),
            placed_at,
        })
    }
}

/// The cart contents captured at checkout confirmation.
///
/// Independent of the live cart: later cart changes do not affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub items: Vec<CartItem>,
    pub placed_at: DateTime<Utc>,
}

impl OrderSnapshot {
    /// Sum of `price * quantity` over the ordered items.
    #[must_use]
    pub fn total(&self) -> Price {
        calculate_total(&self.items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use rust_decimal::Decimal;

    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: id.to_uppercase(),
            price: Price::from_cents(cents),
            description: None,
            image: None,
            reviews: Vec::new(),
            in_stock: true,
        }
    }

    fn ids(cart: &Cart) -> Vec<&str> {
        cart.items().iter().map(|item| item.id().as_str()).collect()
    }

    #[test]
    fn test_add_appends_then_increments() {
        let apple = product("apple", 125);
        let pear = product("pear", 250);
        let mut cart = Cart::new();

        cart.add(&apple);
        cart.add(&pear);
        cart.add(&apple);

        assert_eq!(ids(&cart), ["apple", "pear"]);
        assert_eq!(cart.get(&apple.id).unwrap().quantity, 2);
        assert_eq!(cart.get(&pear.id).unwrap().quantity, 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_counts_match_number_of_adds() {
        let catalog = [product("a", 100), product("b", 200), product("c", 300)];
        let sequence = [0, 2, 2, 1, 0, 2, 1, 0, 0];
        let mut cart = Cart::new();
        let mut expected: HashMap<&str, u32> = HashMap::new();

        for index in sequence {
            let p = &catalog[index];
            cart.add(p);
            *expected.entry(p.id.as_str()).or_insert(0) += 1;
        }

        assert_eq!(cart.len(), expected.len());
        for item in cart.items() {
            assert_eq!(item.quantity, expected[item.id().as_str()]);
        }
        // First-insertion order is preserved
        assert_eq!(ids(&cart), ["a", "c", "b"]);
    }

    #[test]
    fn test_update_quantity_sets_exact_value() {
        let apple = product("apple", 125);
        let mut cart = Cart::new();
        cart.add(&apple);

        cart.update_quantity(&apple.id, 7);
        assert_eq!(cart.get(&apple.id).unwrap().quantity, 7);

        cart.update_quantity(&apple.id, 1_000_000);
        assert_eq!(cart.get(&apple.id).unwrap().quantity, 1_000_000);
    }

    #[test]
    fn test_update_quantity_zero_equals_remove() {
        let apple = product("apple", 125);
        let pear = product("pear", 250);

        let mut updated = Cart::new();
        updated.add(&apple);
        updated.add(&pear);
        let mut removed = updated.clone();

        updated.update_quantity(&apple.id, 0);
        removed.remove(&apple.id);

        assert_eq!(updated, removed);
        assert_eq!(ids(&updated), ["pear"]);
    }

    #[test]
    fn test_update_quantity_negative_removes() {
        let apple = product("apple", 125);
        let mut cart = Cart::new();
        cart.add(&apple);

        cart.update_quantity(&apple.id, -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let apple = product("apple", 125);
        let mut cart = Cart::new();
        cart.add(&apple);
        let before = cart.clone();

        cart.update_quantity(&ProductId::new("kiwi"), 4);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_quantity_saturates() {
        let apple = product("apple", 125);
        let mut cart = Cart::new();
        cart.add(&apple);

        cart.update_quantity(&apple.id, i64::MAX);
        assert_eq!(cart.get(&apple.id).unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product("apple", 125));
        cart.remove(&ProductId::new("kiwi"));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&product("apple", 125));
        cart.add(&product("pear", 250));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_total() {
        let ten = product("ten", 1000);
        let small = product("small", 125);
        let mut cart = Cart::new();
        cart.add(&ten);
        cart.add(&small);
        cart.update_quantity(&ten.id, 2);
        cart.update_quantity(&small.id, 4);

        assert_eq!(cart.total(), Price::new(Decimal::from(25)));
    }

    #[test]
    fn test_confirm_checkout_moves_items_into_snapshot() {
        let apple = product("apple", 125);
        let pear = product("pear", 250);
        let mut cart = Cart::new();
        cart.add(&apple);
        cart.add(&pear);
        cart.add(&pear);
        let before = cart.items().to_vec();

        let order = cart.confirm_checkout(Utc::now()).unwrap();

        assert!(cart.is_empty());
        assert_eq!(order.items, before);
        assert_eq!(order.total(), Price::from_cents(625));

        // Later cart changes do not reach the snapshot
        cart.add(&apple);
        assert_eq!(order.items, before);
    }

    #[test]
    fn test_confirm_checkout_empty_cart() {
        let mut cart = Cart::new();
        assert!(cart.confirm_checkout(Utc::now()).is_none());
    }

    #[test]
    fn test_serde_roundtrip_preserves_order() {
        let mut cart = Cart::new();
        cart.add(&product("pear", 250));
        cart.add(&product("apple", 125));

        let json = serde_json::to_value(&cart).unwrap();
        let restored: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(restored, cart);
    }
}
