//! The shopping cart state machine and derived totals.
//!
//! A cart is an ordered list of line items, each uniquely identified by the
//! `(product, size)` pair. The original tagged-action dispatch maps to the
//! named methods on [`Cart`]; totals are derived on demand, never stored.
//!
//! Per line item the transitions are:
//!
//! ```text
//! absent          --add-->             present(qty = 1)
//! present(qty=n)  --add same key-->    present(qty = n + 1)
//! present(qty=n)  --update(m)-->       present(qty = max(1, m))
//! present(qty=n)  --remove-->          absent
//! ```
//!
//! `update_quantity` clamps to a minimum of 1 and never removes; callers
//! that want decrement-to-zero-removes semantics must detect the qty == 1
//! case and call [`Cart::remove`] explicitly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Category, Product, ProductId};

/// Fixed GST rate applied to the cart subtotal (18%).
///
/// Displayed as two equal 9% components (CGST + SGST); the split is
/// cosmetic and lives in the view layer.
#[must_use]
pub fn gst_rate() -> Decimal {
    Decimal::new(18, 2)
}

/// One `(product, size)` entry in the cart.
///
/// Carries a snapshot of the product fields needed for display, so the cart
/// stays renderable even if the catalog changes underneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub selected_size: String,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub category: Category,
    /// Always >= 1; a line item at quantity 0 does not exist.
    pub quantity: u32,
}

impl CartLineItem {
    fn from_product(product: &Product, size: &str) -> Self {
        Self {
            product_id: product.id,
            selected_size: size.to_string(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category,
            quantity: 1,
        }
    }

    fn matches(&self, product_id: ProductId, size: &str) -> bool {
        self.product_id == product_id && self.selected_size == size
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The cart state: an ordered collection of line items.
///
/// Insertion order is the display order. Invariant: at most one line item
/// per `(product_id, selected_size)` pair.
///
/// Serializes as `{ "items": [...] }`, the exact layout persisted under the
/// `"cart"` storage key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The line items in display order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of `(product, size)` to the cart.
    ///
    /// Increments the quantity of an existing line item, or appends a new
    /// one with quantity 1 and a snapshot of the product's display fields.
    /// Never fails; repeated calls accumulate quantity.
    pub fn add(&mut self, product: &Product, size: &str) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.matches(product.id, size))
        {
            item.quantity += 1;
        } else {
            self.items.push(CartLineItem::from_product(product, size));
        }
    }

    /// Remove the matching line item entirely.
    ///
    /// A no-op (not an error) when no line item matches.
    pub fn remove(&mut self, product_id: ProductId, size: &str) {
        self.items.retain(|item| !item.matches(product_id, size));
    }

    /// Set the matching line item's quantity to `max(1, quantity)`.
    ///
    /// Clamps rather than removing - removal requires an explicit
    /// [`Cart::remove`] call. A no-op when no line item matches.
    pub fn update_quantity(&mut self, product_id: ProductId, size: &str, quantity: u32) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.matches(product_id, size))
        {
            item.quantity = quantity.max(1);
        }
    }

    /// Remove all line items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total number of units across all line items.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of line totals, before tax.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// GST at the fixed rate on the subtotal.
    #[must_use]
    pub fn gst_amount(&self) -> Decimal {
        self.subtotal() * gst_rate()
    }

    /// Subtotal plus GST.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.subtotal() + self.gst_amount()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn product(id: i32, name: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Decimal::new(price, 0),
            description: "Soft, breathable fabric for all-day comfort.".to_string(),
            image: format!("https://example.com/{id}.jpg"),
            category: Category::Men,
            subcategory: "Innerwear".to_string(),
            in_stock: true,
            sizes: vec!["S".to_string(), "M".to_string(), "L".to_string()],
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_add_creates_line_item_with_snapshot() {
        let mut cart = Cart::new();
        let briefs = product(1, "Classic Cotton Briefs", 299);

        cart.add(&briefs, "M");

        assert_eq!(cart.items().len(), 1);
        let item = &cart.items()[0];
        assert_eq!(item.product_id, ProductId::new(1));
        assert_eq!(item.selected_size, "M");
        assert_eq!(item.name, "Classic Cotton Briefs");
        assert_eq!(item.price, Decimal::new(299, 0));
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_add_same_key_twice_accumulates_quantity() {
        let mut cart = Cart::new();
        let briefs = product(1, "Classic Cotton Briefs", 299);

        cart.add(&briefs, "M");
        cart.add(&briefs, "M");

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_same_product_different_sizes_are_separate_lines() {
        let mut cart = Cart::new();
        let briefs = product(1, "Classic Cotton Briefs", 299);

        cart.add(&briefs, "M");
        cart.add(&briefs, "L");

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_no_two_line_items_share_a_key() {
        let mut cart = Cart::new();
        let briefs = product(1, "Classic Cotton Briefs", 299);
        let vest = product(2, "Sports Performance Vest", 399);

        cart.add(&briefs, "M");
        cart.add(&vest, "M");
        cart.add(&briefs, "L");
        cart.add(&briefs, "M");
        cart.update_quantity(ProductId::new(2), "M", 5);

        let mut keys: Vec<(i32, &str)> = cart
            .items()
            .iter()
            .map(|item| (item.product_id.as_i32(), item.selected_size.as_str()))
            .collect();
        let before = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), before);

        // cart count always equals the sum of line-item quantities
        let summed: u32 = cart.items().iter().map(|item| item.quantity).sum();
        assert_eq!(cart.count(), summed);
    }

    #[test]
    fn test_remove_deletes_only_the_matching_line() {
        let mut cart = Cart::new();
        let briefs = product(1, "Classic Cotton Briefs", 299);

        cart.add(&briefs, "M");
        cart.add(&briefs, "L");
        cart.remove(ProductId::new(1), "M");

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].selected_size, "L");
    }

    #[test]
    fn test_remove_absent_is_a_noop() {
        let mut cart = Cart::new();
        cart.remove(ProductId::new(9), "XL");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_clamps_to_one() {
        let mut cart = Cart::new();
        let briefs = product(1, "Classic Cotton Briefs", 299);
        cart.add(&briefs, "M");

        cart.update_quantity(ProductId::new(1), "M", 0);

        // Clamped, not removed and not zero.
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        let briefs = product(1, "Classic Cotton Briefs", 299);
        cart.add(&briefs, "M");

        cart.update_quantity(ProductId::new(1), "M", 7);
        assert_eq!(cart.items()[0].quantity, 7);
    }

    #[test]
    fn test_update_quantity_absent_is_a_noop() {
        let mut cart = Cart::new();
        let briefs = product(1, "Classic Cotton Briefs", 299);
        cart.add(&briefs, "M");

        cart.update_quantity(ProductId::new(1), "XL", 4);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_clear_empties_the_cart() {
        let mut cart = Cart::new();
        cart.add(&product(1, "Classic Cotton Briefs", 299), "M");
        cart.add(&product(2, "Premium Boxer Shorts", 449), "L");

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn test_totals_example() {
        // [{price: 299, qty: 2}, {price: 449, qty: 1}]
        // -> subtotal 1047, GST 188.46, total 1235.46
        let mut cart = Cart::new();
        let briefs = product(1, "Classic Cotton Briefs", 299);
        let boxers = product(2, "Premium Boxer Shorts", 449);

        cart.add(&briefs, "M");
        cart.add(&briefs, "M");
        cart.add(&boxers, "L");

        assert_eq!(cart.count(), 3);
        assert_eq!(cart.subtotal(), Decimal::new(1047, 0));
        assert_eq!(cart.gst_amount(), Decimal::new(18846, 2));
        assert_eq!(cart.total(), Decimal::new(123_546, 2));
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let cart = Cart::new();
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.subtotal(), Decimal::ZERO);
        assert_eq!(cart.gst_amount(), Decimal::ZERO);
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_serde_round_trip_preserves_order_and_quantities() {
        let mut cart = Cart::new();
        cart.add(&product(3, "Thermal Long Johns", 799), "XL");
        cart.add(&product(1, "Classic Cotton Briefs", 299), "M");
        cart.add(&product(1, "Classic Cotton Briefs", 299), "M");

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, cart);
        assert_eq!(restored.items()[0].name, "Thermal Long Johns");
        assert_eq!(restored.items()[1].quantity, 2);
    }

    #[test]
    fn test_persisted_layout_is_an_items_record() {
        let mut cart = Cart::new();
        cart.add(&product(1, "Classic Cotton Briefs", 299), "M");

        let json = serde_json::to_value(&cart).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.keys().collect::<Vec<_>>(), vec!["items"]);
        assert_eq!(json["items"][0]["selectedSize"], "M");
    }

    #[test]
    fn test_unparseable_record_is_an_error_for_the_caller_to_default() {
        assert!(serde_json::from_str::<Cart>("not a cart").is_err());
        assert!(serde_json::from_str::<Cart>(r#"{"items":[{"bogus":1}]}"#).is_err());
    }
}
