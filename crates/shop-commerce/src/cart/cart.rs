//! Cart and line item types.

use crate::cart::{CartPricing, Discount, PricingPolicy, PromotionService};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A shopping cart.
///
/// Lines are keyed by product id; adding a product already in the cart
/// raises its quantity instead of adding a second line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Items in the cart, in the order first added.
    pub items: Vec<LineItem>,
    /// Applied coupon. Its amount is worked out when the cart is priced.
    pub coupon: Option<Discount>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            coupon: None,
        }
    }

    /// Add an item to the cart.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - The line would exceed MAX_QUANTITY_PER_ITEM
    /// - Arithmetic overflow would occur
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;

            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }

            existing.quantity = new_quantity;
            existing.update_total()?;
            debug!(product = %product_id, quantity = new_quantity, "cart line updated");
            return Ok(());
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let item = LineItem::new(product_id, product_name, quantity, unit_price)?;
        debug!(product = %item.product_id, quantity, "cart line added");
        self.items.push(item);
        Ok(())
    }

    /// Add `quantity` of a catalog product at its current price.
    pub fn add_product(&mut self, product: &Product, quantity: i64) -> Result<(), CommerceError> {
        self.add_item(product.id.clone(), product.name.clone(), quantity, product.price)
    }

    /// Set a line's quantity. A quantity of zero or less removes the line.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| &i.product_id == product_id)
            .ok_or_else(|| CommerceError::ItemNotInCart(product_id.to_string()))?;
        item.quantity = quantity;
        item.update_total()
    }

    /// Remove a line from the cart.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<(), CommerceError> {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        if self.items.len() == len_before {
            return Err(CommerceError::ItemNotInCart(product_id.to_string()));
        }
        Ok(())
    }

    /// Clear all items and the coupon.
    pub fn clear(&mut self) {
        self.items.clear();
        self.coupon = None;
    }

    /// Look `code` up through `promotions` and apply it, replacing any
    /// coupon already applied.
    pub fn apply_coupon(
        &mut self,
        code: &str,
        promotions: &dyn PromotionService,
    ) -> Result<&Discount, CommerceError> {
        let discount = promotions
            .find(code)
            .ok_or_else(|| CommerceError::InvalidDiscountCode(code.trim().to_string()))?;
        debug!(code = %discount.code, "coupon applied");
        Ok(self.coupon.insert(discount))
    }

    /// Remove the applied coupon, returning it.
    pub fn remove_coupon(&mut self) -> Option<Discount> {
        self.coupon.take()
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of unique items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by product id.
    pub fn get_item(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        Money::try_sum(self.items.iter().map(|i| &i.total_price), Currency::USD)
            .ok_or(CommerceError::Overflow)
    }

    /// Calculate cart pricing under `policy`.
    pub fn calculate_pricing(&self, policy: &PricingPolicy) -> Result<CartPricing, CommerceError> {
        policy.price(self.subtotal()?, self.coupon.as_ref(), self.item_count())
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product ID.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Quantity.
    pub quantity: i64,
    /// Unit price.
    pub unit_price: Money,
    /// Total price (unit_price * quantity).
    pub total_price: Money,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<Self, CommerceError> {
        let total_price = unit_price
            .try_multiply(quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_price,
            total_price,
        })
    }

    /// Update the total price based on quantity.
    pub fn update_total(&mut self) -> Result<(), CommerceError> {
        self.total_price = self
            .unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::StaticPromotions;

    fn cart_with(items: &[(&str, i64, f64)]) -> Cart {
        let mut cart = Cart::default();
        for (id, quantity, price) in items {
            cart.add_item(ProductId::new(*id), *id, *quantity, Money::usd(*price))
                .unwrap();
        }
        cart
    }

    #[test]
    fn test_add_item() {
        let cart = cart_with(&[("1", 2, 10.0)]);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.items[0].total_price, Money::usd(20.0));
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut cart = cart_with(&[("1", 2, 10.0), ("2", 1, 5.0)]);
        cart.add_item(ProductId::new("1"), "1", 3, Money::usd(10.0)).unwrap();
        assert_eq!(cart.unique_item_count(), 2);
        assert_eq!(cart.get_item(&ProductId::new("1")).unwrap().quantity, 5);
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn test_add_product_uses_catalog_price() {
        let product = Product::new("4", "Chobani Greek Yogurt", "dairy", Money::usd(54.85));
        let mut cart = Cart::default();
        cart.add_product(&product, 2).unwrap();
        assert_eq!(cart.subtotal().unwrap(), Money::usd(109.70));
        assert_eq!(cart.items[0].product_name, "Chobani Greek Yogurt");
    }

    #[test]
    fn test_invalid_quantities() {
        let mut cart = Cart::default();
        assert_eq!(
            cart.add_item(ProductId::new("1"), "x", 0, Money::usd(1.0)),
            Err(CommerceError::InvalidQuantity(0))
        );
        assert_eq!(
            cart.add_item(ProductId::new("1"), "x", 10_000, Money::usd(1.0)),
            Err(CommerceError::QuantityExceedsLimit(10_000, MAX_QUANTITY_PER_ITEM))
        );

        cart.add_item(ProductId::new("1"), "x", 9_999, Money::usd(1.0)).unwrap();
        assert!(matches!(
            cart.add_item(ProductId::new("1"), "x", 1, Money::usd(1.0)),
            Err(CommerceError::QuantityExceedsLimit(10_000, _))
        ));
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = cart_with(&[("1", 2, 10.0), ("2", 1, 5.0)]);
        cart.update_quantity(&ProductId::new("1"), 4).unwrap();
        assert_eq!(cart.get_item(&ProductId::new("1")).unwrap().total_price, Money::usd(40.0));

        cart.update_quantity(&ProductId::new("2"), 0).unwrap();
        assert!(cart.get_item(&ProductId::new("2")).is_none());

        assert!(matches!(
            cart.update_quantity(&ProductId::new("9"), 1),
            Err(CommerceError::ItemNotInCart(_))
        ));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = cart_with(&[("1", 1, 10.0), ("2", 1, 5.0)]);
        cart.remove_item(&ProductId::new("1")).unwrap();
        assert!(cart.remove_item(&ProductId::new("1")).is_err());
        assert_eq!(cart.unique_item_count(), 1);

        cart.apply_coupon("SAVE10", &StaticPromotions::storefront_defaults())
            .unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.coupon.is_none());
    }

    #[test]
    fn test_save10_on_fifty_totals_fifty_nine() {
        let mut cart = cart_with(&[("1", 1, 50.0)]);
        cart.apply_coupon("save10", &StaticPromotions::storefront_defaults())
            .unwrap();
        let pricing = cart.calculate_pricing(&PricingPolicy::default()).unwrap();
        assert_eq!(pricing.grand_total, Money::usd(59.0));
    }

    #[test]
    fn test_one_coupon_at_a_time() {
        let promotions = StaticPromotions::storefront_defaults();
        let mut cart = cart_with(&[("1", 1, 150.0)]);
        cart.apply_coupon("SAVE10", &promotions).unwrap();
        cart.apply_coupon("WELCOME20", &promotions).unwrap();

        let pricing = cart.calculate_pricing(&PricingPolicy::default()).unwrap();
        assert_eq!(pricing.discount_total, Money::usd(20.0));
        assert_eq!(pricing.applied_coupon.as_deref(), Some("WELCOME20"));
        // 150 + 0 shipping + 12 tax - 20
        assert_eq!(pricing.grand_total, Money::usd(142.0));

        assert_eq!(cart.remove_coupon().map(|d| d.code), Some("WELCOME20".to_string()));
        assert!(cart.remove_coupon().is_none());
    }

    #[test]
    fn test_unknown_coupon_keeps_current_one() {
        let promotions = StaticPromotions::storefront_defaults();
        let mut cart = cart_with(&[("1", 1, 50.0)]);
        cart.apply_coupon("SAVE10", &promotions).unwrap();

        let err = cart.apply_coupon(" nope ", &promotions).unwrap_err();
        assert_eq!(err, CommerceError::InvalidDiscountCode("nope".to_string()));
        assert_eq!(cart.coupon.as_ref().map(|d| d.code.as_str()), Some("SAVE10"));
    }

    #[test]
    fn test_discount_tracks_cart_changes() {
        let promotions = StaticPromotions::storefront_defaults();
        let mut cart = cart_with(&[("1", 1, 50.0)]);
        cart.apply_coupon("SAVE10", &promotions).unwrap();
        cart.update_quantity(&ProductId::new("1"), 2).unwrap();

        let pricing = cart.calculate_pricing(&PricingPolicy::default()).unwrap();
        assert_eq!(pricing.discount_total, Money::usd(10.0));
    }
}
