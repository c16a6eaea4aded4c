//! Cart pricing calculations.

use crate::cart::Discount;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Storefront pricing rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingPolicy {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Money,
    /// Shipping charged below the threshold.
    pub flat_shipping: Money,
    /// Sales tax rate applied to the subtotal (0.08 = 8%).
    pub tax_rate: f64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Money::usd(100.0),
            flat_shipping: Money::usd(10.0),
            tax_rate: 0.08,
        }
    }
}

impl PricingPolicy {
    /// Shipping charged for `subtotal`.
    pub fn shipping_for(&self, subtotal: &Money) -> Money {
        if subtotal.amount_cents > self.free_shipping_threshold.amount_cents {
            Money::zero(Currency::USD)
        } else {
            self.flat_shipping
        }
    }

    /// Tax on `subtotal`, rounded to the minor unit.
    pub fn tax_for(&self, subtotal: &Money) -> Money {
        subtotal.multiply_decimal(self.tax_rate)
    }

    /// Price a subtotal with an optional discount.
    ///
    /// `total = subtotal + shipping + tax - discount`. Shipping and tax are
    /// computed on the undiscounted subtotal, and a fixed discount larger
    /// than the subtotal is taken in full.
    pub fn price(
        &self,
        subtotal: Money,
        discount: Option<&Discount>,
        item_count: i64,
    ) -> Result<CartPricing, CommerceError> {
        let shipping_total = self.shipping_for(&subtotal);
        let tax_total = self.tax_for(&subtotal);
        let discount_total = discount
            .map(|d| d.calculate(&subtotal))
            .unwrap_or_else(|| Money::zero(Currency::USD));

        let grand_total = subtotal
            .try_add(&shipping_total)
            .and_then(|m| m.try_add(&tax_total))
            .and_then(|m| m.try_subtract(&discount_total))
            .ok_or(CommerceError::Overflow)?;

        let free_shipping_remaining = if shipping_total.is_zero() {
            None
        } else {
            self.free_shipping_threshold.try_subtract(&subtotal)
        };

        Ok(CartPricing {
            subtotal,
            discount_total,
            shipping_total,
            tax_total,
            grand_total,
            free_shipping_remaining,
            applied_coupon: discount.map(|d| d.code.clone()),
            item_count,
        })
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Subtotal before discounts.
    pub subtotal: Money,
    /// Coupon discount.
    pub discount_total: Money,
    /// Shipping cost.
    pub shipping_total: Money,
    /// Tax amount.
    pub tax_total: Money,
    /// Final total (subtotal + shipping + tax - discount).
    pub grand_total: Money,
    /// Amount still needed for free shipping; `None` once it applies.
    pub free_shipping_remaining: Option<Money>,
    /// Code of the coupon priced in, if any.
    pub applied_coupon: Option<String>,
    /// Sum of line quantities.
    pub item_count: i64,
}

impl CartPricing {
    /// Check if any discounts are applied.
    pub fn has_discounts(&self) -> bool {
        self.discount_total.amount_cents > 0
    }

    /// Whether shipping is free.
    pub fn ships_free(&self) -> bool {
        self.shipping_total.is_zero()
    }

    /// Get discount percentage of subtotal.
    pub fn discount_percentage(&self) -> f64 {
        if self.subtotal.amount_cents == 0 {
            return 0.0;
        }
        (self.discount_total.amount_cents as f64 / self.subtotal.amount_cents as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save10_on_fifty() {
        let policy = PricingPolicy::default();
        let save10 = Discount::percentage("SAVE10", "Save 10%", 10.0);
        let pricing = policy.price(Money::usd(50.0), Some(&save10), 1).unwrap();

        assert_eq!(pricing.shipping_total, Money::usd(10.0));
        assert_eq!(pricing.tax_total, Money::usd(4.0));
        assert_eq!(pricing.discount_total, Money::usd(5.0));
        assert_eq!(pricing.grand_total, Money::usd(59.0));
        assert_eq!(pricing.free_shipping_remaining, Some(Money::usd(50.0)));
        assert_eq!(pricing.applied_coupon.as_deref(), Some("SAVE10"));
        assert!((pricing.discount_percentage() - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_free_shipping_is_strictly_above_threshold() {
        let policy = PricingPolicy::default();

        let at = policy.price(Money::usd(100.0), None, 1).unwrap();
        assert_eq!(at.shipping_total, Money::usd(10.0));
        assert_eq!(at.free_shipping_remaining, Some(Money::usd(0.0)));

        let above = policy.price(Money::usd(100.01), None, 1).unwrap();
        assert!(above.ships_free());
        assert_eq!(above.free_shipping_remaining, None);
    }

    #[test]
    fn test_tax_rounds_to_cent() {
        let policy = PricingPolicy::default();
        // 28.85 * 0.08 = 2.308
        assert_eq!(policy.tax_for(&Money::usd(28.85)), Money::usd(2.31));
    }

    #[test]
    fn test_fixed_discount_above_subtotal_is_taken_in_full() {
        let policy = PricingPolicy::default();
        let welcome20 = Discount::fixed_amount("WELCOME20", "Welcome", Money::usd(20.0));
        let pricing = policy.price(Money::usd(15.0), Some(&welcome20), 1).unwrap();

        // 15.00 + 10.00 shipping + 1.20 tax - 20.00
        assert_eq!(pricing.discount_total, Money::usd(20.0));
        assert_eq!(pricing.grand_total, Money::usd(6.20));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let policy = PricingPolicy {
            flat_shipping: Money::new(i64::MAX, Currency::USD),
            ..PricingPolicy::default()
        };
        let err = policy.price(Money::usd(50.0), None, 1).unwrap_err();
        assert_eq!(err, CommerceError::Overflow);
    }

    #[test]
    fn test_empty_subtotal_still_pays_shipping() {
        let pricing = PricingPolicy::default().price(Money::usd(0.0), None, 0).unwrap();
        assert_eq!(pricing.grand_total, Money::usd(10.0));
        assert!(!pricing.has_discounts());
    }
}
