//! Discount codes and the promotions lookup the cart talks to.

use crate::money::Money;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Value of a discount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DiscountValue {
    /// Percentage off the subtotal (0.0 - 100.0).
    Percentage(f64),
    /// Fixed amount off.
    Fixed(Money),
}

impl DiscountValue {
    /// Calculate the discount amount for a given subtotal.
    ///
    /// A fixed amount is taken whole, even when it exceeds the subtotal.
    pub fn calculate(&self, subtotal: &Money) -> Money {
        match self {
            DiscountValue::Percentage(percent) => subtotal.percentage(*percent),
            DiscountValue::Fixed(amount) => *amount,
        }
    }

    /// Short human description ("10% off", "$20.00 off").
    pub fn describe(&self) -> String {
        match self {
            DiscountValue::Percentage(percent) => format!("{}% off", percent),
            DiscountValue::Fixed(amount) => format!("{} off", amount.display()),
        }
    }
}

/// A coupon definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Discount {
    /// Discount code (e.g., "SAVE10").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Value of the discount.
    pub value: DiscountValue,
}

impl Discount {
    /// Create a new percentage discount.
    pub fn percentage(code: impl Into<String>, name: impl Into<String>, percent: f64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            value: DiscountValue::Percentage(percent),
        }
    }

    /// Create a new fixed amount discount.
    pub fn fixed_amount(code: impl Into<String>, name: impl Into<String>, amount: Money) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            value: DiscountValue::Fixed(amount),
        }
    }

    /// Discount amount for a given subtotal.
    pub fn calculate(&self, subtotal: &Money) -> Money {
        self.value.calculate(subtotal)
    }

    /// Whether `code` names this discount (trimmed, case-insensitive).
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }
}

/// Source of coupon definitions.
pub trait PromotionService {
    /// Look up a coupon by the code a shopper typed.
    fn find(&self, code: &str) -> Option<Discount>;
}

/// In-memory promotions table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticPromotions {
    discounts: Vec<Discount>,
}

impl StaticPromotions {
    /// An empty table; every code is rejected.
    pub fn new() -> Self {
        Self::default()
    }

    /// The storefront's standing codes: `SAVE10` and `WELCOME20`.
    pub fn storefront_defaults() -> Self {
        Self::new()
            .with(Discount::percentage("SAVE10", "10% off your order", 10.0))
            .with(Discount::fixed_amount(
                "WELCOME20",
                "$20 off your first order",
                Money::usd(20.0),
            ))
    }

    /// Add a discount, replacing any existing one with the same code.
    pub fn with(mut self, discount: Discount) -> Self {
        self.discounts.retain(|d| !d.matches_code(&discount.code));
        self.discounts.push(discount);
        self
    }

    /// All discounts in the table.
    pub fn discounts(&self) -> &[Discount] {
        &self.discounts
    }

    pub fn len(&self) -> usize {
        self.discounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discounts.is_empty()
    }
}

impl FromIterator<Discount> for StaticPromotions {
    fn from_iter<I: IntoIterator<Item = Discount>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}

impl PromotionService for StaticPromotions {
    fn find(&self, code: &str) -> Option<Discount> {
        if code.trim().is_empty() {
            return None;
        }
        let found = self.discounts.iter().find(|d| d.matches_code(code)).cloned();
        if found.is_none() {
            warn!(code = code.trim(), "unknown discount code");
        }
        found
    }
}
