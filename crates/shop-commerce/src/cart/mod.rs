//! Shopping cart module.
//!
//! Contains the cart, its pricing rules and the promotions lookup.

mod cart;
mod pricing;
mod promotions;

pub use cart::{Cart, LineItem, MAX_QUANTITY_PER_ITEM};
pub use pricing::{CartPricing, PricingPolicy};
pub use promotions::{Discount, DiscountValue, PromotionService, StaticPromotions};
