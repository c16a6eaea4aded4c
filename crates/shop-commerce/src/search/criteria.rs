//! Filter criteria for catalog queries.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The active set of product filters.
///
/// Every field is optional; an absent field places no constraint. A product
/// is visible only when it satisfies all present fields. Empty `search`,
/// `category` and `brand` strings count as absent.
///
/// Price bounds are plain dollar amounts compared against the exact cent
/// price, so `28.851` excludes a `$28.85` product and `28.85` keeps it.
/// Bounds are not validated: `min_price` above `max_price` matches nothing,
/// and so does a NaN bound. [`FilterCriteria::validate`] is for callers
/// that want to reject such input up front.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against name, description, brand
    /// and tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Exact, case-sensitive category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    /// Exact, case-sensitive brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Inclusive lower price bound, in dollars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    /// Inclusive upper price bound, in dollars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    /// Inclusive minimum rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Exact stock flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
}

impl FilterCriteria {
    /// Create empty criteria (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the lower price bound.
    pub fn with_min_price(mut self, min: f64) -> Self {
        self.min_price = Some(min);
        self
    }

    /// Set the upper price bound.
    pub fn with_max_price(mut self, max: f64) -> Self {
        self.max_price = Some(max);
        self
    }

    /// Set both price bounds.
    pub fn with_price_range(self, min: f64, max: f64) -> Self {
        self.with_min_price(min).with_max_price(max)
    }

    /// Set the minimum rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the stock flag.
    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    /// Whether no constraint is active.
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of constraints that take effect.
    pub fn active_count(&self) -> usize {
        [
            self.search_text().is_some(),
            self.category_constraint().is_some(),
            self.brand_constraint().is_some(),
            self.min_price.is_some(),
            self.max_price.is_some(),
            self.rating.is_some(),
            self.in_stock.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Reject bounds that are not finite numbers.
    ///
    /// The engine accepts any criteria; this is for input taken from users.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let bounds = [
            ("min_price", self.min_price),
            ("max_price", self.max_price),
            ("rating", self.rating),
        ];
        for (field, value) in bounds {
            if let Some(value) = value.filter(|v| !v.is_finite()) {
                return Err(CommerceError::ValidationError(format!(
                    "{} must be a finite number, got {}",
                    field, value
                )));
            }
        }
        Ok(())
    }

    /// Check a product against every present constraint.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(needle) = self.search_text() {
            if !matches_search(product, &needle.to_lowercase()) {
                return false;
            }
        }

        if let Some(category) = self.category_constraint() {
            if &product.category != category {
                return false;
            }
        }

        if let Some(brand) = self.brand_constraint() {
            if product.brand != brand {
                return false;
            }
        }

        let price = product.price.to_decimal();
        if let Some(min) = self.min_price {
            if price.partial_cmp(&min).map_or(true, Ordering::is_lt) {
                return false;
            }
        }

        if let Some(max) = self.max_price {
            if price.partial_cmp(&max).map_or(true, Ordering::is_gt) {
                return false;
            }
        }

        if let Some(rating) = self.rating {
            if product.rating.partial_cmp(&rating).map_or(true, Ordering::is_lt) {
                return false;
            }
        }

        if let Some(in_stock) = self.in_stock {
            if product.in_stock != in_stock {
                return false;
            }
        }

        true
    }

    fn search_text(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    fn category_constraint(&self) -> Option<&CategoryId> {
        self.category.as_ref().filter(|c| !c.is_empty())
    }

    fn brand_constraint(&self) -> Option<&str> {
        self.brand.as_deref().filter(|b| !b.is_empty())
    }
}

fn matches_search(product: &Product, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);
    contains(&product.name)
        || contains(&product.description)
        || contains(&product.brand)
        || product.tags.iter().any(|tag| contains(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn almonds() -> Product {
        Product::new("3", "Blue Diamond Almonds", "snacks", Money::usd(23.85))
            .with_brand("Blue Diamond")
            .with_description("Roasted and salted almonds, perfect for snacking.")
            .with_rating(4.6)
            .with_stock(true, 67)
            .with_tag("nuts")
            .with_tag("protein")
    }

    #[test]
    fn test_empty_criteria_match_everything() {
        let criteria = FilterCriteria::new();
        assert!(criteria.is_empty());
        assert!(criteria.matches(&almonds()));
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        assert!(FilterCriteria::new().with_search("DIAMOND").matches(&almonds()));
        assert!(FilterCriteria::new().with_search("salted").matches(&almonds()));
        assert!(FilterCriteria::new().with_search("Prot").matches(&almonds()));
        assert!(!FilterCriteria::new().with_search("yogurt").matches(&almonds()));
    }

    #[test]
    fn test_empty_strings_are_no_constraint() {
        let criteria = FilterCriteria::new()
            .with_search("")
            .with_category("")
            .with_brand("");
        assert!(criteria.is_empty());
        assert!(criteria.matches(&almonds()));
    }

    #[test]
    fn test_category_and_brand_are_exact() {
        assert!(FilterCriteria::new().with_category("snacks").matches(&almonds()));
        assert!(!FilterCriteria::new().with_category("Snacks").matches(&almonds()));
        assert!(FilterCriteria::new().with_brand("Blue Diamond").matches(&almonds()));
        assert!(!FilterCriteria::new().with_brand("blue diamond").matches(&almonds()));
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        assert!(FilterCriteria::new().with_price_range(23.85, 23.85).matches(&almonds()));
        assert!(!FilterCriteria::new().with_min_price(23.86).matches(&almonds()));
        assert!(!FilterCriteria::new().with_max_price(23.84).matches(&almonds()));
    }

    #[test]
    fn test_sub_cent_bounds_are_not_rounded() {
        assert!(!FilterCriteria::new().with_min_price(23.851).matches(&almonds()));
        assert!(FilterCriteria::new().with_min_price(23.849).matches(&almonds()));
        assert!(!FilterCriteria::new().with_max_price(23.849).matches(&almonds()));
        assert!(FilterCriteria::new().with_max_price(23.851).matches(&almonds()));
    }

    #[test]
    fn test_non_finite_bounds() {
        let nan = FilterCriteria::new().with_min_price(f64::NAN);
        assert!(!nan.matches(&almonds()));
        assert!(nan.validate().is_err());

        let open = FilterCriteria::new().with_max_price(f64::INFINITY);
        assert!(open.matches(&almonds()));
        let err = open.validate().unwrap_err();
        assert!(err.to_string().contains("max_price"), "{}", err);

        assert!(FilterCriteria::new().with_rating(f64::NAN).validate().is_err());
        assert!(FilterCriteria::new().with_price_range(1.0, 2.0).validate().is_ok());
    }

    #[test]
    fn test_inverted_bounds_match_nothing() {
        let criteria = FilterCriteria::new().with_price_range(100.0, 1.0);
        assert!(!criteria.matches(&almonds()));
    }

    #[test]
    fn test_zero_min_price_is_a_constraint() {
        let criteria = FilterCriteria::new().with_min_price(0.0);
        assert_eq!(criteria.active_count(), 1);
        assert!(criteria.matches(&almonds()));
    }

    #[test]
    fn test_rating_and_stock() {
        assert!(FilterCriteria::new().with_rating(4.6).matches(&almonds()));
        assert!(!FilterCriteria::new().with_rating(4.7).matches(&almonds()));
        assert!(FilterCriteria::new().with_in_stock(true).matches(&almonds()));
        assert!(!FilterCriteria::new().with_in_stock(false).matches(&almonds()));
    }

    #[test]
    fn test_all_constraints_must_hold() {
        let criteria = FilterCriteria::new()
            .with_search("almond")
            .with_category("snacks")
            .with_in_stock(false);
        assert_eq!(criteria.active_count(), 3);
        assert!(!criteria.matches(&almonds()));
    }
}
