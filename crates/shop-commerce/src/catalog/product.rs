//! Product types.

use crate::ids::{CategoryId, ProductId};
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// Stock count at or below which an in-stock product is shown as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// A product in the catalog.
///
/// Only the identity, text, price, rating and stock fields take part in
/// catalog queries; the remaining fields are carried for product pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// Brand name.
    #[serde(default)]
    pub brand: String,
    /// Category slug.
    pub category: CategoryId,
    /// Current selling price.
    #[serde(with = "money::decimal")]
    pub price: Money,
    /// Price before markdown. Not checked against `price`.
    #[serde(
        default,
        with = "money::decimal::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_price: Option<Money>,
    /// Average rating in [0, 5].
    pub rating: f64,
    /// Number of reviews behind the rating.
    #[serde(default)]
    pub review_count: u32,
    /// Whether the product can be purchased.
    pub in_stock: bool,
    /// Units on hand.
    #[serde(default)]
    pub stock_count: u32,
    /// Tags used for search.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Primary image (URL or glyph).
    #[serde(default)]
    pub image: String,
    /// Gallery images.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Selectable variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<ProductVariants>,
    /// Nutrition facts per serving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<NutritionalInfo>,
    /// Package weight (free text, e.g. "1 lb").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    /// Package dimensions (free text).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    /// Ingredient list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
    /// Storage instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_instructions: Option<String>,
}

impl Product {
    /// Create a product with the fields catalog queries use; everything else
    /// starts empty.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<CategoryId>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            brand: String::new(),
            category: category.into(),
            price,
            original_price: None,
            rating: 0.0,
            review_count: 0,
            in_stock: true,
            stock_count: 0,
            tags: Vec::new(),
            image: String::new(),
            images: Vec::new(),
            variants: None,
            nutritional_info: None,
            weight: None,
            dimensions: None,
            ingredients: Vec::new(),
            storage_instructions: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Set the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Set the stock state.
    pub fn with_stock(mut self, in_stock: bool, stock_count: u32) -> Self {
        self.in_stock = in_stock;
        self.stock_count = stock_count;
        self
    }

    /// Set the original (pre-markdown) price.
    pub fn with_original_price(mut self, original_price: Money) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Add a tag to this product.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    /// Check if this product is on sale (original price above price).
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .map(|original| original > self.price)
            .unwrap_or(false)
    }

    /// Whole percent saved against the original price, if on sale.
    pub fn discount_percentage(&self) -> Option<u32> {
        let original = self.original_price?;
        if !self.is_on_sale() || original.amount_cents <= 0 {
            return None;
        }
        let savings = original.amount_cents - self.price.amount_cents;
        Some(((savings as f64 / original.amount_cents as f64) * 100.0).round() as u32)
    }

    /// Stock status for display.
    pub fn stock_status(&self) -> StockStatus {
        if !self.in_stock {
            StockStatus::OutOfStock
        } else if self.stock_count <= LOW_STOCK_THRESHOLD {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

/// Display stock status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }
}

/// Variant choices offered on the product page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductVariants {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
}

/// Nutrition facts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NutritionalInfo {
    pub calories: u32,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_creation() {
        let product = Product::new("1", "Banana", "fruit", Money::usd(10.0))
            .with_brand("Acme")
            .with_rating(4.0);
        assert_eq!(product.id.as_str(), "1");
        assert_eq!(product.category.as_str(), "fruit");
        assert_eq!(product.brand, "Acme");
        assert!(product.in_stock);
    }

    #[test]
    fn test_product_on_sale() {
        let product = Product::new("1", "Quinoa", "grains", Money::usd(28.85))
            .with_original_price(Money::usd(32.85));
        assert!(product.is_on_sale());
        assert_eq!(product.discount_percentage(), Some(12));
    }

    #[test]
    fn test_original_price_below_price_is_kept_as_is() {
        let product = Product::new("1", "Odd", "misc", Money::usd(10.0))
            .with_original_price(Money::usd(8.0));
        assert_eq!(product.original_price, Some(Money::usd(8.0)));
        assert!(!product.is_on_sale());
        assert_eq!(product.discount_percentage(), None);
    }

    #[test]
    fn test_stock_status() {
        let base = Product::new("1", "Wings", "meat", Money::usd(17.85));
        assert_eq!(base.clone().with_stock(false, 0).stock_status(), StockStatus::OutOfStock);
        assert_eq!(base.clone().with_stock(true, 3).stock_status(), StockStatus::LowStock);
        assert_eq!(base.with_stock(true, 45).stock_status(), StockStatus::InStock);
    }

    #[test]
    fn test_deserialize_catalog_json() {
        let json = r#"{
            "id": "5",
            "name": "Canada Dry Ginger Ale",
            "price": 32.85,
            "originalPrice": 35.00,
            "category": "beverages",
            "brand": "Canada Dry",
            "rating": 4.3,
            "reviewCount": 78,
            "description": "Refreshing ginger ale.",
            "inStock": true,
            "stockCount": 89,
            "tags": ["beverage", "ginger"],
            "nutritionalInfo": {"calories": 140, "protein": "0g", "carbs": "36g", "fat": "0g"}
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price.amount_cents, 3285);
        assert_eq!(product.original_price.unwrap().amount_cents, 3500);
        assert_eq!(product.review_count, 78);
        assert_eq!(product.nutritional_info.unwrap().calories, 140);
        assert!(product.images.is_empty());
    }
}
