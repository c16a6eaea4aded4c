//! Catalog sources: the built-in sample catalog and JSON catalog files.

use std::collections::HashSet;

use crate::catalog::{NutritionalInfo, Product};
use crate::error::CommerceError;
use crate::money::Money;
use serde::Deserialize;

/// Parse a catalog from JSON.
///
/// Accepts either a bare array of products or an object with a `products`
/// array. Product ids must be unique.
pub fn parse_catalog_json(json: &str) -> Result<Vec<Product>, CommerceError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CatalogDocument {
        List(Vec<Product>),
        Wrapped { products: Vec<Product> },
    }

    let products = match serde_json::from_str::<CatalogDocument>(json)? {
        CatalogDocument::List(products) => products,
        CatalogDocument::Wrapped { products } => products,
    };

    let mut seen = HashSet::new();
    for product in &products {
        if !seen.insert(product.id.as_str()) {
            return Err(CommerceError::ValidationError(format!(
                "duplicate product id '{}'",
                product.id
            )));
        }
    }

    Ok(products)
}

/// The storefront's sample grocery catalog.
pub fn sample_products() -> Vec<Product> {
    vec![
        grocery(
            Product::new("1", "Organic Quinoa Brown Rice", "grains", Money::usd(28.85))
                .with_original_price(Money::usd(32.85))
                .with_brand("Organic Valley")
                .with_description(
                    "Premium organic quinoa brown rice blend, perfect for healthy meals.",
                )
                .with_rating(4.5)
                .with_stock(true, 45)
                .with_tag("organic")
                .with_tag("gluten-free")
                .with_tag("healthy"),
            "🌾",
            128,
            (220, "8g", "45g", "2g"),
            "1 lb",
            &["Organic Quinoa", "Organic Brown Rice"],
            "Store in a cool, dry place",
        ),
        grocery(
            Product::new("2", "Italian Chicken Meatballs", "meat", Money::usd(31.80))
                .with_brand("Bella Vista")
                .with_description(
                    "Authentic Italian-style chicken meatballs made with premium ingredients.",
                )
                .with_rating(4.8)
                .with_stock(true, 23)
                .with_tag("protein")
                .with_tag("italian")
                .with_tag("frozen"),
            "🍖",
            89,
            (180, "22g", "5g", "8g"),
            "1.5 lbs",
            &["Chicken", "Breadcrumbs", "Italian Herbs", "Garlic"],
            "Keep frozen until ready to cook",
        ),
        grocery(
            Product::new("3", "Blue Diamond Almonds", "snacks", Money::usd(23.85))
                .with_brand("Blue Diamond")
                .with_description("Roasted and salted almonds, perfect for snacking.")
                .with_rating(4.6)
                .with_stock(true, 67)
                .with_tag("nuts")
                .with_tag("protein")
                .with_tag("snack"),
            "🥜",
            156,
            (160, "6g", "6g", "14g"),
            "16 oz",
            &["Almonds", "Salt"],
            "Store in a cool, dry place",
        ),
        grocery(
            Product::new("4", "Chobani Greek Yogurt", "dairy", Money::usd(54.85))
                .with_brand("Chobani")
                .with_description("Creamy Greek yogurt packed with protein and probiotics.")
                .with_rating(4.7)
                .with_stock(true, 34)
                .with_tag("dairy")
                .with_tag("protein")
                .with_tag("probiotics"),
            "🥛",
            203,
            (100, "17g", "6g", "0g"),
            "32 oz",
            &["Cultured Pasteurized Nonfat Milk", "Live Cultures"],
            "Refrigerate at 40°F or below",
        ),
        grocery(
            Product::new("5", "Canada Dry Ginger Ale", "beverages", Money::usd(32.85))
                .with_brand("Canada Dry")
                .with_description("Refreshing ginger ale with a crisp, clean taste.")
                .with_rating(4.3)
                .with_stock(true, 89)
                .with_tag("beverage")
                .with_tag("ginger")
                .with_tag("refreshing"),
            "🥤",
            78,
            (140, "0g", "36g", "0g"),
            "12 fl oz (12 pack)",
            &["Carbonated Water", "High Fructose Corn Syrup", "Natural Flavors"],
            "Store in a cool place",
        ),
        grocery(
            Product::new("6", "Foster Farms Buffalo Wings", "meat", Money::usd(17.85))
                .with_brand("Foster Farms")
                .with_description("Spicy buffalo wings ready to cook, perfect for game day.")
                .with_rating(4.4)
                .with_stock(false, 0)
                .with_tag("chicken")
                .with_tag("spicy")
                .with_tag("frozen"),
            "🍗",
            92,
            (190, "19g", "1g", "12g"),
            "2 lbs",
            &["Chicken Wings", "Buffalo Sauce", "Spices"],
            "Keep frozen until ready to cook",
        ),
    ]
}

fn grocery(
    product: Product,
    image: &str,
    review_count: u32,
    (calories, protein, carbs, fat): (u32, &str, &str, &str),
    weight: &str,
    ingredients: &[&str],
    storage: &str,
) -> Product {
    Product {
        image: image.to_string(),
        images: vec![image.to_string(); 3],
        review_count,
        nutritional_info: Some(NutritionalInfo {
            calories,
            protein: protein.to_string(),
            carbs: carbs.to_string(),
            fat: fat.to_string(),
        }),
        weight: Some(weight.to_string()),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        storage_instructions: Some(storage.to_string()),
        ..product
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_shape() {
        let products = sample_products();
        assert_eq!(products.len(), 6);
        let out_of_stock: Vec<&str> = products
            .iter()
            .filter(|p| !p.in_stock)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(out_of_stock, vec!["6"]);
        assert!(products.iter().all(|p| (0.0..=5.0).contains(&p.rating)));
    }

    #[test]
    fn test_sample_catalog_survives_json() {
        let json = serde_json::to_string(&sample_products()).unwrap();
        let parsed = parse_catalog_json(&json).unwrap();
        assert_eq!(parsed, sample_products());
    }

    #[test]
    fn test_parse_wrapped_catalog() {
        let json = r#"{"products": [
            {"id": "a", "name": "Apple", "description": "", "brand": "", "category": "fruit",
             "price": 5, "rating": 3, "inStock": false}
        ]}"#;
        let products = parse_catalog_json(json).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, Money::usd(5.0));
        assert!(products[0].tags.is_empty());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let json = r#"[
            {"id": "a", "name": "Apple", "description": "", "brand": "", "category": "fruit",
             "price": 5, "rating": 3, "inStock": true},
            {"id": "a", "name": "Apricot", "description": "", "brand": "", "category": "fruit",
             "price": 6, "rating": 3, "inStock": true}
        ]"#;
        let err = parse_catalog_json(json).unwrap_err();
        assert!(matches!(err, CommerceError::ValidationError(_)));
    }

    #[test]
    fn test_malformed_json_is_a_serialization_error() {
        let err = parse_catalog_json("{not json").unwrap_err();
        assert!(matches!(err, CommerceError::SerializationError(_)));
    }
}
