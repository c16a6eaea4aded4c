//! Storefront domain types and logic.
//!
//! - **Catalog**: products, the sample catalog, facets and the query engine
//! - **Search**: filter criteria, sort keys and name collation
//! - **Cart**: line items, coupons and pricing
//!
//! # Example
//!
//! ```rust
//! use shop_commerce::prelude::*;
//!
//! let mut engine = CatalogQueryEngine::with_products(sample_products());
//! engine.set_filters(FilterCriteria::new().with_category("meat").with_in_stock(true));
//! let names: Vec<&str> = engine.visible().map(|p| p.name.as_str()).collect();
//! assert_eq!(names, vec!["Italian Chicken Meatballs"]);
//!
//! let mut cart = Cart::default();
//! let yogurt = engine.get_by_id(&ProductId::new("4")).unwrap();
//! cart.add_product(yogurt, 1).unwrap();
//! cart.apply_coupon("SAVE10", &StaticPromotions::storefront_defaults()).unwrap();
//! let pricing = cart.calculate_pricing(&PricingPolicy::default()).unwrap();
//! println!("Total: {}", pricing.grand_total.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        evaluate, sample_products, CatalogFacets, CatalogQueryEngine, Facet, FacetValue, Product,
        StockStatus,
    };

    // Search
    pub use crate::search::{compare_names, FilterCriteria, SortKey};

    // Cart
    pub use crate::cart::{
        Cart, CartPricing, Discount, DiscountValue, LineItem, PricingPolicy, PromotionService,
        StaticPromotions,
    };
}
