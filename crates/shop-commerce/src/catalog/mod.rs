//! Product catalog module.
//!
//! Contains the product model, the query engine that derives the visible
//! product list, facet counts and catalog sources.

mod engine;
mod facets;
mod product;
mod source;

pub use engine::{evaluate, CatalogQueryEngine, DEFAULT_RELATED_LIMIT};
pub use facets::{CatalogFacets, Facet, FacetValue};
pub use product::{NutritionalInfo, Product, ProductVariants, StockStatus, LOW_STOCK_THRESHOLD};
pub use source::{parse_catalog_json, sample_products};
