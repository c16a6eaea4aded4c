//! Facet counts for the filter sidebar.

use crate::catalog::Product;
use crate::money::Money;
use crate::search::FilterCriteria;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A facet for filtering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facet {
    /// Facet name (e.g., "Category", "Brand").
    pub name: String,
    /// Filter field this facet drives.
    pub field: String,
    /// Facet values, most common first.
    pub values: Vec<FacetValue>,
}

impl Facet {
    /// Count `key` over `products`.
    ///
    /// Values are ordered by count descending, then by value, so the output
    /// is stable for a given collection.
    fn terms<'a>(
        name: &str,
        field: &str,
        products: &'a [Product],
        key: impl Fn(&'a Product) -> &'a str,
        selected: Option<&str>,
    ) -> Self {
        let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
        for product in products {
            let value = key(product);
            if !value.is_empty() {
                *counts.entry(value).or_insert(0) += 1;
            }
        }

        let mut values: Vec<FacetValue> = counts
            .into_iter()
            .map(|(value, count)| FacetValue {
                selected: selected == Some(value),
                value: value.to_string(),
                count,
            })
            .collect();
        values.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            name: name.to_string(),
            field: field.to_string(),
            values,
        }
    }

    /// Look up a value's count.
    pub fn count_of(&self, value: &str) -> Option<i64> {
        self.values.iter().find(|v| v.value == value).map(|v| v.count)
    }
}

/// A single facet value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetValue {
    /// The value.
    pub value: String,
    /// Number of products with this value.
    pub count: i64,
    /// Whether currently selected.
    pub selected: bool,
}

/// Sidebar data for a catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogFacets {
    pub categories: Facet,
    pub brands: Facet,
    /// Lowest price in the collection.
    pub min_price: Option<Money>,
    /// Highest price in the collection.
    pub max_price: Option<Money>,
}

impl CatalogFacets {
    pub(crate) fn build(products: &[Product], criteria: &FilterCriteria) -> Self {
        let selected_category = criteria.category.as_ref().map(|c| c.as_str());
        let selected_brand = criteria.brand.as_deref();

        Self {
            categories: Facet::terms(
                "Category",
                "category",
                products,
                |p| p.category.as_str(),
                selected_category,
            ),
            brands: Facet::terms("Brand", "brand", products, |p| p.brand.as_str(), selected_brand),
            min_price: products
                .iter()
                .map(|p| p.price)
                .min_by_key(|price| price.amount_cents),
            max_price: products
                .iter()
                .map(|p| p.price)
                .max_by_key(|price| price.amount_cents),
        }
    }
}
