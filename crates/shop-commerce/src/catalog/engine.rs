//! Catalog query engine.
//!
//! Holds the product collection together with the active filters and sort
//! key, and keeps the derived visible set in step with them. Every mutator
//! recomputes the visible set before returning, so a read that follows a
//! mutation always reflects it.

use crate::catalog::{CatalogFacets, Product};
use crate::ids::ProductId;
use crate::search::{FilterCriteria, SortKey};
use tracing::{debug, info};

/// Number of related products shown on a product page.
pub const DEFAULT_RELATED_LIMIT: usize = 4;

/// Run the filter and sort phases over `products`.
///
/// Returns positions into `products`. The result depends only on the three
/// arguments: filtering keeps collection order, and the sort is stable on
/// top of it.
pub fn evaluate(products: &[Product], criteria: &FilterCriteria, sort_key: SortKey) -> Vec<usize> {
    let mut indices: Vec<usize> = products
        .iter()
        .enumerate()
        .filter(|(_, product)| criteria.matches(product))
        .map(|(index, _)| index)
        .collect();
    sort_key.apply(products, &mut indices);
    indices
}

/// Owned query context over one product collection.
///
/// Not internally synchronised: mutators take `&mut self`, so a host that
/// shares the engine across threads wraps it in its own lock.
#[derive(Debug, Clone, Default)]
pub struct CatalogQueryEngine {
    products: Vec<Product>,
    filters: FilterCriteria,
    sort_key: SortKey,
    visible: Vec<usize>,
}

impl CatalogQueryEngine {
    /// Create an empty engine with default filters and sort.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine over `products` with default filters and sort.
    pub fn with_products(products: Vec<Product>) -> Self {
        let mut engine = Self::new();
        engine.set_products(products);
        engine
    }

    /// Replace the product collection and re-apply the current filters and
    /// sort.
    pub fn set_products(&mut self, products: Vec<Product>) {
        info!(count = products.len(), "catalog replaced");
        self.products = products;
        self.recompute();
    }

    /// Replace the filters wholesale. Fields left unset in `criteria` are
    /// cleared, not carried over.
    pub fn set_filters(&mut self, criteria: FilterCriteria) {
        self.filters = criteria;
        self.recompute();
    }

    /// Replace the sort key.
    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
        self.recompute();
    }

    /// Set the search text, keeping every other filter.
    pub fn search(&mut self, text: impl Into<String>) {
        let criteria = FilterCriteria {
            search: Some(text.into()),
            ..self.filters.clone()
        };
        self.set_filters(criteria);
    }

    /// Reset filters to the empty default.
    pub fn clear_filters(&mut self) {
        self.set_filters(FilterCriteria::default());
    }

    /// Rebuild the visible set from the current inputs.
    pub fn recompute(&mut self) {
        self.visible = evaluate(&self.products, &self.filters, self.sort_key);
        debug!(
            total = self.products.len(),
            visible = self.visible.len(),
            active_filters = self.filters.active_count(),
            sort = %self.sort_key,
            "catalog view recomputed"
        );
    }

    /// Full product collection, in load order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products passing the current filters, in sort order.
    pub fn visible(&self) -> impl ExactSizeIterator<Item = &Product> + '_ {
        self.visible.iter().map(move |&index| &self.products[index])
    }

    /// Number of visible products.
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Active filters.
    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    /// Active sort key.
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Look a product up in the full collection, ignoring filters.
    pub fn get_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Up to `limit` other products in the same category as `id`, in
    /// collection order. Empty when `id` is unknown.
    pub fn get_related(&self, id: &ProductId, limit: usize) -> Vec<&Product> {
        let Some(current) = self.get_by_id(id) else {
            return Vec::new();
        };

        self.products
            .iter()
            .filter(|product| &product.id != id && product.category == current.category)
            .take(limit)
            .collect()
    }

    /// [`get_related`](Self::get_related) with [`DEFAULT_RELATED_LIMIT`].
    pub fn related(&self, id: &ProductId) -> Vec<&Product> {
        self.get_related(id, DEFAULT_RELATED_LIMIT)
    }

    /// Category and brand counts over the full collection, marked against
    /// the current filters.
    pub fn facets(&self) -> CatalogFacets {
        CatalogFacets::build(&self.products, &self.filters)
    }
}
