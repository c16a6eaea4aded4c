//! Product listing command.

use anyhow::Result;
use serde_json::json;
use shop_commerce::catalog::CatalogQueryEngine;
use shop_commerce::search::FilterCriteria;
use shop_observability::MetricsCollector;

use super::ProductsArgs;
use crate::context::Context;
use crate::output::{format_price, format_rating, stock_badge};

const COLUMNS: [&str; 6] = ["ID", "Name", "Brand", "Price", "Rating", "Stock"];
const WIDTHS: [usize; 6] = [4, 30, 16, 26, 6, 12];

impl ProductsArgs {
    /// Filter criteria for these arguments. Prices are in dollars, the
    /// unit of catalog files; `NaN` and infinite bounds are rejected.
    pub fn criteria(&self) -> Result<FilterCriteria> {
        let criteria = FilterCriteria {
            search: self.search.clone(),
            category: self.category.clone().map(Into::into),
            brand: self.brand.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            rating: self.rating,
            in_stock: self.in_stock,
        };
        criteria.validate()?;
        Ok(criteria)
    }
}

/// Run the products command.
pub fn run(args: ProductsArgs, ctx: &Context, metrics: &mut MetricsCollector) -> Result<()> {
    let products = metrics.time("load_catalog", || ctx.load_catalog())?;
    metrics.record_count("products", products.len() as u64);

    let sort_key = match args.sort {
        Some(key) => key,
        None => ctx.config.sort_key()?,
    };
    let criteria = args.criteria()?;
    ctx.output.debug(&format!(
        "{} active filter(s), sort {}",
        criteria.active_count(),
        sort_key
    ));

    let mut engine = CatalogQueryEngine::with_products(products);
    metrics.time("query", || {
        engine.set_filters(criteria);
        engine.set_sort_key(sort_key);
    });
    metrics.record_count("visible", engine.visible_len() as u64);

    if ctx.output.is_json() {
        let visible: Vec<_> = engine.visible().collect();
        ctx.output.json(&json!({
            "total": engine.products().len(),
            "visible": engine.visible_len(),
            "sort": sort_key,
            "filters": engine.filters(),
            "products": visible,
        }));
        return Ok(());
    }

    ctx.output.header(&format!(
        "Products ({} of {}, {})",
        engine.visible_len(),
        engine.products().len(),
        sort_key.display_name()
    ));

    if engine.visible_len() == 0 {
        ctx.output.info("No products match the current filters.");
        if !engine.filters().is_empty() {
            ctx.output.info("Try removing some filters.");
        }
        return Ok(());
    }

    ctx.output.table_row(&COLUMNS, &WIDTHS);
    for product in engine.visible() {
        let price = format_price(product);
        let rating = format_rating(product.rating);
        let stock = stock_badge(product.stock_status());
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &product.brand,
                &price,
                &rating,
                &stock,
            ],
            &WIDTHS,
        );
    }

    Ok(())
}
