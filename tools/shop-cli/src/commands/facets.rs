//! Facet summary command.

use anyhow::Result;
use console::style;
use shop_commerce::catalog::{CatalogQueryEngine, Facet};
use shop_commerce::search::FilterCriteria;
use shop_observability::MetricsCollector;

use super::FacetsArgs;
use crate::context::Context;

/// Run the facets command.
pub fn run(args: FacetsArgs, ctx: &Context, metrics: &mut MetricsCollector) -> Result<()> {
    let products = metrics.time("load_catalog", || ctx.load_catalog())?;
    metrics.record_count("products", products.len() as u64);

    let mut engine = CatalogQueryEngine::with_products(products);
    engine.set_filters(FilterCriteria {
        category: args.category.map(Into::into),
        brand: args.brand,
        ..FilterCriteria::default()
    });
    let facets = metrics.time("facets", || engine.facets());

    if ctx.output.is_json() {
        ctx.output.json(&facets);
        return Ok(());
    }

    print_facet(ctx, &facets.categories);
    print_facet(ctx, &facets.brands);

    ctx.output.header("Price");
    match (facets.min_price, facets.max_price) {
        (Some(min), Some(max)) => {
            ctx.output.kv("range", &format!("{} - {}", min.display(), max.display()))
        }
        _ => ctx.output.info("Catalog is empty."),
    }

    Ok(())
}

fn print_facet(ctx: &Context, facet: &Facet) {
    ctx.output.header(&facet.name);
    if facet.values.is_empty() {
        ctx.output.info("No values.");
        return;
    }
    for value in &facet.values {
        let label = if value.selected {
            style(&value.value).bold().to_string()
        } else {
            value.value.clone()
        };
        ctx.output.kv(&label, &value.count.to_string());
    }
}
