//! Product detail command.

use anyhow::Result;
use serde_json::json;
use shop_commerce::catalog::CatalogQueryEngine;
use shop_commerce::error::CommerceError;
use shop_commerce::ids::ProductId;
use shop_observability::MetricsCollector;

use super::ProductArgs;
use crate::context::Context;
use crate::output::{format_price, format_rating, stock_badge};

/// Run the product command.
pub fn run(args: ProductArgs, ctx: &Context, metrics: &mut MetricsCollector) -> Result<()> {
    let products = metrics.time("load_catalog", || ctx.load_catalog())?;
    metrics.record_count("products", products.len() as u64);
    let engine = CatalogQueryEngine::with_products(products);

    let id = ProductId::new(args.id);
    let limit = args.related.unwrap_or(ctx.config.catalog.related_limit);
    let (product, related) = metrics.time("lookup", || {
        let product = engine.get_by_id(&id);
        (product, engine.get_related(&id, limit))
    });
    let product = product.ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
    metrics.record_count("related", related.len() as u64);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": product,
            "onSale": product.is_on_sale(),
            "discountPercentage": product.discount_percentage(),
            "stockStatus": product.stock_status(),
            "related": related,
        }));
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    if !product.brand.is_empty() {
        ctx.output.kv("brand", &product.brand);
    }
    ctx.output.kv("category", product.category.as_str());
    ctx.output.kv("price", &format_price(product));
    ctx.output.kv(
        "rating",
        &format!(
            "{} ({} reviews)",
            format_rating(product.rating),
            product.review_count
        ),
    );
    let stock = match product.stock_count {
        0 => stock_badge(product.stock_status()),
        count => format!("{} ({} left)", stock_badge(product.stock_status()), count),
    };
    ctx.output.kv("stock", &stock);
    if !product.tags.is_empty() {
        ctx.output.kv("tags", &product.tags.join(", "));
    }
    if let Some(weight) = &product.weight {
        ctx.output.kv("weight", weight);
    }
    if let Some(dimensions) = &product.dimensions {
        ctx.output.kv("dimensions", dimensions);
    }
    if let Some(variants) = &product.variants {
        if !variants.sizes.is_empty() {
            ctx.output.kv("sizes", &variants.sizes.join(", "));
        }
        if !variants.colors.is_empty() {
            ctx.output.kv("colors", &variants.colors.join(", "));
        }
    }

    if !product.description.is_empty() {
        ctx.output.line("");
        ctx.output.line(&format!("  {}", product.description));
    }

    if let Some(nutrition) = &product.nutritional_info {
        ctx.output.header("Nutrition");
        ctx.output.kv("calories", &nutrition.calories.to_string());
        ctx.output.kv("protein", &nutrition.protein);
        ctx.output.kv("carbs", &nutrition.carbs);
        ctx.output.kv("fat", &nutrition.fat);
    }

    if !product.ingredients.is_empty() {
        ctx.output.header("Ingredients");
        for ingredient in &product.ingredients {
            ctx.output.list_item(ingredient);
        }
    }

    if let Some(storage) = &product.storage_instructions {
        ctx.output.header("Storage");
        ctx.output.line(&format!("  {}", storage));
    }

    if !related.is_empty() {
        ctx.output.header("Related products");
        for other in &related {
            ctx.output.list_item(&format!(
                "{}  {}  {}",
                other.name,
                format_price(other),
                format_rating(other.rating)
            ));
        }
    }

    Ok(())
}
