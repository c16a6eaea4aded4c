//! Cart pricing command.

use anyhow::{Context as _, Result};
use serde_json::json;
use shop_commerce::cart::Cart;
use shop_commerce::catalog::CatalogQueryEngine;
use shop_commerce::error::CommerceError;
use shop_observability::MetricsCollector;

use super::CartArgs;
use crate::context::Context;
use crate::output::format_shipping;

const WIDTHS: [usize; 4] = [30, 5, 10, 10];

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context, metrics: &mut MetricsCollector) -> Result<()> {
    let products = metrics.time("load_catalog", || ctx.load_catalog())?;
    metrics.record_count("products", products.len() as u64);
    let engine = CatalogQueryEngine::with_products(products);

    let policy = ctx.config.pricing_policy()?;
    let promotions = ctx.config.promotions()?;

    metrics.start_step("build_cart");
    let mut cart = Cart::new();
    for (id, quantity) in &args.items {
        let product = engine
            .get_by_id(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        if !product.in_stock {
            ctx.output.warn(&format!("{} is out of stock", product.name));
        }
        if *quantity <= 0 {
            if cart.get_item(id).is_some() {
                cart.update_quantity(id, *quantity)?;
            }
            continue;
        }
        cart.add_product(product, *quantity)
            .with_context(|| format!("Failed to add {} x {}", quantity, id))?;
    }
    if let Some(code) = &args.coupon {
        let discount = cart.apply_coupon(code, &promotions)?;
        ctx.output.debug(&format!("applied {} ({})", discount.code, discount.value.describe()));
    }
    metrics.finish_step("build_cart");

    let pricing = metrics.time("price", || cart.calculate_pricing(&policy))?;
    metrics.record_count("lines", cart.unique_item_count() as u64);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": cart.items,
            "coupon": cart.coupon,
            "pricing": pricing,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({} items)", pricing.item_count));
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
    } else {
        ctx.output.table_row(&["Product", "Qty", "Price", "Total"], &WIDTHS);
        for item in &cart.items {
            ctx.output.table_row(
                &[
                    &item.product_name,
                    &item.quantity.to_string(),
                    &item.unit_price.display(),
                    &item.total_price.display(),
                ],
                &WIDTHS,
            );
        }
    }

    ctx.output.header("Order Summary");
    ctx.output.kv("Subtotal", &pricing.subtotal.display());
    ctx.output.kv("Shipping", &format_shipping(&pricing.shipping_total));
    ctx.output.kv("Tax", &pricing.tax_total.display());
    if let Some(coupon) = &cart.coupon {
        ctx.output.kv(
            &format!("Discount ({})", coupon.code),
            &format!("-{}", pricing.discount_total.display()),
        );
    }
    ctx.output.kv("Total", &pricing.grand_total.display());

    ctx.output.line("");
    match pricing.free_shipping_remaining {
        None => ctx.output.success("Your order qualifies for free shipping!"),
        Some(remaining) => ctx.output.info(&format!(
            "Add {} more to get free shipping",
            remaining.display()
        )),
    }

    Ok(())
}
