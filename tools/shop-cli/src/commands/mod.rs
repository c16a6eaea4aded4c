//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod facets;
pub mod product;
pub mod products;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use shop_commerce::ids::ProductId;
use shop_commerce::search::SortKey;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Case-insensitive text matched against name, description, brand and tags.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact category slug.
    #[arg(long)]
    pub category: Option<String>,

    /// Exact brand name.
    #[arg(short, long)]
    pub brand: Option<String>,

    /// Minimum price, inclusive.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum price, inclusive.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Minimum rating, inclusive.
    #[arg(short, long)]
    pub rating: Option<f64>,

    /// Only products whose in-stock flag equals this value.
    #[arg(long)]
    pub in_stock: Option<bool>,

    /// Sort key (name, price-low, price-high, rating, newest).
    #[arg(long)]
    pub sort: Option<SortKey>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: String,

    /// Number of related products to show.
    #[arg(long)]
    pub related: Option<usize>,
}

/// Arguments for the facets command.
#[derive(Args)]
pub struct FacetsArgs {
    /// Mark values selected by this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Mark values selected by this brand.
    #[arg(short, long)]
    pub brand: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    /// Line to add, as `<product-id>:<quantity>` (quantity defaults to 1).
    #[arg(short, long = "item", value_name = "ID[:QTY]", required = true, value_parser = parse_item)]
    pub items: Vec<(ProductId, i64)>,

    /// Coupon code to apply.
    #[arg(long)]
    pub coupon: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Parse a `--item` value.
fn parse_item(value: &str) -> Result<(ProductId, i64)> {
    let (id, quantity) = match value.rsplit_once(':') {
        Some((id, quantity)) => {
            let quantity = quantity
                .trim()
                .parse::<i64>()
                .map_err(|_| anyhow!("invalid quantity '{}' in '{}'", quantity, value))?;
            (id, quantity)
        }
        None => (value, 1),
    };

    let id = id.trim();
    if id.is_empty() {
        return Err(anyhow!("missing product id in '{}'", value));
    }
    Ok((ProductId::new(id), quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        assert_eq!(parse_item("4:2").unwrap(), (ProductId::new("4"), 2));
        assert_eq!(parse_item("4").unwrap(), (ProductId::new("4"), 1));
        assert_eq!(parse_item("sku:9:3").unwrap(), (ProductId::new("sku:9"), 3));
        assert!(parse_item("4:two").is_err());
        assert!(parse_item(":2").is_err());
    }
}
