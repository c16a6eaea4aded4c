//! Shop CLI - Query the storefront catalog and price carts.
//!
//! Commands:
//! - `shop products` - List products matching filters
//! - `shop product` - Show one product and related products
//! - `shop facets` - Show category and brand counts
//! - `shop cart` - Price a cart
//! - `shop config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shop_observability::{LogLevel, MetricsCollector};

use commands::{CartArgs, ConfigArgs, FacetsArgs, ProductArgs, ProductsArgs};

/// Shop CLI - Browse the storefront catalog and price carts
#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Catalog JSON file (overrides catalog.path)
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Print step timings after the command
    #[arg(long, global = true)]
    stats: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products matching filters
    Products(ProductsArgs),

    /// Show a product and its related products
    Product(ProductArgs),

    /// Show category and brand counts
    Facets(FacetsArgs),

    /// Price a cart
    Cart(CartArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Products(_) => "products",
            Commands::Product(_) => "product",
            Commands::Facets(_) => "facets",
            Commands::Cart(_) => "cart",
            Commands::Config(_) => "config",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, cli.catalog.clone(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    init_logging(&ctx, cli.verbose);

    let mut metrics = MetricsCollector::new(cli.command.name());

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx, &mut metrics),
        Commands::Product(args) => commands::product::run(args, &ctx, &mut metrics),
        Commands::Facets(args) => commands::facets::run(args, &ctx, &mut metrics),
        Commands::Cart(args) => commands::cart::run(args, &ctx, &mut metrics),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if cli.stats {
        let session = metrics.finalize();
        if ctx.output.is_json() {
            eprintln!("{}", session.to_json());
        } else {
            eprintln!("{}", session.to_summary());
        }
    }

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Install the subscriber from `[logging]`; `--verbose` raises the level to
/// debug. Bad settings fall back to defaults so `shop config validate` can
/// still report them.
fn init_logging(ctx: &context::Context, verbose: bool) {
    let level = ctx.config.log_level().unwrap_or_default();
    let level = if verbose { level.min(LogLevel::Debug) } else { level };
    let format = ctx.config.log_format().unwrap_or_default();
    shop_observability::init(level, format);
    tracing::debug!(config_path = ?ctx.config_path, "context loaded");
}
