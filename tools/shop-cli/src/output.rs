//! Output formatting for the CLI.

use console::{pad_str, style, Alignment};
use shop_commerce::catalog::{Product, StockStatus};
use shop_commerce::money::Money;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a plain line.
    pub fn line(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{}", msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row, fitting each column to its width.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| fit(col, *width))
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Coloured stock label.
pub fn stock_badge(status: StockStatus) -> String {
    match status {
        StockStatus::InStock => style("In stock").green().to_string(),
        StockStatus::LowStock => style("Low stock").yellow().to_string(),
        StockStatus::OutOfStock => style("Out of stock").red().to_string(),
    }
}

/// Price with the markdown shown when the product is on sale.
pub fn format_price(product: &Product) -> String {
    match (product.original_price, product.discount_percentage()) {
        (Some(original), Some(percent)) => format!(
            "{} {} {}",
            product.price.display(),
            style(original.display()).dim().strikethrough(),
            style(format!("-{}%", percent)).green()
        ),
        _ => product.price.display(),
    }
}

/// Rating to one decimal with a star.
pub fn format_rating(rating: f64) -> String {
    format!("★ {:.1}", rating)
}

/// Money for a summary line, with "Free" for zero shipping.
pub fn format_shipping(shipping: &Money) -> String {
    if shipping.is_zero() {
        style("Free").green().to_string()
    } else {
        shipping.display()
    }
}

/// Pad or cut `text` to `width` display columns, ignoring ANSI styling.
fn fit(text: &str, width: usize) -> String {
    pad_str(text, width, Alignment::Left, Some("…")).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit() {
        assert_eq!(fit("Almonds", 10), "Almonds   ");
        assert_eq!(console::measure_text_width(&fit("Italian Chicken Meatballs", 10)), 10);
    }

    #[test]
    fn test_fit_ignores_ansi_codes() {
        let styled = style("ok").green().force_styling(true).to_string();
        assert_eq!(console::measure_text_width(&fit(&styled, 5)), 5);
    }

    #[test]
    fn test_format_price_plain_when_not_on_sale() {
        let product = Product::new("3", "Almonds", "snacks", Money::usd(23.85));
        assert_eq!(format_price(&product), "$23.85");
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(4.56), "★ 4.6");
        assert_eq!(format_rating(4.0), "★ 4.0");
    }
}
