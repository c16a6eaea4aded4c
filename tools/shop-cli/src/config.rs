//! CLI configuration.

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use shop_commerce::cart::{Discount, PricingPolicy, StaticPromotions};
use shop_commerce::money::{Currency, Money};
use shop_commerce::search::SortKey;
use shop_observability::{LogFormat, LogLevel};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["shop.toml", ".shop.toml", "shop.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShopConfig {
    /// Catalog source and browsing defaults.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Cart pricing rules.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Coupon codes accepted at the cart.
    #[serde(default = "default_promotions")]
    pub promotions: Vec<PromotionConfig>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            pricing: PricingConfig::default(),
            logging: LoggingConfig::default(),
            promotions: default_promotions(),
        }
    }
}

impl ShopConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(&content, path.ends_with(".json"))
            .with_context(|| format!("Failed to parse config file: {}", path))
    }

    /// Parse config text, TOML unless `json` is set.
    pub fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Configured default sort key.
    pub fn sort_key(&self) -> Result<SortKey> {
        Ok(self.catalog.default_sort.parse()?)
    }

    /// Pricing rules from `[pricing]`.
    pub fn pricing_policy(&self) -> Result<PricingPolicy> {
        if !self.pricing.tax_rate.is_finite() {
            bail!("pricing.tax_rate must be a finite number");
        }
        Ok(PricingPolicy {
            free_shipping_threshold: dollars(
                "pricing.free_shipping_threshold",
                self.pricing.free_shipping_threshold,
            )?,
            flat_shipping: dollars("pricing.flat_shipping", self.pricing.flat_shipping)?,
            tax_rate: self.pricing.tax_rate,
        })
    }

    /// Promotions table built from `[[promotions]]`.
    pub fn promotions(&self) -> Result<StaticPromotions> {
        self.promotions.iter().map(PromotionConfig::to_discount).collect()
    }

    pub fn log_level(&self) -> Result<LogLevel> {
        Ok(self.logging.level.parse()?)
    }

    pub fn log_format(&self) -> Result<LogFormat> {
        Ok(self.logging.format.parse()?)
    }

    /// Check the config, returning `(errors, warnings)`.
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if let Err(e) = self.sort_key() {
            errors.push(format!("catalog.default_sort: {}", e));
        }
        if self.catalog.related_limit == 0 {
            warnings.push("catalog.related_limit is 0; no related products will show".to_string());
        }

        if let Err(e) = self.pricing_policy() {
            errors.push(e.to_string());
        }
        if self.pricing.free_shipping_threshold < 0.0 {
            errors.push("pricing.free_shipping_threshold must not be negative".to_string());
        }
        if self.pricing.flat_shipping < 0.0 {
            errors.push("pricing.flat_shipping must not be negative".to_string());
        }
        if !(0.0..=1.0).contains(&self.pricing.tax_rate) {
            errors.push("pricing.tax_rate must be between 0 and 1".to_string());
        }

        if let Err(e) = self.log_level() {
            errors.push(format!("logging.level: {}", e));
        }
        if let Err(e) = self.log_format() {
            errors.push(format!("logging.format: {}", e));
        }

        for (i, promotion) in self.promotions.iter().enumerate() {
            if promotion.code.trim().is_empty() {
                errors.push(format!("promotions[{}].code is required", i));
            }
            match (promotion.percent, promotion.amount) {
                (Some(_), Some(_)) | (None, None) => errors.push(format!(
                    "promotions[{}] needs exactly one of percent or amount",
                    i
                )),
                (Some(percent), None) if !(0.0..=100.0).contains(&percent) => {
                    errors.push(format!("promotions[{}].percent must be 0-100", i))
                }
                (None, Some(amount)) if amount < 0.0 => {
                    errors.push(format!("promotions[{}].amount must not be negative", i))
                }
                (None, Some(amount)) if Money::try_from_decimal(amount, Currency::USD).is_none() => {
                    errors.push(format!("promotions[{}].amount must be whole cents", i))
                }
                _ => {}
            }
        }

        let mut codes: Vec<String> = self
            .promotions
            .iter()
            .map(|p| p.code.trim().to_ascii_uppercase())
            .collect();
        codes.sort();
        codes.dedup();
        if codes.len() < self.promotions.len() {
            warnings.push("promotions contain duplicate codes; the last one wins".to_string());
        }

        (errors, warnings)
    }
}

/// Catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Catalog JSON file. The built-in sample catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Sort key used when none is given (default: name).
    #[serde(default = "default_sort")]
    pub default_sort: String,

    /// Related products shown on a product page (default: 4).
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,
}

fn default_sort() -> String {
    SortKey::default().as_str().to_string()
}

fn default_related_limit() -> usize {
    shop_commerce::catalog::DEFAULT_RELATED_LIMIT
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            default_sort: default_sort(),
            related_limit: default_related_limit(),
        }
    }
}

/// Pricing settings, in dollars.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingConfig {
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: f64,

    #[serde(default = "default_flat_shipping")]
    pub flat_shipping: f64,

    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
}

fn default_free_shipping_threshold() -> f64 {
    100.0
}

fn default_flat_shipping() -> f64 {
    10.0
}

fn default_tax_rate() -> f64 {
    0.08
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: default_free_shipping_threshold(),
            flat_shipping: default_flat_shipping(),
            tax_rate: default_tax_rate(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Minimum level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format (human or json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// One coupon code. Exactly one of `percent` and `amount` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromotionConfig {
    pub code: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl PromotionConfig {
    fn to_discount(&self) -> Result<Discount> {
        let name = if self.name.is_empty() {
            self.code.clone()
        } else {
            self.name.clone()
        };
        match (self.percent, self.amount) {
            (Some(percent), None) => Ok(Discount::percentage(&self.code, name, percent)),
            (None, Some(amount)) => Ok(Discount::fixed_amount(
                &self.code,
                name,
                dollars(&format!("promotion '{}' amount", self.code), amount)?,
            )),
            _ => Err(anyhow!(
                "Promotion '{}' needs exactly one of percent or amount",
                self.code
            )),
        }
    }
}

/// A configured dollar amount, which must be finite whole cents.
fn dollars(field: &str, amount: f64) -> Result<Money> {
    Money::try_from_decimal(amount, Currency::USD)
        .ok_or_else(|| anyhow!("{} must be a whole number of cents, got {}", field, amount))
}

fn default_promotions() -> Vec<PromotionConfig> {
    StaticPromotions::storefront_defaults()
        .discounts()
        .iter()
        .map(|discount| {
            let (percent, amount) = match &discount.value {
                shop_commerce::cart::DiscountValue::Percentage(p) => (Some(*p), None),
                shop_commerce::cart::DiscountValue::Fixed(m) => (None, Some(m.to_decimal())),
            };
            PromotionConfig {
                code: discount.code.clone(),
                name: discount.name.clone(),
                percent,
                amount,
            }
        })
        .collect()
}

/// Generate a default shop.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration

[catalog]
# path = "catalog.json"   # built-in sample catalog when unset
default_sort = "name"     # name | price-low | price-high | rating | newest
related_limit = 4

[pricing]
free_shipping_threshold = 100.0
flat_shipping = 10.0
tax_rate = 0.08

[logging]
level = "warn"            # RUST_LOG overrides this
format = "human"          # human | json

[[promotions]]
code = "SAVE10"
name = "10% off your order"
percent = 10.0

[[promotions]]
code = "WELCOME20"
name = "$20 off your first order"
amount = 20.0
"#
    .to_string()
}
