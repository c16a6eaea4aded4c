//! Sort keys for the visible product list.

use crate::catalog::Product;
use crate::search::compare_names;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the visible products are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Name A-Z, locale-aware.
    #[default]
    Name,
    /// Price, low to high.
    PriceLow,
    /// Price, high to low.
    PriceHigh,
    /// Highest rated first.
    Rating,
    /// Reverse of the filtered order. Products carry no timestamp, so this
    /// stands in for a recency sort.
    Newest,
}

impl SortKey {
    /// All sort keys, in the order a sort menu lists them.
    pub const ALL: [SortKey; 5] = [
        SortKey::Name,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Rating,
        SortKey::Newest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
            SortKey::Newest => "newest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Name => "Name: A-Z",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Rating => "Highest Rated",
            SortKey::Newest => "Newest",
        }
    }

    /// Order `indices` (positions in `products`) in place.
    ///
    /// The sort is stable: products with equal keys keep their relative
    /// order from `indices`.
    pub fn apply(&self, products: &[Product], indices: &mut Vec<usize>) {
        match self {
            SortKey::Name => {
                indices.sort_by(|&a, &b| compare_names(&products[a].name, &products[b].name))
            }
            SortKey::PriceLow => indices.sort_by(|&a, &b| {
                products[a]
                    .price
                    .amount_cents
                    .cmp(&products[b].price.amount_cents)
            }),
            SortKey::PriceHigh => indices.sort_by(|&a, &b| {
                products[b]
                    .price
                    .amount_cents
                    .cmp(&products[a].price.amount_cents)
            }),
            SortKey::Rating => {
                indices.sort_by(|&a, &b| products[b].rating.total_cmp(&products[a].rating))
            }
            SortKey::Newest => indices.reverse(),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised sort key string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key '{0}' (expected one of: name, price-low, price-high, rating, newest)")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParseSortKeyError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn products() -> Vec<Product> {
        vec![
            Product::new("a", "Cherry", "fruit", Money::usd(3.0)).with_rating(4.0),
            Product::new("b", "apple", "fruit", Money::usd(1.0)).with_rating(5.0),
            Product::new("c", "Banana", "fruit", Money::usd(3.0)).with_rating(4.0),
        ]
    }

    fn sorted(key: SortKey) -> Vec<String> {
        let products = products();
        let mut indices: Vec<usize> = (0..products.len()).collect();
        key.apply(&products, &mut indices);
        indices.into_iter().map(|i| products[i].id.to_string()).collect()
    }

    #[test]
    fn test_name_sort() {
        assert_eq!(sorted(SortKey::Name), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_price_sorts_are_stable() {
        assert_eq!(sorted(SortKey::PriceLow), vec!["b", "a", "c"]);
        assert_eq!(sorted(SortKey::PriceHigh), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_rating_sort_is_stable() {
        assert_eq!(sorted(SortKey::Rating), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_newest_reverses() {
        assert_eq!(sorted(SortKey::Newest), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_parse_round_trip_names() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
        assert!("relevance".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_default_is_name() {
        assert_eq!(SortKey::default(), SortKey::Name);
    }
}
