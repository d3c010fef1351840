//! Sort strategies for product listings.

use crate::catalog::Product;
use crate::error::CatalogError;
use crate::price::Price;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort options for the shop view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortKey {
    /// Source order, as curated upstream.
    #[default]
    #[serde(rename = "featured")]
    Featured,
    /// Price, low to high. Unparseable prices rank as zero.
    #[serde(rename = "price-asc", alias = "price-ascending")]
    PriceAscending,
    /// Price, high to low. Unparseable prices rank last.
    #[serde(rename = "price-desc", alias = "price-descending")]
    PriceDescending,
    /// Highest id first.
    #[serde(rename = "newest")]
    Newest,
}

impl SortKey {
    /// Every sort key, in menu order.
    pub const ALL: [SortKey; 4] = [
        SortKey::Featured,
        SortKey::PriceAscending,
        SortKey::PriceDescending,
        SortKey::Newest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceAscending => "price-asc",
            SortKey::PriceDescending => "price-desc",
            SortKey::Newest => "newest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::PriceAscending => "Price: Low to High",
            SortKey::PriceDescending => "Price: High to Low",
            SortKey::Newest => "Newest",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "featured" => Ok(SortKey::Featured),
            "price-asc" | "price-ascending" => Ok(SortKey::PriceAscending),
            "price-desc" | "price-descending" => Ok(SortKey::PriceDescending),
            "newest" => Ok(SortKey::Newest),
            _ => Err(CatalogError::UnknownSortKey(s.to_string())),
        }
    }
}

/// Order products by a sort key.
///
/// Returns a new vector and leaves the input untouched. The sort is stable, so
/// products that compare equal keep their relative source order and the
/// result is repeatable for identical input.
pub fn sort_products<'a, I>(products: I, key: SortKey) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut sorted: Vec<&Product> = products.into_iter().collect();

    match key {
        SortKey::Featured => {}
        SortKey::PriceAscending => {
            sorted.sort_by_cached_key(|p| p.parsed_price().unwrap_or(Price::ZERO));
        }
        SortKey::PriceDescending => {
            sorted.sort_by_cached_key(|p| DescendingPrice(p.parsed_price()));
        }
        SortKey::Newest => sorted.sort_by(|a, b| b.id.cmp(&a.id)),
    }

    sorted
}

/// Sort key placing higher prices first and missing prices after all of them.
#[derive(PartialEq, Eq)]
struct DescendingPrice(Option<Price>);

impl Ord for DescendingPrice {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for DescendingPrice {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<Product> {
        vec![
            Product::new(2, "b").with_price("50.00"),
            Product::new(5, "e").with_price("abc"),
            Product::new(1, "a").with_price("100.00"),
            Product::new(4, "d").with_price("0"),
            Product::new(3, "c").with_price(""),
        ]
    }

    fn ids(sorted: &[&Product]) -> Vec<u64> {
        sorted.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_featured_keeps_source_order() {
        let products = products();
        assert_eq!(ids(&sort_products(&products, SortKey::Featured)), vec![2, 5, 1, 4, 3]);
    }

    #[test]
    fn test_price_ascending_treats_unparseable_as_zero() {
        let products = products();
        // 5 ("abc"), 4 ("0") and 3 ("") all rank as zero and keep source order.
        assert_eq!(
            ids(&sort_products(&products, SortKey::PriceAscending)),
            vec![5, 4, 3, 2, 1]
        );
    }

    #[test]
    fn test_price_descending_puts_unparseable_last() {
        let products = products();
        assert_eq!(
            ids(&sort_products(&products, SortKey::PriceDescending)),
            vec![1, 2, 4, 5, 3]
        );
    }

    #[test]
    fn test_price_sort_orders_sub_cent_prices() {
        let products = vec![
            Product::new(1, "a").with_price("19.994"),
            Product::new(2, "b").with_price("19.991"),
            Product::new(3, "c").with_price("19.99"),
        ];
        assert_eq!(ids(&sort_products(&products, SortKey::PriceAscending)), vec![3, 2, 1]);
        assert_eq!(ids(&sort_products(&products, SortKey::PriceDescending)), vec![1, 2, 3]);
    }

    #[test]
    fn test_newest_by_id_descending() {
        let products = products();
        assert_eq!(ids(&sort_products(&products, SortKey::Newest)), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_input_is_untouched() {
        let products = products();
        let before = products.clone();
        let _ = sort_products(&products, SortKey::PriceDescending);
        assert_eq!(products, before);
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("price-asc".parse::<SortKey>().unwrap(), SortKey::PriceAscending);
        assert_eq!("Price-Descending".parse::<SortKey>().unwrap(), SortKey::PriceDescending);
        assert_eq!("featured".parse::<SortKey>().unwrap(), SortKey::Featured);
        assert!(matches!(
            "relevance".parse::<SortKey>(),
            Err(CatalogError::UnknownSortKey(_))
        ));
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&SortKey::PriceAscending).unwrap(), "\"price-asc\"");
        let key: SortKey = serde_json::from_str("\"price-descending\"").unwrap();
        assert_eq!(key, SortKey::PriceDescending);
    }
}
