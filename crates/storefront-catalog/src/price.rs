//! Price type for catalog amounts.
//!
//! The catalog API ships prices as decimal strings (`"1299.00"`, `""`,
//! `"call us"`). They are kept raw on [`Product`](crate::catalog::Product) and
//! parsed on demand. A parsed price keeps the full precision of the string:
//! `"75.004"` is above `75` and `"19.991"` sorts before `"19.994"`. Rounding to
//! cents only happens when a price is displayed.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A catalog price amount.
///
/// Totally ordered through [`f64::total_cmp`], so it can be used directly as a
/// sort key.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    amount: f64,
}

impl Price {
    /// Zero price.
    pub const ZERO: Price = Price { amount: 0.0 };

    /// Create a price from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self::from_decimal(cents as f64 / 100.0)
    }

    /// Create a price from a decimal amount, without rounding.
    ///
    /// ```
    /// use storefront_catalog::Price;
    /// assert!(Price::from_decimal(75.004) > Price::from_decimal(75.0));
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        // -0.0 becomes 0.0 so equal amounts share one bit pattern.
        Self { amount: amount + 0.0 }
    }

    /// Parse a decimal price string.
    ///
    /// Returns `None` for empty input, non-numeric text, negative values and
    /// non-finite values. Never panics.
    ///
    /// ```
    /// use storefront_catalog::Price;
    /// assert_eq!(Price::parse(" 12.5 "), Some(Price::from_cents(1250)));
    /// assert_eq!(Price::parse("abc"), None);
    /// assert_eq!(Price::parse("-3"), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let value: f64 = trimmed.parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }

        Some(Self::from_decimal(value))
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0.0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount
    }

    /// Format with the default `$` symbol (e.g., "$49.99").
    pub fn display(&self) -> String {
        self.display_with("$")
    }

    /// Format with an explicit currency symbol.
    pub fn display_with(&self, symbol: &str) -> String {
        if self.amount < 0.0 {
            format!("-{}{:.2}", symbol, -self.amount)
        } else {
            format!("{}{}", symbol, self)
        }
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.amount.total_cmp(&other.amount)
    }
}

impl Hash for Price {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.amount.to_bits().hash(state);
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.amount)
    }
}

/// An inclusive price range used by filter selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower bound (inclusive).
    pub lo: Price,
    /// Upper bound (inclusive).
    pub hi: Price,
}

impl PriceRange {
    /// Create a range, rejecting `lo > hi`.
    pub fn new(lo: Price, hi: Price) -> Result<Self, CatalogError> {
        if lo > hi {
            return Err(CatalogError::InvalidPriceRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// Create a range from decimal amounts.
    pub fn from_decimal(lo: f64, hi: f64) -> Result<Self, CatalogError> {
        Self::new(Price::from_decimal(lo), Price::from_decimal(hi))
    }

    /// Check whether a price falls inside the range.
    pub fn contains(&self, price: Price) -> bool {
        self.lo <= price && price <= self.hi
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.lo, self.hi)
    }
}

/// Observed price bounds across a product collection.
///
/// `[0, 0]` when no product carries a parseable price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PriceBounds {
    pub min: Price,
    pub max: Price,
}

impl PriceBounds {
    /// Fold a sequence of prices into bounds.
    pub fn from_prices(prices: impl IntoIterator<Item = Price>) -> Self {
        prices
            .into_iter()
            .fold(None, |acc: Option<PriceBounds>, price| {
                Some(match acc {
                    None => PriceBounds { min: price, max: price },
                    Some(bounds) => PriceBounds {
                        min: bounds.min.min(price),
                        max: bounds.max.max(price),
                    },
                })
            })
            .unwrap_or_default()
    }

    /// The bounds as a selectable range (the "full price slider" default).
    pub fn as_range(&self) -> PriceRange {
        PriceRange {
            lo: self.min,
            hi: self.max,
        }
    }
}
