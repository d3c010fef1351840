//! Filter selection and predicate.

use crate::catalog::{FacetAxis, Product};
use crate::price::PriceRange;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The active facet selection of a shop view.
///
/// Unset or empty dimensions impose no constraint. An empty color set means
/// "any color", never "no color".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    /// Category name (exact match).
    pub category: Option<String>,
    /// Inclusive price range.
    pub price_range: Option<PriceRange>,
    pub colors: BTreeSet<String>,
    pub materials: BTreeSet<String>,
}

impl FilterSelection {
    /// Create an unconstrained selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the price range.
    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    /// Add an option on an axis.
    pub fn with_option(mut self, axis: FacetAxis, value: impl Into<String>) -> Self {
        self.selected_mut(axis).insert(value.into());
        self
    }

    /// Selected options on an axis.
    pub fn selected(&self, axis: FacetAxis) -> &BTreeSet<String> {
        match axis {
            FacetAxis::Color => &self.colors,
            FacetAxis::Material => &self.materials,
        }
    }

    fn selected_mut(&mut self, axis: FacetAxis) -> &mut BTreeSet<String> {
        match axis {
            FacetAxis::Color => &mut self.colors,
            FacetAxis::Material => &mut self.materials,
        }
    }

    /// Flip an option on an axis. Returns whether it is now selected.
    pub fn toggle(&mut self, axis: FacetAxis, value: &str) -> bool {
        let selected = self.selected_mut(axis);
        if selected.remove(value) {
            false
        } else {
            selected.insert(value.to_string());
            true
        }
    }

    /// Check if nothing is constrained.
    pub fn is_unconstrained(&self) -> bool {
        self.category.is_none()
            && self.price_range.is_none()
            && self.colors.is_empty()
            && self.materials.is_empty()
    }

    /// Drop every constraint.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Check whether a product satisfies every dimension of a selection.
pub fn matches(product: &Product, selection: &FilterSelection) -> bool {
    matches_category(product, selection)
        && matches_price(product, selection)
        && matches_axis(product, selection, FacetAxis::Color)
        && matches_axis(product, selection, FacetAxis::Material)
}

fn matches_category(product: &Product, selection: &FilterSelection) -> bool {
    selection
        .category
        .as_deref()
        .map_or(true, |category| product.has_category(category))
}

// Fail-open: an unparseable price ("price on request") stays visible.
fn matches_price(product: &Product, selection: &FilterSelection) -> bool {
    match (selection.price_range, product.parsed_price()) {
        (Some(range), Some(price)) => range.contains(price),
        _ => true,
    }
}

fn matches_axis(product: &Product, selection: &FilterSelection, axis: FacetAxis) -> bool {
    let selected = selection.selected(axis);
    selected.is_empty() || product.axis_options(axis).any(|option| selected.contains(option))
}

/// Keep the products matching a selection, in their original order.
pub fn filter_products<'a, I>(products: I, selection: &FilterSelection) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .filter(|product| matches(product, selection))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductAttribute;
    use crate::price::Price;

    fn ring(id: u64, price: &str, metal: &str) -> Product {
        Product::new(id, format!("Ring {}", id))
            .with_price(price)
            .with_category("Rings")
            .with_attribute(ProductAttribute::new("Metal", [metal]))
    }

    #[test]
    fn test_unconstrained_matches_everything() {
        let product = Product::new(1, "Bare");
        assert!(matches(&product, &FilterSelection::new()));
    }

    #[test]
    fn test_category_exact_match() {
        let product = ring(1, "10", "Gold");
        assert!(matches(&product, &FilterSelection::new().with_category("Rings")));
        assert!(!matches(&product, &FilterSelection::new().with_category("rings")));
        assert!(!matches(&product, &FilterSelection::new().with_category("Necklaces")));
    }

    #[test]
    fn test_price_range_inclusive_and_fail_open() {
        let range = PriceRange::new(Price::from_cents(1000), Price::from_cents(5000)).unwrap();
        let selection = FilterSelection::new().with_price_range(range);

        assert!(matches(&ring(1, "10.00", "Gold"), &selection));
        assert!(matches(&ring(2, "50.00", "Gold"), &selection));
        assert!(!matches(&ring(3, "50.01", "Gold"), &selection));
        assert!(matches(&ring(4, "call for price", "Gold"), &selection));
        assert!(matches(&ring(5, "", "Gold"), &selection));
    }

    #[test]
    fn test_price_range_compares_sub_cent_prices() {
        let range = PriceRange::from_decimal(0.0, 75.0).unwrap();
        let selection = FilterSelection::new().with_price_range(range);
        let products = vec![
            ring(1, "75.004", "Gold"),
            ring(2, "75.000", "Gold"),
            ring(3, "74.995", "Gold"),
        ];

        let ids: Vec<u64> = filter_products(&products, &selection).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_axis_intersection() {
        let selection = FilterSelection::new()
            .with_option(FacetAxis::Material, "Gold")
            .with_option(FacetAxis::Material, "Silver");

        assert!(matches(&ring(1, "1", "Gold"), &selection));
        assert!(matches(&ring(2, "1", "Silver"), &selection));
        assert!(!matches(&ring(3, "1", "Platinum"), &selection));
    }

    #[test]
    fn test_axis_absent_product_excluded_when_constrained() {
        let selection = FilterSelection::new().with_option(FacetAxis::Color, "Rose");
        assert!(!matches(&Product::new(1, "No attributes"), &selection));
        assert!(matches(&Product::new(1, "No attributes"), &FilterSelection::new()));
    }

    #[test]
    fn test_dimensions_are_conjunctive() {
        let selection = FilterSelection::new()
            .with_category("Rings")
            .with_option(FacetAxis::Material, "Gold");
        let necklace = Product::new(9, "Gold chain")
            .with_category("Necklaces")
            .with_attribute(ProductAttribute::new("Metal", ["Gold"]));

        assert!(matches(&ring(1, "1", "Gold"), &selection));
        assert!(!matches(&necklace, &selection));
    }

    #[test]
    fn test_toggle() {
        let mut selection = FilterSelection::new();
        assert!(selection.toggle(FacetAxis::Color, "Rose"));
        assert!(selection.colors.contains("Rose"));
        assert!(!selection.toggle(FacetAxis::Color, "Rose"));
        assert!(selection.is_unconstrained());
    }

    #[test]
    fn test_filter_preserves_order() {
        let products = vec![
            ring(3, "10", "Gold"),
            ring(1, "10", "Silver"),
            ring(2, "10", "Gold"),
        ];
        let selection = FilterSelection::new().with_option(FacetAxis::Material, "Gold");
        let ids: Vec<u64> = filter_products(&products, &selection)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![3, 2]);
    }
}
