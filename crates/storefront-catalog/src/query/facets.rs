//! Facet extraction.

use crate::catalog::{FacetAxis, Product};
use crate::price::PriceBounds;
use crate::query::FilterSelection;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Selectable filter values derived from a product collection.
///
/// Each map goes from a distinct value to the number of products carrying it.
/// `BTreeMap` keeps option lists alphabetical regardless of source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSet {
    pub categories: BTreeMap<String, usize>,
    pub materials: BTreeMap<String, usize>,
    pub colors: BTreeMap<String, usize>,
    pub price_bounds: PriceBounds,
}

impl FacetSet {
    /// Option counts for an attribute axis.
    pub fn axis(&self, axis: FacetAxis) -> &BTreeMap<String, usize> {
        match axis {
            FacetAxis::Color => &self.colors,
            FacetAxis::Material => &self.materials,
        }
    }

    /// Category names in alphabetical order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Category options annotated with the current selection.
    pub fn category_values(&self, selection: &FilterSelection) -> Vec<FacetValue> {
        self.categories
            .iter()
            .map(|(value, count)| FacetValue {
                value: value.clone(),
                count: *count,
                selected: selection.category.as_deref() == Some(value.as_str()),
            })
            .collect()
    }

    /// Axis options annotated with the current selection.
    pub fn axis_values(&self, axis: FacetAxis, selection: &FilterSelection) -> Vec<FacetValue> {
        let selected = selection.selected(axis);
        self.axis(axis)
            .iter()
            .map(|(value, count)| FacetValue {
                value: value.clone(),
                count: *count,
                selected: selected.contains(value),
            })
            .collect()
    }

    /// Check if no facet has any option.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.materials.is_empty() && self.colors.is_empty()
    }
}

/// A single facet option with its product count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacetValue {
    pub value: String,
    pub count: usize,
    pub selected: bool,
}

/// Derive the facet universe from a product collection.
///
/// Values match exactly (`Rings` and `rings` are distinct options); empty
/// strings are skipped. A product counts once per value even if it lists the
/// value twice. Price bounds cover only products whose price parses.
pub fn extract_facets(products: &[Product]) -> FacetSet {
    let mut facets = FacetSet::default();

    for product in products {
        tally(&mut facets.categories, product.categories.iter().map(String::as_str));
        tally(&mut facets.materials, product.axis_options(FacetAxis::Material));
        tally(&mut facets.colors, product.axis_options(FacetAxis::Color));
    }

    facets.price_bounds = PriceBounds::from_prices(products.iter().filter_map(Product::parsed_price));
    facets
}

fn tally<'a>(counts: &mut BTreeMap<String, usize>, values: impl Iterator<Item = &'a str>) {
    let distinct: BTreeSet<&str> = values.filter(|v| !v.is_empty()).collect();
    for value in distinct {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
}
