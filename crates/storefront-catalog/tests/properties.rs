//! Invariants of the filter/sort/paginate pipeline, checked over a spread of
//! generated catalogs.

use std::collections::BTreeSet;

use storefront_catalog::prelude::*;

const CATEGORIES: [&str; 4] = ["Rings", "Necklaces", "Earrings", "Bracelets"];
const METALS: [&str; 4] = ["Gold", "Silver", "Platinum", "Rose Gold"];
const COLORS: [&str; 3] = ["White", "Yellow", "Pink"];
const PRICES: [&str; 6] = ["120.00", "abc", "75", "", "1999.99", "0.00"];

/// Deterministic catalog of `size` products with ids in shuffled order.
fn catalog(size: u64, seed: u64) -> Vec<Product> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };

    let mut ids: Vec<u64> = (1..=size).collect();
    for i in (1..ids.len()).rev() {
        ids.swap(i, next() % (i + 1));
    }

    ids.into_iter()
        .map(|id| {
            let mut product = Product::new(id, format!("Piece {}", id))
                .with_price(PRICES[next() % PRICES.len()])
                .with_category(CATEGORIES[next() % CATEGORIES.len()]);
            if next() % 3 != 0 {
                product = product.with_attribute(ProductAttribute::new(
                    "pa_metal",
                    [METALS[next() % METALS.len()]],
                ));
            }
            if next() % 2 == 0 {
                product = product.with_attribute(ProductAttribute::new(
                    "Color",
                    [COLORS[next() % COLORS.len()], COLORS[next() % COLORS.len()]],
                ));
            }
            product
        })
        .collect()
}

fn catalogs() -> Vec<Vec<Product>> {
    [0, 1, 2, 7, 12, 13, 25, 40]
        .iter()
        .enumerate()
        .map(|(seed, size)| catalog(*size, seed as u64))
        .collect()
}

fn selections() -> Vec<FilterSelection> {
    vec![
        FilterSelection::new(),
        FilterSelection::new().with_category("Rings"),
        FilterSelection::new().with_price_range(PriceRange::from_decimal(0.0, 100.0).unwrap()),
        FilterSelection::new().with_option(FacetAxis::Material, "Gold"),
        FilterSelection::new()
            .with_option(FacetAxis::Color, "Pink")
            .with_option(FacetAxis::Material, "Silver")
            .with_category("Necklaces"),
    ]
}

fn ids(products: &[&Product]) -> Vec<u64> {
    products.iter().map(|p| p.id).collect()
}

#[test]
fn filtered_is_an_order_preserving_subsequence() {
    for products in catalogs() {
        for selection in selections() {
            let filtered = filter_products(&products, &selection);
            let mut source = products.iter();
            for kept in &filtered {
                assert!(
                    source.any(|p| std::ptr::eq(p, *kept)),
                    "product {} out of order or duplicated",
                    kept.id
                );
            }
        }
    }
}

#[test]
fn newest_is_strictly_descending_and_idempotent() {
    for products in catalogs() {
        let sorted = sort_products(&products, SortKey::Newest);
        assert_eq!(sorted.len(), products.len());
        assert!(sorted.windows(2).all(|w| w[0].id > w[1].id));

        let again = sort_products(sorted.iter().copied(), SortKey::Newest);
        assert_eq!(ids(&again), ids(&sorted));
    }
}

#[test]
fn adding_options_never_shrinks_the_result() {
    for products in catalogs() {
        let one = FilterSelection::new().with_option(FacetAxis::Color, "White");
        let two = one.clone().with_option(FacetAxis::Color, "Pink");

        let narrow: BTreeSet<u64> = filter_products(&products, &one).iter().map(|p| p.id).collect();
        let wide: BTreeSet<u64> = filter_products(&products, &two).iter().map(|p| p.id).collect();
        assert!(narrow.is_subset(&wide));
    }
}

#[test]
fn pages_reconstruct_the_listing() {
    for products in catalogs() {
        let sorted = sort_products(&products, SortKey::PriceAscending);
        for page_size in [1, 5, 12, 100] {
            let first = paginate(&sorted, page_size, 1).unwrap();
            let mut rebuilt = Vec::new();
            for number in 1..=first.pagination.total_pages {
                rebuilt.extend(paginate(&sorted, page_size, number).unwrap().items);
            }
            assert_eq!(ids(&rebuilt), ids(&sorted), "page size {}", page_size);

            let past_end = first.pagination.total_pages + 1;
            assert!(paginate(&sorted, page_size, past_end).is_err());
        }
    }
}

#[test]
fn sort_keys_never_change_membership() {
    for products in catalogs() {
        for selection in selections() {
            let filtered = filter_products(&products, &selection);
            let expected: BTreeSet<u64> = filtered.iter().map(|p| p.id).collect();
            for key in SortKey::ALL {
                let sorted = sort_products(filtered.iter().copied(), key);
                let members: BTreeSet<u64> = sorted.iter().map(|p| p.id).collect();
                assert_eq!(members, expected, "sort key {}", key);
                assert_eq!(sorted.len(), filtered.len());
            }
        }
    }
}

#[test]
fn sorting_is_repeatable() {
    for products in catalogs() {
        for key in SortKey::ALL {
            assert_eq!(
                ids(&sort_products(&products, key)),
                ids(&sort_products(&products, key))
            );
        }
    }
}

#[test]
fn facets_cover_every_filtered_value() {
    for products in catalogs() {
        let facets = extract_facets(&products);
        for product in &products {
            for category in &product.categories {
                assert!(facets.categories.contains_key(category));
            }
            for metal in product.axis_options(FacetAxis::Material) {
                assert!(facets.materials.contains_key(metal));
            }
            if let Some(price) = product.parsed_price() {
                assert!(facets.price_bounds.as_range().contains(price));
            }
        }
    }
}
