//! Browse one page of the catalog.

use anyhow::{Context as _, Result};
use serde::Serialize;
use storefront_catalog::catalog::{FacetAxis, Product};
use storefront_catalog::query::{CatalogView, FacetSet, FilterSelection, SortKey};
use storefront_catalog::PriceRange;

use super::BrowseArgs;
use crate::context::Context;
use crate::output::{stock_badge, truncate};

/// Page numbers shown in the pager line.
const PAGER_WIDTH: usize = 7;

#[derive(Serialize)]
struct BrowseReport<'a> {
    selection: &'a FilterSelection,
    sort: SortKey,
    #[serde(flatten)]
    view: &'a CatalogView,
}

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let sort: SortKey = args.sort.parse()?;

    let mut query_config = ctx.config.query_config();
    if let Some(size) = args.page_size {
        query_config.page_size = size;
    }

    let mut session = ctx.open_session(args.fixture.as_deref(), query_config).await?;

    let selection = build_selection(&args, &session.query().view().facets)?;
    warn_unknown_values(ctx, &selection, &session.query().view().facets);

    let query = session.query_mut();
    query.set_selection(selection);
    query.set_sort(sort);
    query.set_page(args.page);

    if args.page > query.current_page() {
        ctx.output.debug(&format!(
            "Page {} is past the end, showing page {}",
            args.page,
            query.current_page()
        ));
    }

    let query = session.query();
    let view = query.view();

    if ctx.output.is_json() {
        ctx.output.json(&BrowseReport {
            selection: query.selection(),
            sort: query.sort(),
            view,
        });
        return Ok(());
    }

    ctx.output.header(&format!("Catalog ({})", query.sort().display_name()));
    print_selection(ctx, query.selection());

    if query.is_empty_result() {
        ctx.output.warn("No products found. Try clearing some filters.");
        return Ok(());
    }

    print_products(ctx, &view.page.items);

    let pagination = &view.page.pagination;
    ctx.output.info("");
    ctx.output.info(&format!(
        "Showing {}-{} of {} products, page {}/{}",
        pagination.start_item(),
        pagination.end_item(),
        pagination.total,
        pagination.page,
        pagination.total_pages
    ));

    if pagination.total_pages > 1 {
        let pager: Vec<String> = pagination
            .page_numbers(PAGER_WIDTH)
            .into_iter()
            .map(|n| {
                if n == pagination.page {
                    format!("[{}]", n)
                } else {
                    n.to_string()
                }
            })
            .collect();
        ctx.output.kv("pages", &pager.join(" "));
    }

    Ok(())
}

/// Translate command-line flags into a filter selection.
///
/// A missing price bound falls back to the observed catalog bound.
fn build_selection(args: &BrowseArgs, facets: &FacetSet) -> Result<FilterSelection> {
    let mut selection = FilterSelection::new();
    selection.category = args.category.clone();

    if args.min.is_some() || args.max.is_some() {
        let bounds = facets.price_bounds;
        let lo = args.min.unwrap_or(0.0);
        let hi = args.max.unwrap_or_else(|| bounds.max.to_decimal());
        let range = PriceRange::from_decimal(lo, hi).context("Invalid price range")?;
        selection = selection.with_price_range(range);
    }

    for color in &args.colors {
        selection = selection.with_option(FacetAxis::Color, color.as_str());
    }
    for material in &args.materials {
        selection = selection.with_option(FacetAxis::Material, material.as_str());
    }

    Ok(selection)
}

fn warn_unknown_values(ctx: &Context, selection: &FilterSelection, facets: &FacetSet) {
    if let Some(ref category) = selection.category {
        if !facets.categories.contains_key(category) {
            ctx.output.warn(&format!("No product is in category '{}'", category));
        }
    }

    for axis in FacetAxis::ALL {
        for value in selection.selected(axis) {
            if !facets.axis(axis).contains_key(value) {
                ctx.output.warn(&format!(
                    "No product offers {} '{}'",
                    axis.display_name().to_lowercase(),
                    value
                ));
            }
        }
    }
}

fn print_selection(ctx: &Context, selection: &FilterSelection) {
    if selection.is_unconstrained() {
        return;
    }

    if let Some(ref category) = selection.category {
        ctx.output.kv("category", category);
    }
    if let Some(range) = selection.price_range {
        let symbol = &ctx.config.display.currency_symbol;
        ctx.output.kv(
            "price",
            &format!("{} - {}", range.lo.display_with(symbol), range.hi.display_with(symbol)),
        );
    }
    for axis in FacetAxis::ALL {
        let selected = selection.selected(axis);
        if !selected.is_empty() {
            let values: Vec<&str> = selected.iter().map(String::as_str).collect();
            ctx.output.kv(axis.as_str(), &values.join(", "));
        }
    }
}

fn print_products(ctx: &Context, products: &[Product]) {
    let widths = [6, 36, 24, 24, 12];
    let symbol = &ctx.config.display.currency_symbol;

    ctx.output.info("");
    ctx.output.table_row(&["ID", "NAME", "PRICE", "CATEGORIES", "STOCK"], &widths);

    for product in products {
        let id = product.id.to_string();
        let name = truncate(&product.name, widths[1]);
        let mut price = product.display_price_with(symbol);
        if let Some(regular) = product.compare_at_price() {
            price = format!("{} (was {})", price, regular.display_with(symbol));
        }
        let stock = stock_badge(&product.stock_status);
        let categories = truncate(&product.categories.join(", "), widths[3]);

        ctx.output.table_row(&[&id, &name, &price, &categories, &stock], &widths);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_catalog::catalog::ProductAttribute;
    use storefront_catalog::query::extract_facets;
    use storefront_catalog::Price;

    fn args() -> BrowseArgs {
        BrowseArgs {
            category: None,
            min: None,
            max: None,
            colors: Vec::new(),
            materials: Vec::new(),
            sort: "featured".to_string(),
            page: 1,
            page_size: None,
            fixture: None,
        }
    }

    fn facets() -> FacetSet {
        extract_facets(&[
            Product::new(1, "Band").with_price("40.00"),
            Product::new(2, "Ring")
                .with_price("250.00")
                .with_attribute(ProductAttribute::new("pa_color", ["Gold"])),
        ])
    }

    #[test]
    fn test_unconstrained_by_default() {
        let selection = build_selection(&args(), &facets()).unwrap();
        assert!(selection.is_unconstrained());
    }

    #[test]
    fn test_missing_max_uses_catalog_bound() {
        let mut args = args();
        args.min = Some(50.0);
        let selection = build_selection(&args, &facets()).unwrap();
        let range = selection.price_range.unwrap();
        assert_eq!(range.lo, Price::from_cents(5000));
        assert_eq!(range.hi, Price::from_cents(25000));
    }

    #[test]
    fn test_max_bound_is_exact() {
        let mut args = args();
        args.max = Some(74.999);
        let selection = build_selection(&args, &facets()).unwrap();
        let range = selection.price_range.unwrap();
        assert!(!range.contains(Price::parse("75.00").unwrap()));
        assert!(range.contains(Price::parse("74.99").unwrap()));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let mut args = args();
        args.min = Some(300.0);
        args.max = Some(100.0);
        assert!(build_selection(&args, &facets()).is_err());
    }

    #[test]
    fn test_repeated_options() {
        let mut args = args();
        args.colors = vec!["Gold".to_string(), "Silver".to_string()];
        args.materials = vec!["Platinum".to_string()];
        args.category = Some("Rings".to_string());

        let selection = build_selection(&args, &facets()).unwrap();
        assert_eq!(selection.colors.len(), 2);
        assert!(selection.materials.contains("Platinum"));
        assert_eq!(selection.category.as_deref(), Some("Rings"));
    }
}
