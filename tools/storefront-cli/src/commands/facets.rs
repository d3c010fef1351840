//! List the facet universe of the catalog.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;
use storefront_catalog::catalog::FacetAxis;
use storefront_catalog::query::{FacetSet, FacetValue, FilterSelection};

use super::FacetsArgs;
use crate::context::Context;
use crate::output::checkbox;

#[derive(Serialize)]
struct FacetsReport<'a> {
    facets: &'a FacetSet,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    preview: BTreeMap<&'a str, Vec<&'a str>>,
}

/// Run the facets command.
pub async fn run(args: FacetsArgs, ctx: &Context) -> Result<()> {
    let session = ctx
        .open_session(args.fixture.as_deref(), ctx.config.query_config())
        .await?;
    let query = session.query();
    let facets = &query.view().facets;
    let limit = ctx.config.display.preview_limit;

    let mut preview: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    if args.preview {
        for category in facets.category_names() {
            let names = query
                .preview(Some(category), limit)
                .into_iter()
                .map(|p| p.name.as_str())
                .collect();
            preview.insert(category, names);
        }
    }

    if ctx.output.is_json() {
        ctx.output.json(&FacetsReport { facets, preview });
        return Ok(());
    }

    if facets.is_empty() {
        ctx.output.warn("Catalog is empty");
        return Ok(());
    }

    let selection = FilterSelection::default();

    ctx.output.header("Categories");
    print_values(ctx, &facets.category_values(&selection));
    if args.preview {
        for (category, names) in &preview {
            if !names.is_empty() {
                ctx.output.kv(category, &names.join(", "));
            }
        }
    }

    for axis in FacetAxis::ALL {
        ctx.output.header(axis.display_name());
        let values = facets.axis_values(axis, &selection);
        if values.is_empty() {
            ctx.output.info("(none)");
        } else {
            print_values(ctx, &values);
        }
    }

    let symbol = &ctx.config.display.currency_symbol;
    ctx.output.header("Price");
    ctx.output.kv("min", &facets.price_bounds.min.display_with(symbol));
    ctx.output.kv("max", &facets.price_bounds.max.display_with(symbol));

    Ok(())
}

fn print_values(ctx: &Context, values: &[FacetValue]) {
    for value in values {
        ctx.output.list_item(&format!(
            "{} {} ({})",
            checkbox(value.selected),
            value.value,
            value.count
        ));
    }
}
