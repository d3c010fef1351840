//! Product detail view.

use anyhow::{anyhow, Result};
use storefront_catalog::catalog::Product;
use storefront_catalog::query::CatalogQuery;
use storefront_catalog::Price;

use super::ShowArgs;
use crate::context::Context;
use crate::output::stock_badge;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let session = ctx
        .open_session(args.fixture.as_deref(), ctx.config.query_config())
        .await?;

    let product = lookup(session.query(), &args.slug)
        .ok_or_else(|| anyhow!("No product with slug or id '{}'", args.slug))?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    print_product(ctx, product);
    Ok(())
}

/// Find by slug first, then by numeric id.
fn lookup<'a>(query: &'a CatalogQuery, key: &str) -> Option<&'a Product> {
    query
        .find_by_slug(key)
        .or_else(|| key.parse().ok().and_then(|id| query.find_by_id(id)))
}

fn print_product(ctx: &Context, product: &Product) {
    let symbol = &ctx.config.display.currency_symbol;
    let meta = &product.meta_data;

    ctx.output.header(&product.name);
    if let Some(label) = meta.label() {
        ctx.output.kv("label", &format!("{} ({})", label, meta.label_color()));
    }

    let mut price = product.display_price_with(symbol);
    if let Some(regular) = product.compare_at_price() {
        price = format!("{} (was {})", price, regular.display_with(symbol));
    }
    ctx.output.kv("price", &price);
    ctx.output.kv("stock", &stock_badge(&product.stock_status));
    if let Some(quantity) = product.stock_quantity {
        ctx.output.kv("quantity", &quantity.to_string());
    }
    if !product.sku.is_empty() {
        ctx.output.kv("sku", &product.sku);
    }
    ctx.output.kv("id", &product.id.to_string());
    if !product.categories.is_empty() {
        ctx.output.kv("categories", &product.categories.join(", "));
    }
    if let Some(image) = product.primary_image() {
        ctx.output.kv("image", image);
    }

    if !product.short_description.is_empty() {
        ctx.output.info("");
        ctx.output.info(product.short_description.trim());
    }

    let attributes: Vec<_> = product.visible_attributes().collect();
    if !attributes.is_empty() {
        ctx.output.header("Options");
        for attribute in attributes {
            ctx.output.kv(&attribute.display_name(), &attribute.options.join(", "));
        }
    }

    let shapes = meta.shapes();
    if !shapes.is_empty() {
        ctx.output.kv("shapes", &shapes.join(", "));
    }

    let swatches = meta.custom_fields();
    if !swatches.is_empty() {
        ctx.output.header("Variants");
        for swatch in swatches {
            let name = if swatch.color_name.is_empty() {
                &swatch.color
            } else {
                &swatch.color_name
            };
            ctx.output.list_item(&format!(
                "{} {}",
                name,
                Price::from_decimal(swatch.price).display_with(symbol)
            ));
        }
    }

    let features = meta.features();
    if !features.is_empty() {
        ctx.output.header("Features");
        for feature in features {
            ctx.output.list_item(feature);
        }
    }

    let specifications = meta.specifications();
    if !specifications.is_empty() {
        ctx.output.header("Specifications");
        let width = specifications
            .iter()
            .map(|s| s.label.chars().count())
            .max()
            .unwrap_or(0);
        for spec in &specifications {
            ctx.output.table_row(&[&spec.label, &spec.value], &[width, 0]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_catalog::query::QueryConfig;

    fn query() -> CatalogQuery {
        let mut query = CatalogQuery::new(QueryConfig::default()).unwrap();
        query.resolve(vec![
            Product::new(7, "Solitaire Ring").with_slug("solitaire-ring"),
            Product::new(12, "Tennis Bracelet").with_slug("7"),
            Product::new(21, "Hoop Earrings"),
        ]);
        query
    }

    #[test]
    fn test_lookup_by_slug_then_id() {
        let query = query();
        assert_eq!(lookup(&query, "solitaire-ring").unwrap().id, 7);
        assert_eq!(lookup(&query, "21").unwrap().id, 21);
        assert!(lookup(&query, "missing").is_none());
    }

    #[test]
    fn test_slug_wins_over_id() {
        let query = query();
        assert_eq!(lookup(&query, "7").unwrap().name, "Tennis Bracelet");
        assert_eq!(lookup(&query, "12").unwrap().name, "Tennis Bracelet");
        assert!(lookup(&query, "").is_none());
    }
}
