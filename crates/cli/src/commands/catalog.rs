//! Catalog browsing commands.

use sportswear_store::catalog::SearchFilters;
use sportswear_store::models::Product;

use super::{CommandError, Context};

/// Run a search with the given query and filters and print the matches.
#[allow(clippy::print_stdout)]
pub fn search(ctx: &mut Context, query: &str, filters: SearchFilters) {
    ctx.store.set_search_query(query);
    ctx.store.set_search_filters(filters);

    let results = ctx.store.visible_products();
    tracing::info!(query, results = results.len(), "Catalog search");

    if results.is_empty() {
        println!("No products match.");
        return;
    }
    for product in &results {
        println!("{}", summary_line(ctx, product));
    }
    println!("\n{} product(s)", results.len());
}

/// Print the distinct values accepted by each filter.
#[allow(clippy::print_stdout)]
pub fn options(ctx: &Context) {
    let options = ctx.store.filter_options();
    println!("Sports:  {}", options.sports.join(", "));
    println!("Leagues: {}", options.leagues.join(", "));
    println!("Clubs:   {}", options.clubs.join(", "));
    println!("Brands:  {}", options.brands.join(", "));
    println!("Sizes:   {}", options.sizes.join(", "));
    println!("Colors:  {}", options.colors.join(", "));
    println!(
        "Price:   {} - {}",
        ctx.money(options.price_range.min),
        ctx.money(options.price_range.max)
    );
}

/// Print one product in detail, followed by related products.
///
/// # Errors
///
/// Returns [`CommandError::UnknownProduct`] for an unknown id.
#[allow(clippy::print_stdout)]
pub fn show(ctx: &Context, id: &str, related: usize) -> Result<(), CommandError> {
    let product = ctx.product(id)?;

    println!("{} ({})", product.name, product.id);
    println!("{} · {} · {} · {}", product.brand, product.club, product.league, product.season);
    match product.original_price {
        Some(original) if product.is_on_sale() => println!(
            "{} (was {})",
            ctx.money(product.price),
            ctx.money(original)
        ),
        _ => println!("{}", ctx.money(product.price)),
    }
    println!("Rating {:.1} ({} reviews)", product.rating, product.review_count);
    println!("Sizes:  {}", product.sizes.join(", "));
    println!("Colors: {}", product.colors.join(", "));
    println!("Stock:  {}", if product.in_stock { "in stock" } else { "sold out" });
    if ctx.store.is_in_wishlist(&product.id) {
        println!("♥ In your wishlist");
    }
    if !product.description.is_empty() {
        println!("\n{}", product.description);
    }

    let similar = ctx.store.related_products(id, related);
    if !similar.is_empty() {
        println!("\nYou may also like:");
        for product in similar {
            println!("  {}", summary_line(ctx, product));
        }
    }
    Ok(())
}

fn summary_line(ctx: &Context, product: &Product) -> String {
    format!(
        "{:<8} {:<40} {:>10}  ★{:.1}{}",
        product.id.as_str(),
        product.name,
        ctx.money(product.price),
        product.rating,
        if product.in_stock { "" } else { "  (sold out)" }
    )
}
