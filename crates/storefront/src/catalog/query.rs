//! Pure query functions over an in-memory product list.
//!
//! Nothing here mutates its inputs; every function returns a fresh view.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Serialize;

use super::filters::{SearchFilters, SortOrder};
use crate::models::Product;

/// Default number of related products.
pub const DEFAULT_RELATED_LIMIT: usize = 4;

/// Filter `products` by the free-text `query` and `filters`, then sort by
/// `filters.sort_by`.
#[must_use]
pub fn search(products: &[Product], query: &str, filters: &SearchFilters) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    let mut matched: Vec<Product> = products
        .iter()
        .filter(|product| matches_text(product, &needle) && filters.matches(product))
        .cloned()
        .collect();
    if let Some(order) = filters.sort_by {
        sort_products(&mut matched, order);
    }
    matched
}

/// Case-insensitive substring match over name, club, brand, league, sport
/// and tags. `needle` must already be lowercased; empty matches all.
fn matches_text(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [
        &product.name,
        &product.club,
        &product.brand,
        &product.league,
        &product.sport,
    ]
    .into_iter()
    .chain(product.tags.iter())
    .any(|field| field.to_lowercase().contains(needle))
}

/// Stable in-place sort; ties keep their input order.
pub fn sort_products(products: &mut [Product], order: SortOrder) {
    match order {
        SortOrder::PriceAsc => products.sort_by_key(|p| p.price),
        SortOrder::PriceDesc => products.sort_by_key(|p| Reverse(p.price)),
        SortOrder::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortOrder::Newest => products.sort_by(|a, b| {
            b.season
                .cmp(&a.season)
                .then_with(|| b.id.as_str().cmp(a.id.as_str()))
        }),
        SortOrder::Popularity => products.sort_by_key(|p| Reverse(p.review_count)),
    }
}

/// Look up a product by id.
#[must_use]
pub fn find_by_id<'a>(products: &'a [Product], id: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.id.as_str() == id)
}

/// Products flagged as featured, in catalog order.
#[must_use]
pub fn featured(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.featured).collect()
}

/// Products flagged as bestsellers, in catalog order.
#[must_use]
pub fn bestsellers(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.bestseller).collect()
}

/// Products in the given category.
#[must_use]
pub fn by_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    products.iter().filter(|p| p.category == category).collect()
}

/// Products sharing a sport, league or brand with `product_id`, excluding
/// the product itself, in catalog order and capped at `limit`.
///
/// Returns an empty list when the product is unknown.
#[must_use]
pub fn related<'a>(products: &'a [Product], product_id: &str, limit: usize) -> Vec<&'a Product> {
    let Some(anchor) = find_by_id(products, product_id) else {
        return Vec::new();
    };
    products
        .iter()
        .filter(|p| {
            p.id != anchor.id
                && (p.sport == anchor.sport || p.league == anchor.league || p.brand == anchor.brand)
        })
        .take(limit)
        .collect()
}

/// Inclusive price range observed in a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

/// Distinct values available for each filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub sports: Vec<String>,
    pub leagues: Vec<String>,
    pub clubs: Vec<String>,
    pub brands: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub price_range: PriceRange,
}

/// Collect the distinct, sorted values of every filter dimension and the
/// observed price range (`[0, 0]` for an empty catalog).
#[must_use]
pub fn filter_options(products: &[Product]) -> FilterOptions {
    fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
        values.cloned().collect::<BTreeSet<_>>().into_iter().collect()
    }

    let price_range = products
        .iter()
        .map(|p| p.price)
        .fold(None, |range: Option<PriceRange>, price| {
            Some(range.map_or(PriceRange { min: price, max: price }, |r| PriceRange {
                min: r.min.min(price),
                max: r.max.max(price),
            }))
        })
        .unwrap_or(PriceRange {
            min: Decimal::ZERO,
            max: Decimal::ZERO,
        });

    FilterOptions {
        sports: distinct(products.iter().map(|p| &p.sport)),
        leagues: distinct(products.iter().map(|p| &p.league)),
        clubs: distinct(products.iter().map(|p| &p.club)),
        brands: distinct(products.iter().map(|p| &p.brand)),
        sizes: distinct(products.iter().flat_map(|p| &p.sizes)),
        colors: distinct(products.iter().flat_map(|p| &p.colors)),
        price_range,
    }
}
