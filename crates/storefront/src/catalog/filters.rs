//! Search filter and sort selectors.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Product;

/// Sort order applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    Rating,
    Newest,
    Popularity,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "rating" => Ok(Self::Rating),
            "newest" => Ok(Self::Newest),
            "popularity" => Ok(Self::Popularity),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

/// A sparse set of catalog predicates plus a sort selector.
///
/// An absent field leaves its dimension unconstrained. Present fields are
/// combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price_min: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price_max: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bestseller: Option<bool>,
    /// Minimum average rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortOrder>,
}

impl SearchFilters {
    /// Overlay `other` on top of `self`: fields present in `other` replace
    /// the current value, absent fields keep it.
    pub fn merge(&mut self, other: Self) {
        fn overlay<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        overlay(&mut self.category, other.category);
        overlay(&mut self.subcategory, other.subcategory);
        overlay(&mut self.sport, other.sport);
        overlay(&mut self.league, other.league);
        overlay(&mut self.club, other.club);
        overlay(&mut self.brand, other.brand);
        overlay(&mut self.price_min, other.price_min);
        overlay(&mut self.price_max, other.price_max);
        overlay(&mut self.sizes, other.sizes);
        overlay(&mut self.colors, other.colors);
        overlay(&mut self.in_stock, other.in_stock);
        overlay(&mut self.featured, other.featured);
        overlay(&mut self.bestseller, other.bestseller);
        overlay(&mut self.rating, other.rating);
        overlay(&mut self.sort_by, other.sort_by);
    }

    /// Whether no predicate and no sort order is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Evaluate every present predicate against `product`.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        field_matches(self.category.as_deref(), &product.category)
            && field_matches(self.subcategory.as_deref(), &product.subcategory)
            && field_matches(self.sport.as_deref(), &product.sport)
            && field_matches(self.league.as_deref(), &product.league)
            && field_matches(self.club.as_deref(), &product.club)
            && field_matches(self.brand.as_deref(), &product.brand)
            && self.price_min.is_none_or(|min| product.price >= min)
            && self.price_max.is_none_or(|max| product.price <= max)
            && self.sizes_match(product)
            && self.colors_match(product)
            && flag_matches(self.in_stock, product.in_stock)
            && flag_matches(self.featured, product.featured)
            && flag_matches(self.bestseller, product.bestseller)
            && self.rating.is_none_or(|min| product.rating >= min)
    }

    fn sizes_match(&self, product: &Product) -> bool {
        match self.sizes.as_deref() {
            None | Some([]) => true,
            Some(wanted) => wanted.iter().any(|size| product.sizes.contains(size)),
        }
    }

    // Product colours are often compound ("Red/White"), so a wanted colour
    // matches when it appears anywhere in a product colour.
    fn colors_match(&self, product: &Product) -> bool {
        match self.colors.as_deref() {
            None | Some([]) => true,
            Some(wanted) => wanted.iter().any(|color| {
                let color = color.to_lowercase();
                product
                    .colors
                    .iter()
                    .any(|candidate| candidate.to_lowercase().contains(&color))
            }),
        }
    }
}

/// Categorical equality; an empty filter value counts as unset.
fn field_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        None | Some("") => true,
        Some(wanted) => wanted == actual,
    }
}

/// Boolean flags only constrain when set to `true`.
fn flag_matches(wanted: Option<bool>, actual: bool) -> bool {
    wanted != Some(true) || actual
}
