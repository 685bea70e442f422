//! Catalog product and category documents.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sportswear_store_core::{CategoryId, CurrencyCode, ProductId};

/// A catalog product (jersey, shorts, training kit...).
///
/// Owned by the catalog service; the client holds a read-only copy and
/// embeds snapshots of it in cart lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub club: String,
    pub league: String,
    #[serde(default)]
    pub country: String,
    pub sport: String,
    /// Product type ("home", "away", "training"...).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Season label, e.g. "2024-25".
    #[serde(default)]
    pub season: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub original_price: Option<Decimal>,
    /// Discount in percent relative to `original_price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u32>,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Average rating between 0 and 5.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub bestseller: bool,
}

impl Product {
    /// Create a product with the given identity and price; every other
    /// field is empty. Use struct update syntax to fill in the rest.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: String::new(),
            club: String::new(),
            league: String::new(),
            country: String::new(),
            sport: String::new(),
            kind: String::new(),
            season: String::new(),
            price,
            original_price: None,
            discount: None,
            currency: CurrencyCode::default(),
            description: String::new(),
            features: Vec::new(),
            sizes: Vec::new(),
            colors: Vec::new(),
            images: Vec::new(),
            stock: 0,
            category: String::new(),
            subcategory: String::new(),
            tags: Vec::new(),
            rating: 0.0,
            review_count: 0,
            in_stock: false,
            featured: false,
            bestseller: false,
        }
    }

    /// First image URL, used as the order-line thumbnail.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether the product is marked down from an original price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }
}

/// A top-level catalog category (football, basketball...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subcategories: Vec<SubCategory>,
}

/// A category subdivision (usually a league) and the clubs it lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub clubs: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_document() {
        let json = r#"{
            "id": "rm-home-24",
            "name": "Real Madrid Home Jersey 24/25",
            "brand": "Adidas",
            "club": "Real Madrid",
            "league": "La Liga",
            "country": "Spain",
            "sport": "Football",
            "type": "home",
            "season": "2024-25",
            "price": 89.99,
            "originalPrice": 109.99,
            "discount": 18,
            "currency": "EUR",
            "description": "Official home jersey",
            "features": ["HEAT.RDY"],
            "sizes": ["S", "M", "L"],
            "colors": ["White"],
            "images": ["/img/rm-home.jpg"],
            "stock": 42,
            "category": "football",
            "subcategory": "la-liga",
            "tags": ["madrid", "home"],
            "rating": 4.7,
            "reviewCount": 128,
            "inStock": true,
            "featured": true,
            "bestseller": false
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "rm-home-24");
        assert_eq!(product.kind, "home");
        assert_eq!(product.price, Decimal::new(8999, 2));
        assert_eq!(product.original_price, Some(Decimal::new(10999, 2)));
        assert_eq!(product.review_count, 128);
        assert!(product.in_stock);
        assert!(product.is_on_sale());
        assert_eq!(product.primary_image(), Some("/img/rm-home.jpg"));
    }

    #[test]
    fn test_minimal_document_uses_defaults() {
        let json = r#"{"id":"p1","name":"Plain","brand":"B","club":"C","league":"L","sport":"S","price":50}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Decimal::from(50));
        assert!(product.sizes.is_empty());
        assert!(!product.is_on_sale());
        assert_eq!(product.primary_image(), None);
    }

    #[test]
    fn test_price_serializes_as_number() {
        let product = Product::new("p1", "Plain", Decimal::new(5050, 2));
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["price"], serde_json::json!(50.5));
        assert!(value.get("originalPrice").is_none());
    }
}
