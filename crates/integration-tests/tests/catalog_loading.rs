//! Catalog documents read from the bundled `data/` directory.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rust_decimal::Decimal;
use sportswear_store::Store;
use sportswear_store::catalog::{CatalogLoader, CatalogSource, SearchFilters, SortOrder};
use sportswear_store::reviews::{ReviewBook, ReviewFilter, ReviewSort};
use sportswear_store_core::ProductId;
use sportswear_store_integration_tests::sample_catalog_dir;

fn sample_loader() -> CatalogLoader {
    CatalogLoader::new(CatalogSource::Directory(sample_catalog_dir()))
}

#[tokio::test]
async fn test_store_loads_sample_catalog() {
    let mut store = Store::new();
    store.load_catalog(&sample_loader()).await;

    assert_eq!(store.products().len(), 5);
    assert_eq!(store.categories().len(), 2);
    assert!(!store.loading().products);

    let jersey = store.product("rm-home-24").unwrap();
    assert_eq!(jersey.price, Decimal::new(8999, 2));
    assert!(jersey.is_on_sale());
}

#[tokio::test]
async fn test_sample_catalog_search() {
    let mut store = Store::new();
    store.load_catalog(&sample_loader()).await;

    store.set_search_filters(SearchFilters {
        league: Some("NBA".to_owned()),
        sort_by: Some(SortOrder::PriceAsc),
        ..SearchFilters::default()
    });
    let ids: Vec<_> = store.visible_products().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, [ProductId::new("gsw-assoc-24"), ProductId::new("lal-icon-24")]);

    store.clear_search_filters();
    store.set_search_query("madrid");
    let ids: Vec<_> = store.visible_products().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, [ProductId::new("rm-home-24")]);

    store.set_search_filters(SearchFilters {
        in_stock: Some(true),
        ..SearchFilters::default()
    });
    store.set_search_query("");
    assert!(store.visible_products().iter().all(|p| p.in_stock));
    assert_eq!(store.visible_products().len(), 4);
}

#[tokio::test]
async fn test_missing_directory_leaves_catalog_empty() {
    let dir = tempfile::tempdir().unwrap();
    let loader = CatalogLoader::new(CatalogSource::Directory(dir.path().join("absent")));

    let mut store = Store::new();
    store.load_catalog(&loader).await;

    assert!(store.products().is_empty());
    assert!(store.categories().is_empty());
    assert!(!store.loading().products);
}

#[tokio::test]
async fn test_malformed_document_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("products.json"), "[{\"id\": 1}]").unwrap();
    let loader = CatalogLoader::new(CatalogSource::Directory(dir.path().to_path_buf()));

    assert!(loader.products().await.is_err());
}

#[tokio::test]
async fn test_sample_reviews() {
    let book = ReviewBook::load(&sample_loader()).await.unwrap();
    assert_eq!(book.all().len(), 5);

    let madrid = ProductId::new("rm-home-24");
    let stats = book.stats(&madrid);
    assert_eq!(stats.total, 3);
    assert!((stats.average - 4.7).abs() < f64::EPSILON);
    assert_eq!(stats.count(5), 2);
    assert_eq!(stats.count(4), 1);

    let verified = ReviewFilter {
        verified_only: true,
        ..ReviewFilter::default()
    };
    let helpful = book.query(&madrid, &verified, ReviewSort::Helpful);
    let ids: Vec<&str> = helpful.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["review-1", "review-2"]);
    assert!(helpful[1].reply.is_some());

    let recent = book.recent(2);
    assert_eq!(recent[0].id.as_str(), "review-5");
}
