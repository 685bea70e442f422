//! End-to-end scenarios through the store container.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rust_decimal::Decimal;
use sportswear_store::catalog::{SearchFilters, SortOrder, search};
use sportswear_store::notifications::NewNotification;
use sportswear_store_core::{NotificationKind, ProductId};
use sportswear_store_integration_tests::{customer, p1, p2, store_with_catalog};

// =============================================================================
// Cart
// =============================================================================

#[test]
fn test_cart_total_follows_every_change() {
    let mut store = store_with_catalog();
    let line = store.add_to_cart(&p1(), "M", "Red", 1).unwrap();
    assert_eq!(store.cart_total(), Decimal::from(50));

    store.add_to_cart(&p2(), "L", "Gold", 1);
    assert_eq!(store.cart_total(), Decimal::from(150));
    assert_eq!(store.cart_lines().len(), 2);

    store.update_cart_item_quantity(&line, 3);
    assert_eq!(store.cart_total(), Decimal::from(250));

    store.remove_from_cart(&line);
    assert_eq!(store.cart_total(), Decimal::from(100));

    store.clear_cart();
    assert_eq!(store.cart_total(), Decimal::ZERO);
    assert!(store.cart_lines().is_empty());
}

#[test]
fn test_same_variant_merges_and_other_variant_appends() {
    let mut store = store_with_catalog();
    let first = store.add_to_cart(&p1(), "M", "Red", 1).unwrap();
    let merged = store.add_to_cart(&p1(), "M", "Red", 2).unwrap();
    let other = store.add_to_cart(&p1(), "L", "Red", 1).unwrap();

    assert_eq!(first, merged);
    assert_ne!(first, other);
    assert_eq!(store.cart_lines().len(), 2);
    assert_eq!(store.cart_lines()[0].quantity, 3);
    assert_eq!(store.cart().item_count(), 4);
}

#[test]
fn test_zero_quantity_update_removes_line() {
    let mut store = store_with_catalog();
    let line = store.add_to_cart(&p1(), "M", "Red", 2).unwrap();
    store.update_cart_item_quantity(&line, 0);
    assert!(store.cart_lines().is_empty());
    assert_eq!(store.cart_total(), Decimal::ZERO);
}

// =============================================================================
// Wishlist & Notifications
// =============================================================================

#[test]
fn test_wishlist_is_a_set() {
    let mut store = store_with_catalog();
    store.add_to_wishlist(ProductId::new("p2"));
    store.add_to_wishlist(ProductId::new("p2"));
    assert_eq!(store.wishlist().len(), 1);
    assert!(store.is_in_wishlist(&ProductId::new("p2")));

    let saved: Vec<_> = store.wishlist_products().iter().map(|p| p.id.clone()).collect();
    assert_eq!(saved, [ProductId::new("p2")]);

    store.remove_from_wishlist(&ProductId::new("p2"));
    store.remove_from_wishlist(&ProductId::new("p2"));
    assert!(store.wishlist().is_empty());
}

#[test]
fn test_notification_unread_count() {
    let mut store = store_with_catalog();
    let id = store.add_notification(NewNotification::new(
        NotificationKind::Info,
        "Hello",
        "Welcome back",
    ));
    assert_eq!(store.unread_notification_count(), 1);

    store.mark_notification_as_read(&id);
    assert_eq!(store.unread_notification_count(), 0);

    // Newest first.
    store.add_notification(NewNotification::success("Second", "Later"));
    assert_eq!(store.notifications()[0].title, "Second");
    assert_eq!(store.notifications().len(), 2);

    store.mark_all_notifications_as_read();
    assert_eq!(store.unread_notification_count(), 0);
    store.clear_all_notifications();
    assert!(store.notifications().is_empty());
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_price_min_keeps_only_expensive_products() {
    let filters = SearchFilters {
        price_min: Some(Decimal::from(60)),
        ..SearchFilters::default()
    };
    let found = search(&[p1(), p2()], "", &filters);
    let ids: Vec<&str> = found.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["p2"]);
}

#[test]
fn test_search_results_satisfy_every_filter() {
    let catalog = vec![p1(), p2()];
    let cases = [
        SearchFilters::default(),
        SearchFilters {
            sport: Some("Football".to_owned()),
            ..SearchFilters::default()
        },
        SearchFilters {
            brand: Some("Nike".to_owned()),
            sizes: Some(vec!["L".to_owned()]),
            sort_by: Some(SortOrder::PriceDesc),
            ..SearchFilters::default()
        },
        SearchFilters {
            colors: Some(vec!["gold".to_owned()]),
            featured: Some(true),
            ..SearchFilters::default()
        },
        SearchFilters {
            price_max: Some(Decimal::from(10)),
            ..SearchFilters::default()
        },
    ];

    for filters in &cases {
        let found = search(&catalog, "", filters);
        assert!(found.len() <= catalog.len());
        for product in &found {
            assert!(catalog.contains(product));
            assert!(filters.matches(product), "{} escaped {filters:?}", product.id);
        }
        if filters.sort_by == Some(SortOrder::PriceDesc) {
            assert!(found.windows(2).all(|w| w[0].price >= w[1].price));
        }
    }
}

#[test]
fn test_store_search_state_merges_and_clears() {
    let mut store = store_with_catalog();
    store.set_search_query("jersey");
    store.set_search_filters(SearchFilters {
        brand: Some("Nike".to_owned()),
        ..SearchFilters::default()
    });
    store.set_search_filters(SearchFilters {
        price_min: Some(Decimal::from(60)),
        ..SearchFilters::default()
    });

    assert_eq!(store.search_filters().brand.as_deref(), Some("Nike"));
    let visible: Vec<_> = store.visible_products().into_iter().map(|p| p.id).collect();
    assert_eq!(visible, [ProductId::new("p2")]);

    store.clear_search_filters();
    assert!(store.search_filters().is_empty());
    assert_eq!(store.search_query(), "");
    assert_eq!(store.visible_products().len(), 2);
}

#[test]
fn test_filter_options_and_related() {
    let store = store_with_catalog();
    let options = store.filter_options();
    assert_eq!(options.sports, ["Basketball", "Football"]);
    assert_eq!(options.sizes, ["L", "M"]);
    assert_eq!(options.price_range.min, Decimal::from(50));
    assert_eq!(options.price_range.max, Decimal::from(100));

    // Same brand makes them related.
    let related: Vec<_> = store.related_products("p1", 4).iter().map(|p| p.id.clone()).collect();
    assert_eq!(related, [ProductId::new("p2")]);
    assert!(store.related_products("missing", 4).is_empty());
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn test_authenticated_flag_tracks_user() {
    let mut store = store_with_catalog();
    assert!(!store.is_authenticated());

    store.set_user(Some(customer().unwrap()));
    assert!(store.is_authenticated());
    assert_eq!(store.user().unwrap().display_name, "Fan");

    store.set_user(None);
    assert!(!store.is_authenticated());
}
