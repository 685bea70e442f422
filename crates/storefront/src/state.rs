//! The client-side store: one explicit container for catalog, search,
//! cart, wishlist, notifications, session and loading state.
//!
//! Every mutation goes through a method so invariants hold (one cart line
//! per variant, newest-first feed, authenticated flag tied to the user
//! snapshot). After each change to the persisted subset the store writes a
//! snapshot through its [`Persister`], if it has one.

use rust_decimal::Decimal;

use sportswear_store_core::{CartLineId, CurrencyCode, Language, NotificationId, ProductId, Theme};

use crate::cart::{Cart, CartLineItem};
use crate::catalog::{self, CatalogError, CatalogLoader, FilterOptions, SearchFilters};
use crate::models::{Category, GeoLocation, Product, User};
use crate::notifications::{NewNotification, Notification, NotificationFeed};
use crate::persistence::{PersistedState, Persister};
use crate::session::SessionState;
use crate::wishlist::Wishlist;

/// Transient loading indicators (never persisted).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    pub global: bool,
    pub products: bool,
    pub cart: bool,
}

/// Client-side store state.
///
/// Construct one per session (or per test) with [`Store::new`] for an
/// ephemeral store or [`Store::hydrate`] to restore and persist through
/// storage.
#[derive(Debug, Default)]
pub struct Store {
    products: Vec<Product>,
    categories: Vec<Category>,
    search_query: String,
    search_filters: SearchFilters,
    cart: Cart,
    wishlist: Wishlist,
    notifications: NotificationFeed,
    session: SessionState,
    geo_location: Option<GeoLocation>,
    loading: LoadingFlags,
    persister: Option<Persister>,
}

impl Store {
    /// Create an empty store that is not persisted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the persisted subset from storage and keep persisting to it.
    ///
    /// Missing or unreadable data leaves every field at its default.
    #[must_use]
    pub fn hydrate(persister: Persister) -> Self {
        let mut store = Self::new();
        if let Some(state) = persister.load() {
            store.restore(state);
            tracing::info!(
                key = persister.key(),
                cart_lines = store.cart.len(),
                wishlist = store.wishlist.len(),
                "Restored stored state"
            );
        }
        store.persister = Some(persister);
        store
    }

    fn restore(&mut self, state: PersistedState) {
        self.cart = state.cart;
        self.wishlist = state.wishlist;
        self.session.set_theme(state.theme);
        self.session.set_language(state.language);
        self.session.set_currency(state.currency);
        // The flag is re-derived from the snapshot rather than trusted.
        self.session.set_user(state.user);
    }

    /// The persisted subset of the current state.
    #[must_use]
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            cart: self.cart.clone(),
            wishlist: self.wishlist.clone(),
            theme: self.session.theme(),
            language: self.session.language(),
            currency: self.session.currency(),
            user: self.session.user().cloned(),
            is_authenticated: self.session.is_authenticated(),
        }
    }

    fn persist(&self) {
        let Some(persister) = &self.persister else {
            return;
        };
        if let Err(err) = persister.save(&self.persisted_state()) {
            tracing::warn!(key = persister.key(), error = %err, "Failed to persist store state");
        }
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Replace the user snapshot; `None` signs out.
    pub fn set_user(&mut self, user: Option<User>) {
        self.session.set_user(user);
        self.persist();
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.session.user()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.session.set_theme(theme);
        self.persist();
    }

    pub fn set_language(&mut self, language: Language) {
        self.session.set_language(language);
        self.persist();
    }

    pub fn set_currency(&mut self, currency: CurrencyCode) {
        self.session.set_currency(currency);
        self.persist();
    }

    #[must_use]
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn set_geo_location(&mut self, location: GeoLocation) {
        self.geo_location = Some(location);
    }

    #[must_use]
    pub const fn geo_location(&self) -> Option<&GeoLocation> {
        self.geo_location.as_ref()
    }

    // =========================================================================
    // Catalog & Search
    // =========================================================================

    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Merge `filters` into the current filters.
    pub fn set_search_filters(&mut self, filters: SearchFilters) {
        self.search_filters.merge(filters);
    }

    #[must_use]
    pub const fn search_filters(&self) -> &SearchFilters {
        &self.search_filters
    }

    /// Reset filters and the free-text query.
    pub fn clear_search_filters(&mut self) {
        self.search_filters = SearchFilters::default();
        self.search_query.clear();
    }

    /// Catalog filtered by the current query and filters, then sorted.
    #[must_use]
    pub fn visible_products(&self) -> Vec<Product> {
        catalog::search(&self.products, &self.search_query, &self.search_filters)
    }

    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        catalog::query::find_by_id(&self.products, id)
    }

    #[must_use]
    pub fn related_products(&self, id: &str, limit: usize) -> Vec<&Product> {
        catalog::query::related(&self.products, id, limit)
    }

    #[must_use]
    pub fn filter_options(&self) -> FilterOptions {
        catalog::filter_options(&self.products)
    }

    /// Mark the product list as loading.
    pub fn begin_products_load(&mut self) {
        self.loading.products = true;
    }

    /// Apply the outcome of a product load and clear the loading flag.
    ///
    /// A failed load is logged and keeps the current list.
    pub fn finish_products_load(&mut self, result: Result<Vec<Product>, CatalogError>) {
        match result {
            Ok(products) => {
                tracing::info!(count = products.len(), "Products loaded");
                self.products = products;
            }
            Err(err) => tracing::error!(error = %err, "Failed to load products"),
        }
        self.loading.products = false;
    }

    /// Apply the outcome of a category load. A failure is logged.
    pub fn finish_categories_load(&mut self, result: Result<Vec<Category>, CatalogError>) {
        match result {
            Ok(categories) => {
                tracing::info!(count = categories.len(), "Categories loaded");
                self.categories = categories;
            }
            Err(err) => tracing::error!(error = %err, "Failed to load categories"),
        }
    }

    /// Fetch products and categories that are not loaded yet.
    pub async fn load_catalog(&mut self, loader: &CatalogLoader) {
        if self.products.is_empty() {
            self.begin_products_load();
            let result = loader.products().await;
            self.finish_products_load(result);
        }
        if self.categories.is_empty() {
            let result = loader.categories().await;
            self.finish_categories_load(result);
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add units of a product variant, merging with an existing line.
    pub fn add_to_cart(
        &mut self,
        product: &Product,
        size: &str,
        color: &str,
        quantity: u32,
    ) -> Option<CartLineId> {
        let line = self.cart.add_item(product, size, color, quantity);
        if line.is_some() {
            self.persist();
        }
        line
    }

    /// Remove a line; unknown ids are ignored.
    pub fn remove_from_cart(&mut self, line_id: &CartLineId) {
        if self.cart.remove_item(line_id) {
            self.persist();
        }
    }

    /// Set a line's quantity; zero removes the line.
    pub fn update_cart_item_quantity(&mut self, line_id: &CartLineId, quantity: u32) {
        if self.cart.set_quantity(line_id, quantity) {
            self.persist();
        }
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist();
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn cart_lines(&self) -> &[CartLineItem] {
        self.cart.lines()
    }

    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.cart.total()
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    pub fn add_to_wishlist(&mut self, id: ProductId) {
        if self.wishlist.add(id) {
            self.persist();
        }
    }

    pub fn remove_from_wishlist(&mut self, id: &ProductId) {
        if self.wishlist.remove(id) {
            self.persist();
        }
    }

    #[must_use]
    pub fn is_in_wishlist(&self, id: &ProductId) -> bool {
        self.wishlist.contains(id)
    }

    #[must_use]
    pub const fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// Wishlisted products still present in the loaded catalog.
    #[must_use]
    pub fn wishlist_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| self.wishlist.contains(&p.id))
            .collect()
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    pub fn add_notification(&mut self, notification: NewNotification) -> NotificationId {
        self.notifications.add(notification)
    }

    pub fn remove_notification(&mut self, id: &NotificationId) {
        self.notifications.remove(id);
    }

    pub fn mark_notification_as_read(&mut self, id: &NotificationId) {
        self.notifications.mark_read(id);
    }

    pub fn mark_all_notifications_as_read(&mut self) {
        self.notifications.mark_all_read();
    }

    pub fn clear_all_notifications(&mut self) {
        self.notifications.clear();
    }

    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        self.notifications.entries()
    }

    #[must_use]
    pub fn unread_notification_count(&self) -> usize {
        self.notifications.unread_count()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    pub fn set_loading(&mut self, loading: bool) {
        self.loading.global = loading;
    }

    pub fn set_loading_cart(&mut self, loading: bool) {
        self.loading.cart = loading;
    }

    #[must_use]
    pub const fn loading(&self) -> LoadingFlags {
        self.loading
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use sportswear_store_core::{Email, NotificationKind};

    use super::*;
    use crate::persistence::{DEFAULT_STORAGE_KEY, MemoryStorage, StateStorage};

    fn p1() -> Product {
        Product {
            sport: "Football".to_string(),
            sizes: vec!["M".to_string()],
            colors: vec!["Red".to_string()],
            ..Product::new("p1", "Home Jersey", Decimal::from(50))
        }
    }

    fn p2() -> Product {
        Product::new("p2", "Away Jersey", Decimal::from(80))
    }

    fn fan() -> User {
        User::new("u1", Email::parse("fan@example.com").unwrap(), "Fan")
    }

    #[test]
    fn test_cart_scenario() {
        let mut store = Store::new();
        store.set_products(vec![p1(), p2()]);

        store.add_to_cart(&p1(), "M", "Red", 1);
        assert_eq!(store.cart_total(), Decimal::from(50));

        let line = store.add_to_cart(&p1(), "M", "Red", 2).unwrap();
        assert_eq!(store.cart_lines().len(), 1);
        assert_eq!(store.cart_lines()[0].quantity, 3);
        assert_eq!(store.cart_total(), Decimal::from(150));

        store.remove_from_cart(&line);
        assert!(store.cart().is_empty());
        assert_eq!(store.cart_total(), Decimal::ZERO);
    }

    #[test]
    fn test_notification_scenario() {
        let mut store = Store::new();
        let id = store.add_notification(NewNotification::success("Order confirmed", "..."));
        assert_eq!(store.notifications().len(), 1);
        assert_eq!(store.unread_notification_count(), 1);
        assert!(!store.notifications()[0].read);
        assert_eq!(store.notifications()[0].kind, NotificationKind::Success);

        store.mark_notification_as_read(&id);
        assert_eq!(store.unread_notification_count(), 0);
    }

    #[test]
    fn test_set_user_drives_authenticated() {
        let mut store = Store::new();
        store.set_user(Some(fan()));
        assert!(store.is_authenticated());
        store.set_user(None);
        assert!(!store.is_authenticated());
        assert!(!store.persisted_state().is_authenticated);
    }

    #[test]
    fn test_search_filters_merge_and_clear() {
        let mut store = Store::new();
        store.set_products(vec![p1(), p2()]);
        store.set_search_query("jersey");
        store.set_search_filters(SearchFilters {
            price_min: Some(Decimal::from(60)),
            ..SearchFilters::default()
        });
        store.set_search_filters(SearchFilters {
            sort_by: Some(catalog::SortOrder::PriceDesc),
            ..SearchFilters::default()
        });

        let visible = store.visible_products();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id.as_str(), "p2");

        store.clear_search_filters();
        assert!(store.search_filters().is_empty());
        assert_eq!(store.search_query(), "");
        assert_eq!(store.visible_products().len(), 2);
    }

    #[test]
    fn test_failed_product_load_keeps_list_and_clears_flag() {
        let mut store = Store::new();
        store.set_products(vec![p1()]);
        store.begin_products_load();
        assert!(store.loading().products);

        let err = serde_json::from_str::<Vec<Product>>("nope").unwrap_err();
        store.finish_products_load(Err(CatalogError::Parse {
            document: "products.json",
            source: err,
        }));
        assert!(!store.loading().products);
        assert_eq!(store.products().len(), 1);
    }

    #[test]
    fn test_mutations_write_through_persister() {
        let storage = Arc::new(MemoryStorage::new());
        let persister = Persister::new(storage.clone(), DEFAULT_STORAGE_KEY);
        let mut store = Store::hydrate(persister);
        assert!(storage.get_item(DEFAULT_STORAGE_KEY).unwrap().is_none());

        store.add_to_wishlist(ProductId::new("p1"));
        let raw = storage.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        assert!(raw.contains("\"p1\""));

        // Notifications are not part of the persisted subset.
        store.add_notification(NewNotification::success("t", "m"));
        assert_eq!(storage.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap(), raw);
    }

    #[test]
    fn test_hydrate_round_trip() {
        let storage = Arc::new(MemoryStorage::new());
        let persister = Persister::new(storage, DEFAULT_STORAGE_KEY);

        let mut store = Store::hydrate(persister.clone());
        store.set_products(vec![p1(), p2()]);
        store.add_to_cart(&p1(), "M", "Red", 2);
        store.add_to_wishlist(ProductId::new("p2"));
        store.set_theme(Theme::Dark);
        store.set_language(Language::De);
        store.set_currency(CurrencyCode::GBP);
        store.set_user(Some(fan()));
        store.add_notification(NewNotification::success("t", "m"));
        store.set_search_query("psg");
        let before = store.persisted_state();
        drop(store);

        let restored = Store::hydrate(persister);
        assert_eq!(restored.persisted_state(), before);
        assert!(restored.is_authenticated());
        assert!(restored.notifications().is_empty());
        assert!(restored.products().is_empty());
        assert_eq!(restored.search_query(), "");
        assert!(restored.search_filters().is_empty());
    }

    #[test]
    fn test_hydrate_from_corrupt_storage_uses_defaults() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(DEFAULT_STORAGE_KEY, "garbage").unwrap();
        let store = Store::hydrate(Persister::new(storage, DEFAULT_STORAGE_KEY));
        assert!(store.cart().is_empty());
        assert_eq!(store.session().theme(), Theme::Light);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_wishlist_products_follow_catalog() {
        let mut store = Store::new();
        store.set_products(vec![p1(), p2()]);
        store.add_to_wishlist(ProductId::new("p2"));
        store.add_to_wishlist(ProductId::new("p2"));
        store.add_to_wishlist(ProductId::new("gone"));
        assert!(store.is_in_wishlist(&ProductId::new("p2")));
        assert_eq!(store.wishlist().len(), 2);
        assert_eq!(store.wishlist_products().len(), 1);
    }
}
