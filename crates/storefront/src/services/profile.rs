//! Profile edits: contact details, saved addresses and preferences.
//!
//! Each edit builds the updated user, saves it through a
//! [`ProfileBackend`], then applies it to the store with `set_user`. A
//! failed save leaves the store untouched and posts an error notification.

use thiserror::Error;

use sportswear_store_core::{AddressId, CurrencyCode, Language, ThemePreference};

use super::backend::{BackendError, ProfileBackend};
use crate::models::{Address, User, UserPreferences};
use crate::notifications::NewNotification;
use crate::state::Store;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Sign in to edit your profile")]
    NotAuthenticated,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Editable contact fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: String,
    pub phone_number: Option<String>,
    pub country: Option<String>,
}

/// A single preference change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceUpdate {
    Language(Language),
    Currency(CurrencyCode),
    Theme(ThemePreference),
    Newsletter(bool),
    Notifications(bool),
    FavoriteTeams(Vec<String>),
    FavoriteSports(Vec<String>),
}

impl PreferenceUpdate {
    pub fn apply(self, preferences: &mut UserPreferences) {
        match self {
            Self::Language(language) => preferences.language = language,
            Self::Currency(currency) => preferences.currency = currency,
            Self::Theme(theme) => preferences.theme = theme,
            Self::Newsletter(on) => preferences.newsletter = on,
            Self::Notifications(on) => preferences.notifications = on,
            Self::FavoriteTeams(teams) => preferences.favorite_teams = teams,
            Self::FavoriteSports(sports) => preferences.favorite_sports = sports,
        }
    }
}

/// Insert or replace an address by id.
///
/// An empty id gets a generated one. When the address is the default, every
/// other address loses its default flag.
pub fn upsert_address(addresses: &mut Vec<Address>, mut address: Address) -> AddressId {
    if address.id.as_str().is_empty() {
        address.id = AddressId::generate();
    }
    let id = address.id.clone();
    let is_default = address.is_default;

    match addresses.iter_mut().find(|a| a.id == id) {
        Some(existing) => *existing = address,
        None => addresses.push(address),
    }

    if is_default {
        for other in addresses.iter_mut() {
            other.is_default = other.id == id;
        }
    }
    id
}

/// Remove an address by id. Returns `false` if it was not present.
pub fn remove_address(addresses: &mut Vec<Address>, id: &AddressId) -> bool {
    let before = addresses.len();
    addresses.retain(|a| &a.id != id);
    addresses.len() != before
}

/// Update contact details.
///
/// # Errors
///
/// Returns [`ProfileError`] when signed out or when the save fails.
pub async fn update_profile(
    store: &mut Store,
    backend: &dyn ProfileBackend,
    update: ProfileUpdate,
) -> Result<User, ProfileError> {
    let mut user = current_user(store)?;
    user.display_name = update.display_name;
    user.phone_number = update.phone_number;
    user.country = update.country;
    commit(store, backend, user, "Profile update failed").await
}

/// Add or replace a saved address.
///
/// # Errors
///
/// Returns [`ProfileError`] when signed out or when the save fails.
pub async fn save_address(
    store: &mut Store,
    backend: &dyn ProfileBackend,
    address: Address,
) -> Result<User, ProfileError> {
    let mut user = current_user(store)?;
    upsert_address(&mut user.addresses, address);
    commit(store, backend, user, "Address not saved").await
}

/// Delete a saved address.
///
/// # Errors
///
/// Returns [`ProfileError`] when signed out or when the save fails.
pub async fn delete_address(
    store: &mut Store,
    backend: &dyn ProfileBackend,
    id: &AddressId,
) -> Result<User, ProfileError> {
    let mut user = current_user(store)?;
    remove_address(&mut user.addresses, id);
    commit(store, backend, user, "Address not deleted").await
}

/// Change one preference. Language, currency and a concrete theme are
/// mirrored into the session.
///
/// # Errors
///
/// Returns [`ProfileError`] when signed out or when the save fails.
pub async fn update_preference(
    store: &mut Store,
    backend: &dyn ProfileBackend,
    update: PreferenceUpdate,
) -> Result<User, ProfileError> {
    let mut user = current_user(store)?;
    update.clone().apply(&mut user.preferences);
    let user = commit(store, backend, user, "Preferences not saved").await?;

    match update {
        PreferenceUpdate::Language(language) => store.set_language(language),
        PreferenceUpdate::Currency(currency) => store.set_currency(currency),
        PreferenceUpdate::Theme(theme) => {
            if let Some(theme) = theme.resolved() {
                store.set_theme(theme);
            }
        }
        _ => {}
    }
    Ok(user)
}

fn current_user(store: &Store) -> Result<User, ProfileError> {
    store.user().cloned().ok_or(ProfileError::NotAuthenticated)
}

async fn commit(
    store: &mut Store,
    backend: &dyn ProfileBackend,
    user: User,
    failure_title: &str,
) -> Result<User, ProfileError> {
    match backend.save_user(&user).await {
        Ok(()) => {
            tracing::info!(user_id = %user.id, "Profile saved");
            store.set_user(Some(user.clone()));
            Ok(user)
        }
        Err(err) => {
            tracing::error!(user_id = %user.id, error = %err, "Failed to save profile");
            let message = match &err {
                BackendError::Auth(auth) => auth.to_string(),
                _ => "Your changes could not be saved. Please try again".to_string(),
            };
            store.add_notification(NewNotification::error(failure_title, message));
            Err(err.into())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;
    use sportswear_store_core::{AddressKind, Email, NotificationKind, Theme};

    use super::*;
    use crate::services::auth::AuthError;
    use crate::services::backend::InMemoryBackend;

    fn address(id: &str, is_default: bool) -> Address {
        Address {
            id: AddressId::new(id),
            kind: AddressKind::Home,
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            company: None,
            street: "1 Main St".to_string(),
            city: "Lyon".to_string(),
            postal_code: "69001".to_string(),
            country: "FR".to_string(),
            phone: None,
            is_default,
        }
    }

    fn signed_in() -> Store {
        let mut store = Store::new();
        store.set_user(Some(User::new(
            "u1",
            Email::parse("fan@example.com").unwrap(),
            "Fan",
        )));
        store
    }

    struct StaleLogin;

    #[async_trait]
    impl ProfileBackend for StaleLogin {
        async fn save_user(&self, _user: &User) -> Result<(), BackendError> {
            Err(AuthError::RequiresRecentLogin.into())
        }
    }

    #[test]
    fn test_new_default_clears_others() {
        let mut addresses = vec![address("a1", true), address("a2", false)];
        upsert_address(&mut addresses, address("a3", true));
        let defaults: Vec<_> = addresses
            .iter()
            .filter(|a| a.is_default)
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(defaults, ["a3"]);
        assert_eq!(addresses.len(), 3);
    }

    #[test]
    fn test_upsert_replaces_and_generates_ids() {
        let mut addresses = vec![address("a1", false)];
        let mut edited = address("a1", false);
        edited.city = "Nice".to_string();
        upsert_address(&mut addresses, edited);
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].city, "Nice");

        let id = upsert_address(&mut addresses, address("", false));
        assert!(!id.as_str().is_empty());
        assert_eq!(addresses.len(), 2);
    }

    #[test]
    fn test_remove_address() {
        let mut addresses = vec![address("a1", false)];
        assert!(remove_address(&mut addresses, &AddressId::new("a1")));
        assert!(!remove_address(&mut addresses, &AddressId::new("a1")));
    }

    #[tokio::test]
    async fn test_save_address_updates_store_and_backend() {
        let backend = InMemoryBackend::new();
        let mut store = signed_in();
        save_address(&mut store, &backend, address("a1", true))
            .await
            .unwrap();

        assert_eq!(store.user().unwrap().addresses.len(), 1);
        let saved = backend.user(&store.user().unwrap().id).unwrap();
        assert_eq!(saved.default_address().unwrap().id.as_str(), "a1");
    }

    #[tokio::test]
    async fn test_update_preference_mirrors_session() {
        let backend = InMemoryBackend::new();
        let mut store = signed_in();
        update_preference(&mut store, &backend, PreferenceUpdate::Language(Language::Es))
            .await
            .unwrap();
        update_preference(&mut store, &backend, PreferenceUpdate::Theme(ThemePreference::Dark))
            .await
            .unwrap();
        update_preference(&mut store, &backend, PreferenceUpdate::Theme(ThemePreference::Auto))
            .await
            .unwrap();

        assert_eq!(store.session().language(), Language::Es);
        assert_eq!(store.session().theme(), Theme::Dark);
        assert_eq!(
            store.user().unwrap().preferences.theme,
            ThemePreference::Auto
        );
    }

    #[tokio::test]
    async fn test_failed_save_posts_mapped_message() {
        let mut store = signed_in();
        let err = update_profile(
            &mut store,
            &StaleLogin,
            ProfileUpdate {
                display_name: "New Name".to_string(),
                ..ProfileUpdate::default()
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ProfileError::Backend(BackendError::Auth(_))));
        assert_eq!(store.user().unwrap().display_name, "Fan");
        let note = &store.notifications()[0];
        assert_eq!(note.kind, NotificationKind::Error);
        assert_eq!(note.message, "Please sign in again to complete this action");
    }

    #[tokio::test]
    async fn test_signed_out_is_rejected() {
        let backend = InMemoryBackend::new();
        let mut store = Store::new();
        let err = delete_address(&mut store, &backend, &AddressId::new("a1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProfileError::NotAuthenticated));
    }
}
