//! Session and display preferences.

use sportswear_store_core::{CurrencyCode, Language, Theme};

use crate::models::User;

/// Who is signed in and how the storefront is displayed.
///
/// The authenticated flag is not stored: it is read off the user
/// snapshot, so the two cannot disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    user: Option<User>,
    language: Language,
    currency: CurrencyCode,
    theme: Theme,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the user snapshot; `None` signs the session out.
    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    pub fn set_currency(&mut self, currency: CurrencyCode) {
        self.currency = currency;
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }
}
