//! Display preference commands.

use sportswear_store_core::{CurrencyCode, Language, Theme};

use super::Context;

/// Apply any given preference, then print the current values.
#[allow(clippy::print_stdout)]
pub fn apply(
    ctx: &mut Context,
    theme: Option<Theme>,
    language: Option<Language>,
    currency: Option<CurrencyCode>,
) {
    if let Some(theme) = theme {
        ctx.store.set_theme(theme);
    }
    if let Some(language) = language {
        ctx.store.set_language(language);
    }
    if let Some(currency) = currency {
        ctx.store.set_currency(currency);
    }

    let session = ctx.store.session();
    println!("Theme:    {:?}", session.theme());
    println!("Language: {}", session.language());
    println!(
        "Currency: {} ({})",
        session.currency(),
        session.currency().name()
    );
    match ctx.store.user() {
        Some(user) => println!("Signed in as {} <{}>", user.display_name, user.email),
        None => println!("Not signed in"),
    }
}
