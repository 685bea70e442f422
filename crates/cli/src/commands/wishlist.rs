//! Wishlist commands.

use sportswear_store_core::ProductId;

use super::{CommandError, Context};

#[allow(clippy::print_stdout)]
pub fn list(ctx: &Context) {
    let products = ctx.store.wishlist_products();
    if products.is_empty() {
        println!("Your wishlist is empty.");
        return;
    }
    for product in products {
        println!(
            "{:<8} {:<40} {:>10}",
            product.id.as_str(),
            product.name,
            ctx.money(product.price)
        );
    }

    // Ids saved earlier whose product has since left the catalog.
    let missing = ctx
        .store
        .wishlist()
        .iter()
        .filter(|id| ctx.store.product(id.as_str()).is_none())
        .count();
    if missing > 0 {
        println!("\n{missing} saved product(s) are no longer available.");
    }
}

/// Save a catalog product to the wishlist.
///
/// # Errors
///
/// Returns [`CommandError::UnknownProduct`] for an unknown id.
#[allow(clippy::print_stdout)]
pub fn add(ctx: &mut Context, product_id: &str) -> Result<(), CommandError> {
    let id = ctx.product(product_id)?.id.clone();
    ctx.store.add_to_wishlist(id);
    println!("Saved {product_id} to your wishlist.");
    Ok(())
}

/// Remove an id from the wishlist, whether or not it is still in the catalog.
#[allow(clippy::print_stdout)]
pub fn remove(ctx: &mut Context, product_id: &str) {
    let id = ProductId::new(product_id);
    if ctx.store.is_in_wishlist(&id) {
        ctx.store.remove_from_wishlist(&id);
        println!("Removed {product_id} from your wishlist.");
    } else {
        println!("{product_id} is not in your wishlist.");
    }
}
