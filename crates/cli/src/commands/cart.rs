//! Cart commands. Changes are written through to the state directory.

use sportswear_store_core::CartLineId;

use super::{CommandError, Context};

#[allow(clippy::print_stdout)]
pub fn show(ctx: &Context) {
    let lines = ctx.store.cart_lines();
    if lines.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for line in lines {
        println!(
            "{}  {} x{}  {}/{}  {}",
            short_id(&line.id),
            line.product.name,
            line.quantity,
            line.size,
            line.color,
            ctx.money(line.line_total())
        );
    }
    println!("\nTotal: {}", ctx.money(ctx.store.cart_total()));
}

/// Add a product variant to the cart.
///
/// The quantity is reduced so the line, including units already in the
/// cart, stays within the product's stock and the per-line cap.
///
/// # Errors
///
/// Returns [`CommandError::UnknownProduct`] for an unknown id.
#[allow(clippy::print_stdout)]
pub fn add(
    ctx: &mut Context,
    product_id: &str,
    size: &str,
    color: &str,
    quantity: u32,
) -> Result<(), CommandError> {
    let product = ctx.product(product_id)?.clone();
    let quantity = ctx
        .store
        .cart()
        .addable_quantity(&product, size, color, quantity);

    match ctx.store.add_to_cart(&product, size, color, quantity) {
        Some(line) => {
            tracing::info!(product_id, size, color, quantity, "Added to cart");
            println!("Added {} x{} ({})", product.name, quantity, short_id(&line));
        }
        None if product.stock == 0 => {
            println!("Nothing added: {} is not available.", product.name);
        }
        None => println!("Nothing added: that line is already at its limit."),
    }
    Ok(())
}

/// Set a line's quantity; zero removes it.
///
/// # Errors
///
/// Returns an error if `line` matches no line or several lines.
pub fn set(ctx: &mut Context, line: &str, quantity: u32) -> Result<(), CommandError> {
    let id = resolve_line(ctx, line)?;
    ctx.store.update_cart_item_quantity(&id, quantity);
    show(ctx);
    Ok(())
}

/// Remove a line.
///
/// # Errors
///
/// Returns an error if `line` matches no line or several lines.
pub fn remove(ctx: &mut Context, line: &str) -> Result<(), CommandError> {
    let id = resolve_line(ctx, line)?;
    ctx.store.remove_from_cart(&id);
    show(ctx);
    Ok(())
}

pub fn clear(ctx: &mut Context) {
    ctx.store.clear_cart();
    show(ctx);
}

fn short_id(id: &CartLineId) -> &str {
    id.as_str().get(..8).unwrap_or_else(|| id.as_str())
}

fn resolve_line(ctx: &Context, prefix: &str) -> Result<CartLineId, CommandError> {
    let mut matches = ctx
        .store
        .cart_lines()
        .iter()
        .filter(|line| line.id.as_str().starts_with(prefix));

    match (matches.next(), matches.next()) {
        (Some(line), None) => Ok(line.id.clone()),
        (Some(_), Some(_)) => Err(CommandError::AmbiguousLine(prefix.to_owned())),
        (None, _) => Err(CommandError::UnknownLine(prefix.to_owned())),
    }
}
