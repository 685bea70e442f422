//! Product review listing.

use sportswear_store::reviews::{RatingStats, ReviewBook, ReviewFilter, ReviewSort};
use sportswear_store::StoreError;

use super::{CommandError, Context};

/// Print rating statistics and the matching reviews for a product.
///
/// # Errors
///
/// Returns an error for an unknown product or when the review document
/// cannot be loaded.
#[allow(clippy::print_stdout)]
pub async fn list(
    ctx: &Context,
    product_id: &str,
    sort: ReviewSort,
    min_rating: Option<u8>,
    verified_only: bool,
) -> Result<(), CommandError> {
    let product = ctx.product(product_id)?;
    let book = ReviewBook::load(&ctx.loader).await.map_err(StoreError::from)?;

    let stats = book.stats(&product.id);
    println!("{}: {:.1}/5 from {} review(s)", product.name, stats.average, stats.total);
    print_distribution(&stats);

    let filter = ReviewFilter {
        min_rating,
        verified_only,
        ..ReviewFilter::default()
    };
    for review in book.query(&product.id, &filter, sort) {
        println!(
            "\n{} {}  {}{}",
            "★".repeat(usize::from(review.rating.min(5))),
            review.title,
            review.user_name,
            if review.verified { " (verified)" } else { "" }
        );
        println!("{}  ·  {} found this helpful", review.date.format("%Y-%m-%d"), review.helpful);
        println!("{}", review.comment);
        if let Some(reply) = &review.reply {
            println!("  ↳ {}: {}", reply.admin_name, reply.message);
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_distribution(stats: &RatingStats) {
    for stars in (1..=5u8).rev() {
        let percent = stats
            .percentages
            .get(usize::from(stars - 1))
            .copied()
            .unwrap_or_default();
        println!("  {stars}★ {:>4} ({percent:.0}%)", stats.count(stars));
    }
}
