//! Sportswear store CLI - browse the catalog and manage the local cart.
//!
//! # Usage
//!
//! ```bash
//! # Search the catalog
//! sws search psg --sport football --max-price 100 --sort price-asc
//!
//! # Show the values each filter accepts
//! sws options
//!
//! # Add a jersey to the cart and review it
//! sws cart add p1 --size M --color Red --quantity 2
//! sws cart show
//!
//! # Ask the support assistant
//! sws chat "Which size should I pick for a slim fit?"
//! ```
//!
//! # Environment Variables
//!
//! - `STORE_CATALOG_URL` / `STORE_CATALOG_DIR` - where catalog documents live
//! - `STORE_STATE_DIR` - directory holding the persisted cart and preferences
//! - `GEMINI_API_KEY` - enables `sws chat`
//! - `RUST_LOG` - log filter (default `sportswear_store=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use sportswear_store::catalog::{SearchFilters, SortOrder};
use sportswear_store::reviews::ReviewSort;
use sportswear_store_core::{CurrencyCode, Language, Theme};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "sws")]
#[command(author, version, about = "Sportswear store command-line client")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog
    Search(SearchArgs),
    /// List the values available for each filter
    Options,
    /// Show one product and related items
    Product {
        /// Product id
        id: String,

        /// Number of related products to show
        #[arg(long, default_value_t = 4)]
        related: usize,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Show or change display preferences
    Prefs {
        #[arg(long)]
        theme: Option<Theme>,

        #[arg(long)]
        language: Option<Language>,

        #[arg(long)]
        currency: Option<CurrencyCode>,
    },
    /// Show reviews for a product
    Reviews {
        /// Product id
        product: String,

        /// Sort order (`newest`, `oldest`, `rating-high`, `rating-low`, `helpful`)
        #[arg(long, default_value = "newest")]
        sort: ReviewSort,

        /// Only reviews with at least this many stars
        #[arg(long)]
        min_rating: Option<u8>,

        /// Only verified purchases
        #[arg(long)]
        verified: bool,
    },
    /// Ask the support assistant a question
    Chat {
        /// The question
        message: String,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Free-text query matched against name, club, league, brand and tags
    #[arg(default_value = "")]
    query: String,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    sport: Option<String>,

    #[arg(long)]
    league: Option<String>,

    #[arg(long)]
    club: Option<String>,

    #[arg(long)]
    brand: Option<String>,

    #[arg(long)]
    min_price: Option<Decimal>,

    #[arg(long)]
    max_price: Option<Decimal>,

    /// Accepted size (repeatable)
    #[arg(long = "size")]
    sizes: Vec<String>,

    /// Accepted colour (repeatable)
    #[arg(long = "color")]
    colors: Vec<String>,

    /// Only products in stock
    #[arg(long)]
    in_stock: bool,

    #[arg(long)]
    featured: bool,

    #[arg(long)]
    bestseller: bool,

    /// Minimum average rating
    #[arg(long)]
    min_rating: Option<f64>,

    /// Sort order (`price-asc`, `price-desc`, `rating`, `newest`, `popularity`)
    #[arg(long)]
    sort: Option<SortOrder>,
}

impl SearchArgs {
    fn filters(&self) -> SearchFilters {
        SearchFilters {
            category: self.category.clone(),
            sport: self.sport.clone(),
            league: self.league.clone(),
            club: self.club.clone(),
            brand: self.brand.clone(),
            price_min: self.min_price,
            price_max: self.max_price,
            sizes: (!self.sizes.is_empty()).then(|| self.sizes.clone()),
            colors: (!self.colors.is_empty()).then(|| self.colors.clone()),
            in_stock: self.in_stock.then_some(true),
            featured: self.featured.then_some(true),
            bestseller: self.bestseller.then_some(true),
            rating: self.min_rating,
            sort_by: self.sort,
            ..SearchFilters::default()
        }
    }
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines and the total
    Show,
    /// Add a product variant
    Add {
        /// Product id
        product: String,

        #[arg(short, long)]
        size: String,

        #[arg(short, long)]
        color: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Change a line's quantity (0 removes it)
    Set {
        /// Line id or a unique prefix of it
        line: String,

        quantity: u32,
    },
    /// Remove a line
    Remove {
        /// Line id or a unique prefix of it
        line: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// List saved products
    List,
    /// Save a product
    Add { product: String },
    /// Forget a product
    Remove { product: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sportswear_store=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = commands::Context::open().await?;

    match cli.command {
        Commands::Search(args) => commands::catalog::search(&mut ctx, &args.query, args.filters()),
        Commands::Options => commands::catalog::options(&ctx),
        Commands::Product { id, related } => commands::catalog::show(&ctx, &id, related)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Add {
                product,
                size,
                color,
                quantity,
            } => commands::cart::add(&mut ctx, &product, &size, &color, quantity)?,
            CartAction::Set { line, quantity } => commands::cart::set(&mut ctx, &line, quantity)?,
            CartAction::Remove { line } => commands::cart::remove(&mut ctx, &line)?,
            CartAction::Clear => commands::cart::clear(&mut ctx),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::List => commands::wishlist::list(&ctx),
            WishlistAction::Add { product } => commands::wishlist::add(&mut ctx, &product)?,
            WishlistAction::Remove { product } => commands::wishlist::remove(&mut ctx, &product),
        },
        Commands::Prefs {
            theme,
            language,
            currency,
        } => commands::prefs::apply(&mut ctx, theme, language, currency),
        Commands::Reviews {
            product,
            sort,
            min_rating,
            verified,
        } => commands::reviews::list(&ctx, &product, sort, min_rating, verified).await?,
        Commands::Chat { message } => commands::chat::ask(&ctx, &message).await?,
    }
    Ok(())
}
