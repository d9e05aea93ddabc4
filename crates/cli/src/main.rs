//! Fakestore CLI - Browse the catalog and manage the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List products, optionally by category
//! fakestore products list --category electronics
//!
//! # Show one product
//! fakestore products show 1
//!
//! # Manage the cart
//! fakestore cart add 1
//! fakestore cart update 1 3
//! fakestore cart remove 1
//! fakestore cart clear
//! fakestore cart show
//! ```
//!
//! The cart is the same persisted slot the storefront server uses, so
//! changes made here show up on the cart page and vice versa.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use fakestore_storefront::config::StorefrontConfig;

mod commands;

#[derive(Parser)]
#[command(name = "fakestore")]
#[command(author, version, about = "Fakestore CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products
    List {
        /// Only show products in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one product
    Show {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents and total
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: String,
    },
    /// Set the quantity of a cart item (below 1 removes it)
    Update {
        /// Product id
        id: String,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List { category } => {
                commands::products::list(&config, category.as_deref()).await?;
            }
            ProductsAction::Show { id } => commands::products::show(&config, &id).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&config),
            CartAction::Add { id } => commands::cart::add(&config, &id).await?,
            CartAction::Update { id, quantity } => {
                commands::cart::update(&config, &id, quantity)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&config, &id)?,
            CartAction::Clear => commands::cart::clear(&config),
        },
    }
    Ok(())
}
