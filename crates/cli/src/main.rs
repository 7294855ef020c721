//! Boutique CLI - browse the catalog, manage the cart and send the contact form.
//!
//! # Usage
//!
//! ```bash
//! # Browse page 2 of medium-size dresses, cheapest first
//! boutique catalog --size M --category dresses --sort price-asc --page 2
//!
//! # Add two of product 7 to the cart and show it
//! boutique cart add 7 -q 2
//! boutique cart show
//!
//! # Send the contact form
//! boutique contact --name "Anna" --email anna@example.com --topic Sizing \
//!     --message "Does the linen dress run small?"
//! ```
//!
//! # Commands
//!
//! - `catalog` - Filter, search, sort and page through products
//! - `cart` - Show and edit the persisted cart, or check out
//! - `contact` - Validate and submit the contact form
//!
//! Configuration comes from `BOUTIQUE_*` environment variables (see
//! `boutique_storefront::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boutique_storefront::config::StorefrontConfig;

mod commands;

#[derive(Parser)]
#[command(name = "boutique")]
#[command(author, version, about = "Boutique storefront CLI")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Catalog(commands::catalog::CatalogArgs),
    /// Manage the cart
    Cart {
        /// Product document (file path or URL) used to resolve product ids
        #[arg(long)]
        source: Option<String>,

        #[command(subcommand)]
        action: CartCommand,
    },
    /// Send the contact form
    Contact(commands::contact::ContactArgs),
}

#[derive(Subcommand)]
enum CartCommand {
    /// Show the cart and its totals
    Show,
    /// Add a product
    Add {
        /// Product id
        id: String,

        /// Quantity to add
        #[arg(short, long)]
        quantity: Option<u32>,
    },
    /// Remove every line with this product id
    Remove {
        /// Product id
        id: String,
    },
    /// Set the quantity of a product (0 or less removes it)
    Set {
        /// Product id
        id: String,

        /// New quantity
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Place the order and empty the cart
    Checkout,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing on stderr; stdout carries command output
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "boutique_storefront=info,boutique_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            cli.log_json
                .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with(
            (!cli.log_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
        .init();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let output = commands::Output { json: cli.json };

    match cli.command {
        Commands::Catalog(args) => commands::catalog::browse(&config, &args, output).await?,
        Commands::Cart { source, action } => {
            let mut cart = commands::cart::open(&config);
            match action {
                CartCommand::Show => commands::cart::show(&cart, output)?,
                CartCommand::Add { id, quantity } => {
                    let catalog = commands::load_catalog(&config, source.as_deref()).await.ok();
                    commands::cart::add(&mut cart, catalog.as_ref(), &id, quantity, output)?;
                }
                CartCommand::Remove { id } => commands::cart::remove(&mut cart, &id, output)?,
                CartCommand::Set { id, quantity } => {
                    commands::cart::set(&mut cart, &id, quantity, output)?;
                }
                CartCommand::Clear => commands::cart::clear(&mut cart, output)?,
                CartCommand::Checkout => commands::cart::checkout(&mut cart, output)?,
            }
        }
        Commands::Contact(args) => commands::contact::send(&config, &args, output).await?,
    }
    Ok(())
}
