//! Tasty Eats CLI - browse the menu and manage the local cart.
//!
//! # Usage
//!
//! ```bash
//! # Browse the menu
//! te-cli menu list
//! te-cli menu list --category Pizza
//! te-cli menu list --search curry
//! te-cli menu featured --limit 2
//! te-cli menu show 3
//! te-cli menu categories
//!
//! # Manage the cart
//! te-cli cart add 1
//! te-cli cart set 1 3
//! te-cli cart remove 1
//! te-cli cart show
//! te-cli cart clear
//! ```
//!
//! # Environment Variables
//!
//! - `TASTY_EATS_DATA_DIR` - Directory holding the persisted cart (default: .tasty-eats)
//! - `CATALOG_PATH` - JSON file with an alternative menu

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tasty_eats_core::ItemId;
use tasty_eats_storefront::cart::{CartStore, TracingNotifier};
use tasty_eats_storefront::catalog::{Catalog, CatalogService, Latency};
use tasty_eats_storefront::config::DEFAULT_DATA_DIR;
use tasty_eats_storefront::storage::FileStore;

mod commands;
mod output;

use commands::CliError;

#[derive(Parser)]
#[command(name = "te-cli")]
#[command(author, version, about = "Tasty Eats CLI tools")]
struct Cli {
    /// Directory holding the persisted cart
    #[arg(long, global = true, env = "TASTY_EATS_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// JSON menu file to use instead of the built-in menu
    #[arg(long, global = true, env = "CATALOG_PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the menu
    Menu {
        #[command(subcommand)]
        action: MenuAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum MenuAction {
    /// List menu items, optionally filtered
    List {
        /// Exact category label
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive name search (overrides --category)
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List the first few menu items
    Featured {
        #[arg(short, long, default_value_t = 3)]
        limit: usize,
    },
    /// Show one menu item
    Show {
        /// Menu item ID
        id: String,
    },
    /// List category filters
    Categories,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add one unit of a menu item
    Add {
        /// Menu item ID
        id: String,
    },
    /// Remove an item from the cart
    Remove {
        /// Menu item ID
        id: String,
    },
    /// Set an item's quantity (0 or less removes it)
    Set {
        /// Menu item ID
        id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never mix with command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(text) => output::emit(&text),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_json_file(path)?,
        None => Catalog::seeded(),
    };
    let catalog = CatalogService::new(catalog, Latency::Instant);

    match cli.command {
        Commands::Menu { action } => match action {
            MenuAction::List { category, search } => Ok(commands::menu::list(
                &catalog,
                category.as_deref(),
                search.as_deref(),
            )
            .await),
            MenuAction::Featured { limit } => Ok(commands::menu::featured(&catalog, limit).await),
            MenuAction::Show { id } => commands::menu::show(&catalog, &ItemId::new(id)).await,
            MenuAction::Categories => Ok(commands::menu::categories(&catalog).await),
        },
        Commands::Cart { action } => {
            let storage = Arc::new(FileStore::new(cli.data_dir));
            let mut cart = CartStore::load(storage, Arc::new(TracingNotifier));

            match action {
                CartAction::Show => Ok(commands::cart::show(&cart)),
                CartAction::Add { id } => {
                    commands::cart::add(&mut cart, &catalog, &ItemId::new(id)).await
                }
                CartAction::Remove { id } => commands::cart::remove(&mut cart, &ItemId::new(id)),
                CartAction::Set { id, quantity } => {
                    commands::cart::set_quantity(&mut cart, &ItemId::new(id), quantity)
                }
                CartAction::Clear => commands::cart::clear(&mut cart),
            }
        }
    }
}
