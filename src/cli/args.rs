use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "A terminal storefront with a product catalog and a shopping cart")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog file (JSON), overrides CATALOG_PATH
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the products in the catalog
    Catalog,
    /// Add products to a fresh cart and show it
    Cart {
        /// Product ID to add to the cart; repeat to add more units
        #[arg(short, long = "add", value_name = "ID")]
        add: Vec<u64>,
    },
    /// Browse the catalog and manage the cart interactively
    Shop,
}
