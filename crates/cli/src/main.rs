//! Gully Bazaar CLI - seeding, directory queries, and admin management.
//!
//! # Usage
//!
//! ```bash
//! # Seed the backend with demo shops and products around Mumbai
//! gb-cli seed
//!
//! # Query nearby shops from a fixed position
//! gb-cli nearby --lat 19.0760 --lng 72.8777 --radius 3000
//!
//! # Query nearby shops from the configured device position
//! # (GB_DEVICE_LAT / GB_DEVICE_LNG)
//! gb-cli nearby
//!
//! # Grant the admin label to an account
//! gb-cli admin grant --email admin@example.com
//! ```
//!
//! # Commands
//!
//! - `seed` - Create demo shops and products in the backend
//! - `nearby` - Run a nearby-shop query from the terminal
//! - `admin grant` - Grant the admin label to an account

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gb-cli")]
#[command(author, version, about = "Gully Bazaar CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the backend with demo shops and products
    Seed {
        /// Center latitude for the demo shops
        #[arg(long, default_value_t = 19.0760)]
        lat: f64,

        /// Center longitude for the demo shops
        #[arg(long, default_value_t = 72.8777)]
        lng: f64,
    },
    /// Query nearby shops
    Nearby {
        /// Latitude of the query center (omit to use the device position
        /// from GB_DEVICE_LAT/GB_DEVICE_LNG)
        #[arg(long)]
        lat: Option<f64>,

        /// Longitude of the query center
        #[arg(long)]
        lng: Option<f64>,

        /// Search radius in meters
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Grant the admin label to an account
    Grant {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { lat, lng } => commands::seed::run(lat, lng).await?,
        Commands::Nearby { lat, lng, radius } => {
            commands::nearby::run(lat, lng, radius).await?;
        }
        Commands::Admin { action } => match action {
            AdminAction::Grant { email } => commands::admin::grant(&email).await?,
        },
    }
    Ok(())
}
