//! LuxStore CLI - database management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the storefront session table
//! luxstore-cli migrate
//!
//! # Check that the session database is reachable
//! luxstore-cli check
//! ```
//!
//! # Commands
//!
//! - `migrate` - Create or update the session store schema
//! - `check` - Connect to the session database and run a trivial query

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "luxstore-cli")]
#[command(author, version, about = "LuxStore CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update the session store schema
    Migrate,
    /// Check connectivity to the session database
    Check,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::migrate::MigrationError> {
    match cli.command {
        Commands::Migrate => commands::migrate::sessions().await,
        Commands::Check => commands::migrate::check().await,
    }
}
