//! Souq CLI - catalog queries, sign-in checks, and translation lookups.
//!
//! Talks to the same backend client as the storefront: the hosted backend when
//! `VITE_SUPABASE_URL` and `VITE_SUPABASE_ANON_KEY` are set, the mock otherwise.
//!
//! # Usage
//!
//! ```bash
//! # Top-rated ceramics that are in stock
//! souq-cli products --category ceramics --sort rating --in-stock
//!
//! # Verified stores in Morocco
//! souq-cli stores --country Morocco --verified
//!
//! # Check a set of credentials
//! SOUQ_PASSWORD=password souq-cli login -e seller@souq.test
//!
//! # Look up translations
//! souq-cli translate -l ar nav.home cart.title
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use souq_storefront::backend::BackendClient;
use souq_storefront::config::StorefrontConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::catalog::{ProductListing, StoreListing};

#[derive(Parser)]
#[command(name = "souq-cli")]
#[command(author, version, about = "Souq marketplace CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Products {
        /// Search product, store, and category names
        #[arg(short, long)]
        query: Option<String>,

        /// Only this category
        #[arg(short, long)]
        category: Option<String>,

        /// Only this store id
        #[arg(short, long)]
        store: Option<String>,

        /// Sort order (`featured`, `newest`, `price-asc`, `price-desc`, `rating`, `name`)
        #[arg(long, default_value = "featured")]
        sort: String,

        /// Hide products that are out of stock
        #[arg(long)]
        in_stock: bool,

        /// Maximum number of rows to print
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// List stores in the directory
    Stores {
        /// Search store names and descriptions
        #[arg(short, long)]
        query: Option<String>,

        /// Only this country
        #[arg(short, long)]
        country: Option<String>,

        /// Only verified stores
        #[arg(long)]
        verified: bool,
    },
    /// Check an email and password against the backend
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "SOUQ_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Look up interface translations
    Translate {
        /// Language code (`en`, `ar`, `fr`)
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Dotted translation keys, e.g. `nav.home`
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "souq_cli=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Products {
            query,
            category,
            store,
            sort,
            in_stock,
            limit,
        } => {
            let listing = ProductListing::new(query, category, store, &sort, in_stock, limit)?;
            commands::catalog::products(&backend()?, &listing).await;
        }
        Commands::Stores {
            query,
            country,
            verified,
        } => {
            let listing = StoreListing {
                query,
                country,
                verified_only: verified,
            };
            commands::catalog::stores(&backend()?, &listing).await;
        }
        Commands::Login { email, password } => {
            commands::auth::login(&backend()?, &email, password).await?;
        }
        Commands::Translate { language, keys } => {
            commands::translate::translate(&language, &keys)?;
        }
    }
    Ok(())
}

/// Backend selected from the environment, as the storefront does at startup.
fn backend() -> Result<BackendClient, commands::CliError> {
    let config = StorefrontConfig::from_env()?;
    Ok(BackendClient::from_config(config.backend.as_ref()))
}
