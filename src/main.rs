use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use fyyur::config::Config;
use fyyur::storage::{self, Storage};
use fyyur::{logging, metrics, seed, server};

#[derive(Parser)]
#[command(name = "fyyur")]
#[command(about = "Listing and booking site for venues, artists and shows")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, env = "FYYUR_CONFIG")]
    config: Option<PathBuf>,

    /// Override the database URL from the configuration
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server (default)
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to bind
        #[arg(long)]
        port: Option<u16>,
    },
    /// Create or upgrade the database schema
    Migrate,
    /// Load demo venues, artists and shows
    Seed,
    /// Delete every venue, artist and show
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }

    let _guard = logging::init_logging(&config.logging);

    // Opening the store runs pending migrations.
    let store = storage::connect(&config.database)
        .with_context(|| format!("opening database '{}'", config.database.url))?;

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            metrics::init_metrics();
            let storage: Arc<dyn Storage> = Arc::new(store);
            server::start_server(storage, &config)
                .await
                .map_err(|e| anyhow::anyhow!("server error: {e}"))?;
        }
        Commands::Migrate => {
            info!("Schema is up to date for {}", config.database.url);
            println!("✅ Database schema is up to date");
        }
        Commands::Seed => {
            let summary = seed::seed_demo_data(&store).await?;
            println!(
                "🌱 Seeded {} venues, {} artists and {} shows",
                summary.venues, summary.artists, summary.shows
            );
        }
        Commands::Clear => {
            store.clear_all_data().await?;
            println!("🗑️  Database cleared");
        }
    }

    Ok(())
}
