use anyhow::Context;
use fyyur::config::Config;
use fyyur::storage::{self, Storage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::load(None).context("loading configuration")?;

    println!(
        "⚠️  WARNING: This will delete ALL venues, artists and shows from {}",
        config.database.url
    );
    println!("Press Enter to continue or Ctrl+C to cancel...");
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    println!("🗑️  Clearing database...");
    let store = storage::connect(&config.database)?;
    store.clear_all_data().await?;

    println!("✅ Database cleared successfully!");
    Ok(())
}
