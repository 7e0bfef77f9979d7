mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use migration::MigratorTrait;

use cli::args::Cli;
use todoit::{Config, ConnectionManager, Manager};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    let args = Cli::parse();

    let config = Config::from_env()?;
    let db = ConnectionManager::connect_from_config(&config)
        .await
        .context("failed to connect to the todoit database")?;

    migration::Migrator::up(&db, None)
        .await
        .context("failed to run pending migrations")?;

    let manager = Manager::new(db);
    cli::dispatch(args, &manager).await?;
    Ok(())
}
