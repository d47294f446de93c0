//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use mailctl_server::db::{migrations, DatabaseConfig};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Create the mails table if it is missing
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = super::require_database_url(args.database_url)?;

    let pool = DatabaseConfig::new(database_url)
        .connect()
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;
    Ok(())
}
