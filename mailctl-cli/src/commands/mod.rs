//! Command implementations for mailctl CLI

pub mod migrate;
pub mod serve;

pub use migrate::run_migrate;
pub use serve::run_serve;

use anyhow::{Context, Result};

/// Resolve the database URL from the flag (which already falls back to
/// `DATABASE_URL` through clap).
pub(crate) fn require_database_url(database_url: Option<String>) -> Result<String> {
    database_url.context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")
}
