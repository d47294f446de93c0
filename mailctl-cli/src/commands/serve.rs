//! HTTP server command for the mail API

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use mailctl_server::db::{migrations, DatabaseConfig, MemoryMailStore, PgMailStore};
use mailctl_server::{run_server, AppState, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "MAILCTL_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections
    #[arg(long, env = "MAILCTL_MAX_CONNECTIONS", default_value = "5")]
    pub max_connections: u32,

    /// Request timeout in seconds
    #[arg(long, env = "MAILCTL_TIMEOUT", default_value = "30")]
    pub timeout: u64,

    /// Keep mails in process memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub in_memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_secs(args.timeout),
    };

    let state = if args.in_memory {
        tracing::warn!("Using in-memory store - mails are lost on shutdown");
        AppState::new(MemoryMailStore::new())
    } else {
        let database_url = super::require_database_url(args.database_url)?;

        let pool = DatabaseConfig::new(database_url)
            .with_max_connections(args.max_connections)
            .with_request_timeout(config.request_timeout)
            .connect()
            .await
            .context("Failed to create database pool")?;

        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;

        AppState::new(PgMailStore::new(pool))
    };

    tracing::info!("Starting mailctl server on {}", args.bind);

    // Run server (blocks until shutdown)
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
