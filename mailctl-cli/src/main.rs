//! mailctl CLI - run and maintain the mail record service
//!
//! Subcommands:
//! - `serve`: run the HTTP API (PostgreSQL or in-memory store)
//! - `migrate`: create the `mails` table if it is missing

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "mailctl",
    author,
    version,
    about = "HTTP CRUD service for mail records backed by PostgreSQL"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces to an OTLP endpoint
    #[cfg(feature = "telemetry")]
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the mails table if it does not exist
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let tracing_config = tracing_setup::TracingConfig {
        debug: cli.debug,
        #[cfg(feature = "telemetry")]
        otel: cli.otel,
        ..Default::default()
    };
    tracing_setup::init(&tracing_config)?;

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Migrate(args) => commands::run_migrate(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
