//! Connection settings for the PostgreSQL pool

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a request may wait for a free connection.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Where and how to connect to the `mails` database
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Cap the connection wait so it never outlasts the request timeout.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.acquire_timeout = self.acquire_timeout.min(request_timeout);
        self
    }

    /// Open the pool. Fails if the first connection cannot be made.
    pub async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        tracing::debug!(
            max_connections = self.max_connections,
            acquire_timeout_ms = self.acquire_timeout.as_millis() as u64,
            "connecting to mail database"
        );

        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .connect(&self.url)
            .await
    }
}
