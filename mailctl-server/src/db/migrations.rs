//! Schema bootstrap for the `mails` table

use sqlx::PgPool;

use crate::Result;

/// Create the `mails` table if it does not exist yet. Safe to run on every
/// startup.
pub async fn run(pool: &PgPool) -> Result<()> {
    tracing::info!("Running mail migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS mails (
            id SERIAL PRIMARY KEY,
            header TEXT NOT NULL,
            description TEXT NOT NULL,
            sender TEXT,
            date_creation TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Mail migrations complete");
    Ok(())
}
