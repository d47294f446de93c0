//! PostgreSQL mail store
//!
//! One transaction per call. Reads in `update` do not take row locks, so two
//! concurrent patches of the same mail resolve as last-writer-wins.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::store::{MailStore, StoreError};
use crate::models::{Mail, MailId, MailPatch, NewMail};

/// Mail store backed by the `mails` table
#[derive(Clone)]
pub struct PgMailStore {
    pool: PgPool,
}

impl PgMailStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch(tx: &mut Transaction<'_, Postgres>, id: MailId) -> Result<Mail, StoreError> {
        sqlx::query_as::<_, Mail>(
            r#"
            SELECT id, header, description, sender, date_creation
            FROM mails
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(StoreError::NotFound { id })
    }
}

#[async_trait]
impl MailStore for PgMailStore {
    async fn create(&self, mail: NewMail) -> Result<Mail, StoreError> {
        let mut tx = self.pool.begin().await?;

        let created: Mail = sqlx::query_as(
            r#"
            INSERT INTO mails (header, description)
            VALUES ($1, $2)
            RETURNING id, header, description, sender, date_creation
            "#,
        )
        .bind(&mail.header)
        .bind(&mail.description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(mail_id = created.id, "mail created");
        Ok(created)
    }

    async fn get(&self, id: MailId) -> Result<Mail, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mail = Self::fetch(&mut tx, id).await?;
        tx.commit().await?;
        Ok(mail)
    }

    async fn update(&self, id: MailId, patch: &MailPatch) -> Result<Mail, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mut mail = Self::fetch(&mut tx, id).await?;

        if patch.apply_to(&mut mail) {
            sqlx::query(
                r#"
                UPDATE mails
                SET header = $2, description = $3
                WHERE id = $1
                "#,
            )
            .bind(id.get())
            .bind(&mail.header)
            .bind(&mail.description)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(mail_id = %id, "mail updated");
        Ok(mail)
    }

    async fn delete(&self, id: MailId) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM mails WHERE id = $1")
            .bind(id.get())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // dropping the transaction rolls it back
            return Err(StoreError::NotFound { id });
        }

        tx.commit().await?;
        tracing::debug!(mail_id = %id, "mail deleted");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
