//! Mail storage abstraction

use async_trait::async_trait;

use crate::models::{Mail, MailId, MailPatch, NewMail};

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("mail {id} not found")]
    NotFound { id: MailId },
}

/// Single-table mail storage.
///
/// Each method is one unit of work: implementations acquire whatever they
/// need (a transaction, a lock) on entry and release it on every exit path.
#[async_trait]
pub trait MailStore: Send + Sync {
    /// Insert a new record. Storage assigns `id` and `date_creation`.
    async fn create(&self, mail: NewMail) -> Result<Mail, StoreError>;

    /// Fetch a record by primary key.
    async fn get(&self, id: MailId) -> Result<Mail, StoreError>;

    /// Fetch, apply `patch` with [`MailPatch::apply_to`], and persist.
    async fn update(&self, id: MailId, patch: &MailPatch) -> Result<Mail, StoreError>;

    /// Remove a record.
    async fn delete(&self, id: MailId) -> Result<(), StoreError>;

    /// Check that storage is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
