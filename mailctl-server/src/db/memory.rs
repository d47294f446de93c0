//! In-process mail store
//!
//! Backs tests and `mailctl serve --in-memory`. Ids come from a counter that
//! only moves forward, so deleted ids are never handed out again.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use super::store::{MailStore, StoreError};
use crate::models::{Mail, MailId, MailPatch, NewMail};

#[derive(Default)]
struct Inner {
    last_id: i32,
    mails: BTreeMap<MailId, Mail>,
}

/// Mutex-guarded map of mails keyed by id
#[derive(Default)]
pub struct MemoryMailStore {
    inner: Mutex<Inner>,
}

impl MemoryMailStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mails.
    pub fn len(&self) -> usize {
        self.lock().mails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // a panicking writer cannot leave a half-applied record behind
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl MailStore for MemoryMailStore {
    async fn create(&self, mail: NewMail) -> Result<Mail, StoreError> {
        let mut inner = self.lock();
        inner.last_id += 1;

        let created = Mail {
            id: inner.last_id,
            header: mail.header,
            description: mail.description,
            sender: None,
            date_creation: Utc::now(),
        };
        inner.mails.insert(created.mail_id(), created.clone());

        tracing::debug!(mail_id = created.id, "mail created");
        Ok(created)
    }

    async fn get(&self, id: MailId) -> Result<Mail, StoreError> {
        self.lock()
            .mails
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn update(&self, id: MailId, patch: &MailPatch) -> Result<Mail, StoreError> {
        let mut inner = self.lock();
        let mail = inner.mails.get_mut(&id).ok_or(StoreError::NotFound { id })?;
        patch.apply_to(mail);

        tracing::debug!(mail_id = %id, "mail updated");
        Ok(mail.clone())
    }

    async fn delete(&self, id: MailId) -> Result<(), StoreError> {
        if self.lock().mails.remove(&id).is_none() {
            return Err(StoreError::NotFound { id });
        }

        tracing::debug!(mail_id = %id, "mail deleted");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
