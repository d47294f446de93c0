//! Mail record and its request types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;

use super::validation::{FieldReader, FromPayload, ValidationError};

/// Primary key of a mail record. Assigned by storage, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MailId(i32);

impl MailId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl FromStr for MailId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for MailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Mail record as stored in the `mails` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Mail {
    pub id: i32,
    pub header: String,
    pub description: String,
    /// Reserved column; nothing writes it yet.
    pub sender: Option<String>,
    pub date_creation: DateTime<Utc>,
}

impl Mail {
    pub fn mail_id(&self) -> MailId {
        MailId(self.id)
    }
}

/// Validated body of a create request.
///
/// # Rules
/// - `header` and `description` are required
/// - both must be non-empty strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMail {
    pub header: String,
    pub description: String,
}

impl FromPayload for NewMail {
    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut fields = FieldReader::new(payload)?;
        let header = fields.required_str("header");
        let description = fields.required_str("description");
        fields.finish()?;

        Ok(Self {
            header,
            description,
        })
    }
}

/// Validated body of a partial update. `None` means "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailPatch {
    pub header: Option<String>,
    pub description: Option<String>,
}

impl MailPatch {
    /// Apply the patch to a stored record.
    ///
    /// A field set to the empty string is treated the same as an absent
    /// one and leaves the stored value untouched. Returns whether anything
    /// changed.
    pub fn apply_to(&self, mail: &mut Mail) -> bool {
        let mut changed = false;

        if let Some(header) = self.header.as_deref().filter(|s| !s.is_empty()) {
            changed |= mail.header != header;
            mail.header = header.to_owned();
        }

        if let Some(description) = self.description.as_deref().filter(|s| !s.is_empty()) {
            changed |= mail.description != description;
            mail.description = description.to_owned();
        }

        changed
    }
}

impl FromPayload for MailPatch {
    fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let mut fields = FieldReader::new(payload)?;
        let header = fields.optional_str("header");
        let description = fields.optional_str("description");
        fields.finish()?;

        Ok(Self {
            header,
            description,
        })
    }
}
