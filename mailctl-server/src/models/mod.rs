//! Domain models with validation at construction
//!
//! Request bodies are checked field by field before any storage access.
//! Invalid input returns ValidationError, not panic.

pub mod mail;
pub mod validation;

pub use mail::{Mail, MailId, MailPatch, NewMail};
pub use validation::{FieldError, FieldReader, FromPayload, ValidationError};
