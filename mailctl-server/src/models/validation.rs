//! Request validation
//!
//! Payloads arrive as untyped JSON. Each request type reads its fields
//! through a [`FieldReader`], which records every problem it finds so the
//! client gets all violations in one response instead of the first one.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// Field name used for errors about the payload as a whole.
pub const BODY_FIELD: &str = "body";

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Validation failed with one or more field errors.
///
/// Never empty: constructors only produce it when something was wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    /// The payload was not a JSON object at all.
    pub fn malformed_body(reason: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(BODY_FIELD, reason)],
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Names of the offending fields, in the order they were checked.
    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.field).collect()
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", err.field, err.reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Types that can be built from a raw JSON payload.
pub trait FromPayload: Sized {
    fn from_payload(payload: &Value) -> Result<Self, ValidationError>;
}

/// Reads typed fields out of a JSON object, accumulating errors.
///
/// Call [`FieldReader::finish`] after reading every field; values returned
/// by the readers are only meaningful when `finish` succeeds.
pub struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    /// Start reading `payload`, which must be a JSON object.
    pub fn new(payload: &'a Value) -> Result<Self, ValidationError> {
        match payload {
            Value::Object(object) => Ok(Self {
                object,
                errors: Vec::new(),
            }),
            other => Err(ValidationError::malformed_body(format!(
                "expected a JSON object, got {}",
                json_kind(other)
            ))),
        }
    }

    /// Read a required, non-empty string.
    ///
    /// Returns an empty string when the field is invalid; the error is
    /// recorded and reported by `finish`.
    pub fn required_str(&mut self, field: &'static str) -> String {
        match self.object.get(field) {
            None | Some(Value::Null) => {
                self.errors.push(FieldError::new(field, "field required"));
                String::new()
            }
            Some(Value::String(s)) if s.is_empty() => {
                self.errors.push(FieldError::new(field, "must not be empty"));
                String::new()
            }
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                self.errors.push(FieldError::new(field, "must be a string"));
                String::new()
            }
        }
    }

    /// Read an optional string. Absent and `null` both mean "not provided";
    /// an empty string is returned as-is.
    pub fn optional_str(&mut self, field: &'static str) -> Option<String> {
        match self.object.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.errors.push(FieldError::new(field, "must be a string"));
                None
            }
        }
    }

    /// Fail with every recorded error, or succeed if there were none.
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
