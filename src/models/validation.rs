//! Payload validation.
//!
//! Request bodies deserialize into payload structs whose fields are all
//! optional, then [`FromPayload`] turns them into typed inputs or a
//! [`ValidationError`] naming the offending field.

use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex")
});

/// Validation error for request payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
}

impl ValidationError {
    /// The request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::Empty { field }
            | Self::TooLong { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::OutOfRange { field, .. } => field,
        }
    }
}

/// A typed input built from a deserialized request body.
pub trait FromPayload: Sized {
    type Payload: DeserializeOwned;

    fn from_payload(payload: Self::Payload) -> Result<Self, ValidationError>;
}

/// Require a non-blank string of at most `max` characters, trimmed.
pub fn required_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

/// Optional string with a length cap; blank strings become `None`.
pub fn optional_text(
    field: &'static str,
    value: Option<String>,
    max: Option<usize>,
) -> Result<Option<String>, ValidationError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Some(max) = max {
        if trimmed.chars().count() > max {
            return Err(ValidationError::TooLong { field, max });
        }
    }
    Ok(Some(trimmed.to_owned()))
}

pub fn required_email(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<String, ValidationError> {
    let email = required_text(field, value, max)?;
    if !EMAIL_RE.is_match(&email) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a valid email address",
        });
    }
    Ok(email)
}

/// Require a positive identifier.
pub fn required_id(field: &'static str, value: Option<i64>) -> Result<i64, ValidationError> {
    match value {
        None => Err(ValidationError::Missing { field }),
        Some(id) if id > 0 => Ok(id),
        Some(_) => Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a positive integer",
        }),
    }
}
