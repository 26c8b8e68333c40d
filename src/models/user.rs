//! User rows and request inputs.

use super::validation::{
    FromPayload, ValidationError, optional_text, required_email, required_text,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 150;
pub const MAX_PHONE_LEN: usize = 15;
pub const MAX_AGE: i64 = 150;

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Body of `POST /users`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Validated input for inserting a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age: None,
            phone: None,
            address: None,
        }
    }
}

impl FromPayload for NewUser {
    type Payload = CreateUserPayload;

    fn from_payload(payload: CreateUserPayload) -> Result<Self, ValidationError> {
        let name = required_text("name", payload.name, MAX_NAME_LEN)?;
        let email = required_email("email", payload.email, MAX_EMAIL_LEN)?;
        let age = match payload.age {
            None => None,
            Some(age) if (0..=MAX_AGE).contains(&age) => Some(age as i32),
            Some(_) => {
                return Err(ValidationError::OutOfRange {
                    field: "age",
                    min: 0,
                    max: MAX_AGE,
                });
            }
        };

        Ok(Self {
            name,
            email,
            age,
            phone: optional_text("phone", payload.phone, Some(MAX_PHONE_LEN))?,
            address: optional_text("address", payload.address, None)?,
        })
    }
}

/// Body of `PUT /users/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Validated replacement values for a user's name and email.
///
/// Both fields are required so an update never writes a null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
}

impl FromPayload for UserChanges {
    type Payload = UpdateUserPayload;

    fn from_payload(payload: UpdateUserPayload) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", payload.name, MAX_NAME_LEN)?,
            email: required_email("email", payload.email, MAX_EMAIL_LEN)?,
        })
    }
}
