//! Todo rows and request inputs.

use super::validation::{FromPayload, ValidationError, optional_text, required_id, required_text};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const MAX_TITLE_LEN: usize = 200;

/// A row of the `todos` table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    /// Nullable in the schema; rows are removed when the owner is deleted.
    pub user_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Body of `POST /todos`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoPayload {
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
}

impl NewTodo {
    pub fn new(user_id: i64, title: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            description: None,
            completed: false,
            due_date: None,
        }
    }
}

impl FromPayload for NewTodo {
    type Payload = CreateTodoPayload;

    fn from_payload(payload: CreateTodoPayload) -> Result<Self, ValidationError> {
        Ok(Self {
            user_id: required_id("user_id", payload.user_id)?,
            title: required_text("title", payload.title, MAX_TITLE_LEN)?,
            description: optional_text("description", payload.description, None)?,
            completed: payload.completed.unwrap_or(false),
            due_date: payload.due_date,
        })
    }
}

/// Body of `PUT /todos/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoPayload {
    pub title: Option<String>,
}

/// Validated new title for a todo. Other columns are never touched by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: String,
}

impl FromPayload for TodoChanges {
    type Payload = UpdateTodoPayload;

    fn from_payload(payload: UpdateTodoPayload) -> Result<Self, ValidationError> {
        Ok(Self {
            title: required_text("title", payload.title, MAX_TITLE_LEN)?,
        })
    }
}
