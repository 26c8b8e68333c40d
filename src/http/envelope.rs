//! The JSON envelope wrapped around every response body.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

/// `{success, message, data?, details?, path?}`
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize = Value> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            details: None,
            path: None,
        }
    }
}

impl Envelope {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            details: None,
            path: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            details: None,
            path: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Handler return type for successful responses.
pub type Reply<T> = (StatusCode, Json<Envelope<T>>);

pub fn ok<T: Serialize>(message: &str, data: T) -> Reply<T> {
    (StatusCode::OK, Json(Envelope::success(message, data)))
}

pub fn created<T: Serialize>(message: &str, data: T) -> Reply<T> {
    (StatusCode::CREATED, Json(Envelope::success(message, data)))
}
