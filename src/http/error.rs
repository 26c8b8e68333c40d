//! API error type with `IntoResponse`.
//!
//! Store failures are logged in full and answered with a fixed message; only
//! the constraint class ever reaches the client.

use super::envelope::Envelope;
use crate::error::{ConstraintKind, DbError};
use crate::models::ValidationError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{error, warn};

#[derive(Debug)]
pub enum ApiError {
    /// Payload or path failed validation (400)
    Validation(ValidationError),

    /// Body is not valid JSON for the expected shape (400)
    InvalidBody { reason: String },

    /// Keyed lookup matched no row (404)
    NotFound { resource: &'static str },

    /// No handler for method + path (404)
    RouteNotFound { path: String },

    /// Store failure (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn envelope(&self) -> Envelope {
        match self {
            Self::Validation(e) => {
                Envelope::failure(e.to_string()).with_details(json!({ "field": e.field() }))
            }
            Self::InvalidBody { reason } => Envelope::failure("Invalid request body")
                .with_details(json!({ "reason": reason })),
            Self::NotFound { resource } => Envelope::failure(format!("{} not found", resource)),
            Self::RouteNotFound { path } => {
                Envelope::failure("Route not found").with_path(path.clone())
            }
            Self::Database(DbError::Constraint { kind, .. }) => {
                Envelope::failure(constraint_message(*kind))
                    .with_details(json!({ "constraint": kind.as_str() }))
            }
            Self::Database(_) => Envelope::failure("Database operation failed"),
        }
    }

    fn log(&self) {
        match self {
            Self::Database(e @ DbError::Constraint { .. }) => {
                warn!(error = %e, sql_state = ?e.sql_state(), "Constraint violation");
            }
            Self::Database(e) => {
                error!(
                    error = %e,
                    sql_state = ?e.sql_state(),
                    suggestion = ?e.suggestion(),
                    "Database error"
                );
            }
            _ => {}
        }
    }
}

fn constraint_message(kind: ConstraintKind) -> &'static str {
    match kind {
        ConstraintKind::Unique => "A record with the same unique value already exists",
        ConstraintKind::ForeignKey => "Referenced record does not exist",
        ConstraintKind::NotNull | ConstraintKind::Check => "Request violates a data constraint",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        (self.status(), Json(self.envelope())).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_is_400_with_field() {
        let (status, body) =
            body_json(ApiError::Validation(ValidationError::Missing { field: "email" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "email is required");
        assert_eq!(body["details"]["field"], "email");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let (status, body) = body_json(ApiError::not_found("User")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn route_not_found_echoes_path() {
        let (status, body) = body_json(ApiError::RouteNotFound {
            path: "/widgets".into(),
        })
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Route not found");
        assert_eq!(body["path"], "/widgets");
    }

    #[tokio::test]
    async fn constraint_violation_hides_driver_message() {
        let err = DbError::constraint(
            ConstraintKind::Unique,
            "duplicate key value violates unique constraint \"users_email_key\"",
            Some("23505".into()),
        );
        let (status, body) = body_json(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["details"]["constraint"], "unique");
        assert!(!body.to_string().contains("users_email_key"));
    }

    #[tokio::test]
    async fn database_error_is_generic_500() {
        let err = DbError::database("relation \"users\" does not exist", None, "check");
        let (status, body) = body_json(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Database operation failed");
        assert!(!body.to_string().contains("relation"));
    }
}
