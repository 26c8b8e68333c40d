//! Custom Axum extractors that validate before the handler runs.

use super::error::ApiError;
use crate::models::{FromPayload, ValidationError};
use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;

/// JSON body deserialized into `T::Payload` and validated into `T`.
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: FromPayload,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T::Payload>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::InvalidBody {
                reason: rejection.body_text(),
            })?;

        Ok(Self(T::from_payload(payload)?))
    }
}

/// Positive integer `{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i64);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ValidationError::Missing { field: "id" })?;

        raw.parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or_else(|| {
                ValidationError::InvalidFormat {
                    field: "id",
                    reason: "must be a positive integer",
                }
                .into()
            })
    }
}
