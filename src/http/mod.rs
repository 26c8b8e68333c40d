//! HTTP layer: router, handlers, extractors and the response envelope.

pub mod envelope;
pub mod error;
pub mod extract;
pub mod logging;
pub mod todos;
pub mod users;

pub use envelope::Envelope;
pub use error::{ApiError, ApiResult};

use crate::services::AppState;
use axum::extract::OriginalUri;
use axum::routing::get;
use axum::{Json, Router, middleware};

/// Build the application router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/users", users::routes())
        .nest("/todos", todos::routes())
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(middleware::from_fn(logging::log_requests))
        .with_state(state)
}

async fn root() -> Json<Envelope> {
    Json(Envelope::message("Todo API server is running"))
}

async fn route_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::RouteNotFound {
        path: uri.path().to_owned(),
    }
}
