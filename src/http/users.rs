//! `/users` handlers.

use super::envelope::{Reply, created, ok};
use super::error::{ApiError, ApiResult};
use super::extract::{EntityId, ValidJson};
use crate::models::{NewUser, User, UserChanges};
use crate::services::AppState;
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use serde_json::Value;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users).post(create_user))
        .route(
            "/{id}",
            get(get_single_user).put(update_user).delete(delete_user),
        )
}

pub async fn create_user(
    State(state): State<AppState>,
    ValidJson(user): ValidJson<NewUser>,
) -> ApiResult<Reply<User>> {
    let user = state.users.create_user(&user).await?;
    Ok(created("User created successfully", user))
}

pub async fn get_users(State(state): State<AppState>) -> ApiResult<Reply<Vec<User>>> {
    let users = state.users.get_users().await?;
    Ok(ok("Users retrieved successfully", users))
}

pub async fn get_single_user(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> ApiResult<Reply<User>> {
    let user = state
        .users
        .get_single_user(id)
        .await?
        .ok_or(ApiError::not_found("User"))?;
    Ok(ok("User fetched successfully", user))
}

pub async fn update_user(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidJson(changes): ValidJson<UserChanges>,
) -> ApiResult<Reply<User>> {
    let user = state
        .users
        .update_user(id, &changes)
        .await?
        .ok_or(ApiError::not_found("User"))?;
    Ok(ok("User updated successfully", user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> ApiResult<Reply<Vec<Value>>> {
    if state.users.delete_user(id).await? == 0 {
        return Err(ApiError::not_found("User"));
    }
    Ok(ok("User deleted successfully", Vec::new()))
}
