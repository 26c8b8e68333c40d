//! `/todos` handlers.

use super::envelope::{Reply, created, ok};
use super::error::{ApiError, ApiResult};
use super::extract::{EntityId, ValidJson};
use crate::models::{NewTodo, Todo, TodoChanges};
use crate::services::AppState;
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use serde_json::Value;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_todos).post(create_todo))
        .route(
            "/{id}",
            get(get_single_todo).put(update_todo).delete(delete_todo),
        )
}

pub async fn create_todo(
    State(state): State<AppState>,
    ValidJson(todo): ValidJson<NewTodo>,
) -> ApiResult<Reply<Todo>> {
    let todo = state.todos.create_todo(&todo).await?;
    Ok(created("Todo created successfully", todo))
}

pub async fn get_todos(State(state): State<AppState>) -> ApiResult<Reply<Vec<Todo>>> {
    let todos = state.todos.get_todos().await?;
    Ok(ok("Todos retrieved successfully", todos))
}

pub async fn get_single_todo(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> ApiResult<Reply<Todo>> {
    let todo = state
        .todos
        .get_single_todo(id)
        .await?
        .ok_or(ApiError::not_found("Todo"))?;
    Ok(ok("Todo retrieved successfully", todo))
}

pub async fn update_todo(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidJson(changes): ValidJson<TodoChanges>,
) -> ApiResult<Reply<Todo>> {
    let todo = state
        .todos
        .update_todo(id, &changes)
        .await?
        .ok_or(ApiError::not_found("Todo"))?;
    Ok(ok("Todo updated successfully", todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> ApiResult<Reply<Vec<Value>>> {
    if state.todos.delete_todo(id).await? == 0 {
        return Err(ApiError::not_found("Todo"));
    }
    Ok(ok("Todo deleted successfully", Vec::new()))
}
