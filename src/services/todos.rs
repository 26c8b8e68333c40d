//! Todo persistence. One parameterized statement per operation.

use crate::db::DbPool;
use crate::error::DbResult;
use crate::models::{NewTodo, Todo, TodoChanges};
use crate::with_pool;
use tracing::debug;

const INSERT_TODO: &str = "INSERT INTO todos (user_id, title, description, completed, due_date) \
     VALUES ($1, $2, $3, $4, $5) \
     RETURNING id, user_id, title, description, completed, due_date, created_at, updated_at";

const SELECT_TODOS: &str = "SELECT id, user_id, title, description, completed, due_date, created_at, updated_at \
     FROM todos ORDER BY id";

const SELECT_TODO: &str = "SELECT id, user_id, title, description, completed, due_date, created_at, updated_at \
     FROM todos WHERE id = $1";

const UPDATE_TODO: &str = "UPDATE todos SET title = $1, updated_at = CURRENT_TIMESTAMP \
     WHERE id = $2 \
     RETURNING id, user_id, title, description, completed, due_date, created_at, updated_at";

const DELETE_TODO: &str = "DELETE FROM todos WHERE id = $1";

#[derive(Debug, Clone)]
pub struct TodoService {
    pool: DbPool,
}

impl TodoService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a todo for an existing user.
    ///
    /// An unknown `user_id` is rejected by the store as a foreign key violation.
    pub async fn create_todo(&self, todo: &NewTodo) -> DbResult<Todo> {
        let created = with_pool!(&self.pool, p => {
            sqlx::query_as::<_, Todo>(INSERT_TODO)
                .bind(todo.user_id)
                .bind(&todo.title)
                .bind(&todo.description)
                .bind(todo.completed)
                .bind(todo.due_date)
                .fetch_one(p)
                .await?
        });
        debug!(todo_id = created.id, user_id = todo.user_id, "Inserted todo");
        Ok(created)
    }

    pub async fn get_todos(&self) -> DbResult<Vec<Todo>> {
        let todos = with_pool!(&self.pool, p => {
            sqlx::query_as::<_, Todo>(SELECT_TODOS).fetch_all(p).await?
        });
        Ok(todos)
    }

    pub async fn get_single_todo(&self, id: i64) -> DbResult<Option<Todo>> {
        let todo = with_pool!(&self.pool, p => {
            sqlx::query_as::<_, Todo>(SELECT_TODO)
                .bind(id)
                .fetch_optional(p)
                .await?
        });
        Ok(todo)
    }

    /// Replace the title only.
    pub async fn update_todo(&self, id: i64, changes: &TodoChanges) -> DbResult<Option<Todo>> {
        let updated = with_pool!(&self.pool, p => {
            sqlx::query_as::<_, Todo>(UPDATE_TODO)
                .bind(&changes.title)
                .bind(id)
                .fetch_optional(p)
                .await?
        });
        Ok(updated)
    }

    pub async fn delete_todo(&self, id: i64) -> DbResult<u64> {
        let rows = with_pool!(&self.pool, p => {
            sqlx::query(DELETE_TODO)
                .bind(id)
                .execute(p)
                .await?
                .rows_affected()
        });
        debug!(todo_id = id, rows, "Deleted todo");
        Ok(rows)
    }
}
