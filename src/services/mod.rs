//! Entity services wrapping the SQL statements for each table.

pub mod todos;
pub mod users;

pub use todos::TodoService;
pub use users::UserService;

use crate::db::DbPool;

/// Services shared by all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub users: UserService,
    pub todos: TodoService,
}

impl AppState {
    /// Build every service on top of one pool.
    pub fn new(pool: DbPool) -> Self {
        Self {
            users: UserService::new(pool.clone()),
            todos: TodoService::new(pool),
        }
    }
}
