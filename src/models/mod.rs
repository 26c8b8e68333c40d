//! Data models.
//!
//! Rows returned by the store and the validated inputs the services accept.

pub mod todo;
pub mod user;
pub mod validation;

pub use todo::{CreateTodoPayload, NewTodo, Todo, TodoChanges, UpdateTodoPayload};
pub use user::{CreateUserPayload, NewUser, UpdateUserPayload, User, UserChanges};
pub use validation::{FromPayload, ValidationError};
