//! Database abstraction layer.
//!
//! - Backend dispatch macros and the `DatabaseType` enum
//! - The shared connection pool
//! - Table bootstrap

#[macro_use]
pub mod macros;
pub mod pool;
pub mod schema;

pub use macros::DatabaseType;
pub use pool::DbPool;
pub use schema::SchemaInitializer;
