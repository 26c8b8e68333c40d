//! Table bootstrap for the `users` and `todos` tables.
//!
//! Statements are idempotent and run in dependency order: `todos` holds a
//! foreign key to `users` with `ON DELETE CASCADE`.

use crate::db::pool::DbPool;
use crate::error::{DbError, DbResult};
use tracing::{debug, info};

/// Tables managed by the initializer, in creation order.
pub const TABLES: [&str; 2] = ["users", "todos"];

const PG_CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    email VARCHAR(150) UNIQUE NOT NULL,
    age INT,
    phone VARCHAR(15),
    address TEXT,
    created_at TIMESTAMP NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMP NOT NULL DEFAULT NOW()
)"#;

const PG_CREATE_TODOS: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT REFERENCES users(id) ON DELETE CASCADE,
    title VARCHAR(200) NOT NULL,
    description TEXT,
    completed BOOLEAN NOT NULL DEFAULT false,
    due_date DATE,
    created_at TIMESTAMP NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMP NOT NULL DEFAULT NOW()
)"#;

const SQLITE_CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(100) NOT NULL,
    email VARCHAR(150) UNIQUE NOT NULL,
    age INTEGER,
    phone VARCHAR(15),
    address TEXT,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)"#;

const SQLITE_CREATE_TODOS: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER REFERENCES users(id) ON DELETE CASCADE,
    title VARCHAR(200) NOT NULL,
    description TEXT,
    completed BOOLEAN NOT NULL DEFAULT 0,
    due_date DATE,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)"#;

/// Creates the application tables before the listener starts.
#[derive(Debug, Clone)]
pub struct SchemaInitializer {
    pool: DbPool,
}

impl SchemaInitializer {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Ensure both tables exist. Safe to call repeatedly.
    pub async fn initialize(&self) -> DbResult<()> {
        let statements = impl_db_dispatch!(&self.pool, {
            Postgres(_p) => [PG_CREATE_USERS, PG_CREATE_TODOS],
            SQLite(_p) => [SQLITE_CREATE_USERS, SQLITE_CREATE_TODOS],
        });

        for (table, ddl) in TABLES.iter().zip(statements) {
            debug!(table = %table, "Ensuring table exists");
            with_pool!(&self.pool, p => sqlx::query(ddl).execute(p).await.map(|_| ()))
                .map_err(|e| DbError::schema(format!("Failed to create table: {}", e), *table))?;
        }

        info!(db_type = %self.pool.db_type(), "Schema initialized");
        Ok(())
    }

    /// Names of the managed tables that currently exist.
    pub async fn existing_tables(&self) -> DbResult<Vec<String>> {
        let names = impl_db_dispatch!(&self.pool, {
            Postgres(p) => {
                sqlx::query_scalar::<_, String>(
                    "SELECT table_name::text FROM information_schema.tables \
                     WHERE table_schema = current_schema() AND table_name IN ('users', 'todos')",
                )
                .fetch_all(p)
                .await?
            },
            SQLite(p) => {
                sqlx::query_scalar::<_, String>(
                    "SELECT name FROM sqlite_master \
                     WHERE type = 'table' AND name IN ('users', 'todos')",
                )
                .fetch_all(p)
                .await?
            },
        });

        // Report in creation order regardless of catalog order
        Ok(TABLES
            .iter()
            .filter(|t| names.iter().any(|n| n == *t))
            .map(|t| t.to_string())
            .collect())
    }
}
