//! User persistence. One parameterized statement per operation.

use crate::db::DbPool;
use crate::error::DbResult;
use crate::models::{NewUser, User, UserChanges};
use crate::with_pool;
use tracing::debug;

const INSERT_USER: &str = "INSERT INTO users (name, email, age, phone, address) \
     VALUES ($1, $2, $3, $4, $5) \
     RETURNING id, name, email, age, phone, address, created_at, updated_at";

const SELECT_USERS: &str = "SELECT id, name, email, age, phone, address, created_at, updated_at \
     FROM users ORDER BY id";

const SELECT_USER: &str = "SELECT id, name, email, age, phone, address, created_at, updated_at \
     FROM users WHERE id = $1";

const UPDATE_USER: &str = "UPDATE users SET name = $1, email = $2, updated_at = CURRENT_TIMESTAMP \
     WHERE id = $3 \
     RETURNING id, name, email, age, phone, address, created_at, updated_at";

const DELETE_USER: &str = "DELETE FROM users WHERE id = $1";

#[derive(Debug, Clone)]
pub struct UserService {
    pool: DbPool,
}

impl UserService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a user and return the stored row.
    ///
    /// Fails with a unique constraint violation when the email is taken.
    pub async fn create_user(&self, user: &NewUser) -> DbResult<User> {
        let created = with_pool!(&self.pool, p => {
            sqlx::query_as::<_, User>(INSERT_USER)
                .bind(&user.name)
                .bind(&user.email)
                .bind(user.age)
                .bind(&user.phone)
                .bind(&user.address)
                .fetch_one(p)
                .await?
        });
        debug!(user_id = created.id, "Inserted user");
        Ok(created)
    }

    /// All users, ordered by id.
    pub async fn get_users(&self) -> DbResult<Vec<User>> {
        let users = with_pool!(&self.pool, p => {
            sqlx::query_as::<_, User>(SELECT_USERS).fetch_all(p).await?
        });
        Ok(users)
    }

    pub async fn get_single_user(&self, id: i64) -> DbResult<Option<User>> {
        let user = with_pool!(&self.pool, p => {
            sqlx::query_as::<_, User>(SELECT_USER)
                .bind(id)
                .fetch_optional(p)
                .await?
        });
        Ok(user)
    }

    /// Overwrite name and email. Returns `None` when no row has this id.
    pub async fn update_user(&self, id: i64, changes: &UserChanges) -> DbResult<Option<User>> {
        let updated = with_pool!(&self.pool, p => {
            sqlx::query_as::<_, User>(UPDATE_USER)
                .bind(&changes.name)
                .bind(&changes.email)
                .bind(id)
                .fetch_optional(p)
                .await?
        });
        Ok(updated)
    }

    /// Delete a user and, through the foreign key, all of their todos.
    /// Returns the number of user rows removed.
    pub async fn delete_user(&self, id: i64) -> DbResult<u64> {
        let rows = with_pool!(&self.pool, p => {
            sqlx::query(DELETE_USER)
                .bind(id)
                .execute(p)
                .await?
                .rows_affected()
        });
        debug!(user_id = id, rows, "Deleted user");
        Ok(rows)
    }
}
