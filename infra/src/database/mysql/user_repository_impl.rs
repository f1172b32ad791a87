//! MySQL implementation of the UserRepository trait.
//!
//! Phone number uniqueness is enforced by the `uq_users_phone_number` index;
//! `create` never reads before inserting.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sepm_core::domain::entities::user::User;
use sepm_core::errors::{AuthError, DomainError};
use sepm_core::repositories::UserRepository;

use super::{decode_error, storage_error};

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| decode_error("id", e))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| decode_error("id", e))?,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| decode_error("phone_number", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| decode_error("created_at", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            "SELECT id, phone_number, created_at FROM users WHERE phone_number = ?",
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("find user by phone", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let result = sqlx::query(
            "INSERT INTO users (id, phone_number, created_at) VALUES (?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.phone_number)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                tracing::info!(user_id = %user.id, event = "user_created", "Inserted user");
                Ok(user)
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AuthError::DuplicatePhone.into())
            }
            Err(e) => Err(storage_error("create user", e)),
        }
    }

    async fn count_by_phone(&self, phone_number: &str) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users WHERE phone_number = ?")
            .bind(phone_number)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("count users", e))?;

        let count: i64 = row.try_get("count").map_err(|e| decode_error("count", e))?;
        Ok(count.max(0) as u64)
    }
}
