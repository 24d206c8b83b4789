//! SQLite User Repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::FromRow;

use super::support::db_error;
use super::DbPool;
use crate::application::ports::{RepositoryError, UserRecord, UserRepositoryPort};
use crate::domain::profile::UserProfile;

#[derive(FromRow)]
struct UserRow {
    id: i64,
    username: String,
    avatar_url: String,
    email: String,
    phone: String,
    introduction: String,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            id: row.id as u64,
            username: row.username,
            avatar_url: row.avatar_url,
            email: row.email,
            phone: row.phone,
            introduction: row.introduction,
        }
    }
}

fn unique_violation(username: &str) -> impl FnOnce(sqlx::Error) -> RepositoryError + '_ {
    move |e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Duplicate(format!("User {}", username))
        }
        other => db_error(other),
    }
}

/// SQLite User Repository
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_id_by(&self, column: &str, value: &str) -> Result<Option<u64>, RepositoryError> {
        let id: Option<i64> =
            sqlx::query_scalar(&format!("SELECT id FROM users WHERE {} = ?", column))
                .bind(value)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(id.map(|id| id as u64))
    }
}

#[async_trait]
impl UserRepositoryPort for SqliteUserRepository {
    async fn find_by_id(&self, id: u64) -> Result<Option<UserRecord>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, avatar_url, email, phone, introduction FROM users WHERE id = ?",
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(UserRecord::from))
    }

    async fn find_id_by_username(&self, username: &str) -> Result<Option<u64>, RepositoryError> {
        self.find_id_by("username", username).await
    }

    async fn find_id_by_email(&self, email: &str) -> Result<Option<u64>, RepositoryError> {
        if email.is_empty() {
            return Ok(None);
        }
        self.find_id_by("email", email).await
    }

    async fn create(&self, username: &str, avatar_url: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO users (username, avatar_url, created_at) VALUES (?, ?, ?)",
        )
        .bind(username)
        .bind(avatar_url)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(unique_violation(username))?;

        Ok(result.last_insert_rowid() as u64)
    }

    async fn update_profile(&self, id: u64, profile: &UserProfile) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE users SET username = ?, email = ?, phone = ?, introduction = ? WHERE id = ?",
        )
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(&profile.introduction)
        .bind(id as i64)
        .execute(&self.pool)
        .await
        .map_err(unique_violation(&profile.username))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("User {}", id)));
        }
        Ok(())
    }

    async fn update_avatar(&self, id: u64, avatar_url: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET avatar_url = ? WHERE id = ?")
            .bind(avatar_url)
            .bind(id as i64)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("User {}", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id as i64)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("User {}", id)));
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(total as u64)
    }
}
