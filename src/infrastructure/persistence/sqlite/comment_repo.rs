//! SQLite Comment Repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::FromRow;

use super::support::{db_error, format_date, parse_date};
use super::DbPool;
use crate::application::ports::{
    CommentRecord, CommentRepositoryPort, CommentView, RepositoryError,
};
use crate::domain::catalog::CommentTarget;

/// 评论者已注销时名称与头像为空
#[derive(FromRow)]
struct CommentViewRow {
    id: i64,
    username: String,
    user_avatar: String,
    content: String,
    created_at: String,
    like_count: i64,
}

impl TryFrom<CommentViewRow> for CommentView {
    type Error = RepositoryError;

    fn try_from(row: CommentViewRow) -> Result<Self, Self::Error> {
        let create_time = parse_date(Some(row.created_at))?.ok_or_else(|| {
            RepositoryError::SerializationError(format!("comment {} has no date", row.id))
        })?;

        Ok(CommentView {
            comment_id: row.id as u64,
            username: row.username,
            user_avatar: row.user_avatar,
            content: row.content,
            create_time,
            like_count: row.like_count.max(0) as u64,
        })
    }
}

#[derive(FromRow)]
struct CommentRow {
    id: i64,
    user_id: i64,
    kind: i64,
    target_id: i64,
    like_count: i64,
}

impl TryFrom<CommentRow> for CommentRecord {
    type Error = RepositoryError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        let target = CommentTarget::from_parts(row.kind, row.target_id as u64).ok_or_else(|| {
            RepositoryError::SerializationError(format!("invalid comment kind: {}", row.kind))
        })?;

        Ok(CommentRecord {
            id: row.id as u64,
            user_id: row.user_id as u64,
            target,
            like_count: row.like_count.max(0) as u64,
        })
    }
}

/// SQLite Comment Repository
pub struct SqliteCommentRepository {
    pool: DbPool,
}

impl SqliteCommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepositoryPort for SqliteCommentRepository {
    async fn find_by_target(
        &self,
        target: CommentTarget,
    ) -> Result<Vec<CommentView>, RepositoryError> {
        let rows: Vec<CommentViewRow> = sqlx::query_as(
            r#"
            SELECT c.id, COALESCE(u.username, '') AS username,
                   COALESCE(u.avatar_url, '') AS user_avatar,
                   c.content, c.created_at, c.like_count
            FROM comments c LEFT JOIN users u ON u.id = c.user_id
            WHERE c.kind = ? AND c.target_id = ?
            ORDER BY c.id DESC
            "#,
        )
        .bind(target.kind_code())
        .bind(target.id() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(CommentView::try_from).collect()
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<CommentRecord>, RepositoryError> {
        let row: Option<CommentRow> = sqlx::query_as(
            "SELECT id, user_id, kind, target_id, like_count FROM comments WHERE id = ?",
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(CommentRecord::try_from).transpose()
    }

    async fn create(
        &self,
        user_id: u64,
        target: CommentTarget,
        content: &str,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO comments (user_id, kind, target_id, content, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user_id as i64)
        .bind(target.kind_code())
        .bind(target.id() as i64)
        .bind(content)
        .bind(format_date(Some(Utc::now().date_naive())))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.last_insert_rowid() as u64)
    }

    async fn delete(&self, id: u64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id as i64)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Comment {}", id)));
        }
        Ok(())
    }

    async fn increment_likes(&self, id: u64) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE comments SET like_count = like_count + 1 WHERE id = ?")
            .bind(id as i64)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Comment {}", id)));
        }
        Ok(())
    }

    async fn decrement_likes(&self, id: u64) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE comments SET like_count = like_count - 1 WHERE id = ? AND like_count > 0",
        )
        .bind(id as i64)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_user(&self, user_id: u64) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM comments WHERE user_id = ?")
            .bind(user_id as i64)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}
