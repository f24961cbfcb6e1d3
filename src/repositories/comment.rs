use crate::entities::{Comment, CommentStatus};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Read/write access to persisted comments, as needed by moderation and the
/// admin notification badge.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn count_by_status(&self, status: CommentStatus) -> Result<u64>;

    /// Oldest first, at most `limit` rows.
    async fn list_by_status(&self, status: CommentStatus, limit: i64) -> Result<Vec<Comment>>;

    /// Returns `false` when no comment has the given id.
    async fn update_status(&self, id: Uuid, status: CommentStatus) -> Result<bool>;

    /// Succeeds when the store answers and the comments table is readable.
    async fn ping(&self) -> Result<()>;
}

#[derive(Clone)]
pub struct CommentRepository {
    pool: Pool<Postgres>,
}

impl CommentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for CommentRepository {
    async fn count_by_status(&self, status: CommentStatus) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM comments
            WHERE status = $1
            "#,
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(u64::try_from(count)?)
    }

    async fn list_by_status(&self, status: CommentStatus, limit: i64) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, author_name, author_email, body, status, created_at, updated_at
            FROM comments
            WHERE status = $1
            ORDER BY created_at ASC
            LIMIT $2
            "#,
        )
        .bind(status)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn update_status(&self, id: Uuid, status: CommentStatus) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET status = $1, updated_at = now()
            WHERE id = $2
            "#,
        )
        .bind(status)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1 FROM comments LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;

        Ok(())
    }
}
