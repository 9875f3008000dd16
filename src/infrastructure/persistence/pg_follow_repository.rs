//! PostgreSQL implementation of the follow (subscription) repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::pg_user_repository::UserRow;
use crate::domain::entities::User;
use crate::domain::repositories::FollowRepository;
use crate::error::AppError;

pub struct PgFollowRepository {
    pool: Arc<PgPool>,
}

impl PgFollowRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    async fn add(&self, user_id: i64, following_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO follows (user_id, following_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, following_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(following_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, user_id: i64, following_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM follows WHERE user_id = $1 AND following_id = $2")
            .bind(user_id)
            .bind(following_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn followed_ids(&self, user_id: i64, author_ids: Vec<i64>) -> Result<Vec<i64>, AppError> {
        if author_ids.is_empty() {
            return Ok(vec![]);
        }

        let followed: Vec<i64> = sqlx::query_scalar(
            "SELECT following_id FROM follows WHERE user_id = $1 AND following_id = ANY($2)",
        )
        .bind(user_id)
        .bind(&author_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(followed)
    }

    async fn list_following(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.username, u.email, u.first_name, u.last_name, u.created_at
            FROM follows f
            JOIN users u ON u.id = f.following_id
            WHERE f.user_id = $1
            ORDER BY f.created_at, f.following_id
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn count_following(&self, user_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
