//! PostgreSQL implementation of the tag repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Tag;
use crate::domain::repositories::TagRepository;
use crate::error::AppError;

pub struct PgTagRepository {
    pool: Arc<PgPool>,
}

impl PgTagRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn list(&self) -> Result<Vec<Tag>, AppError> {
        let rows = sqlx::query_as::<_, TagRow>("SELECT id, name, slug FROM tags ORDER BY name")
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, AppError> {
        let row = sqlx::query_as::<_, TagRow>("SELECT id, name, slug FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Tag::from))
    }

    async fn find_existing_ids(&self, ids: Vec<i64>) -> Result<Vec<i64>, AppError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let existing: Vec<i64> = sqlx::query_scalar("SELECT id FROM tags WHERE id = ANY($1)")
            .bind(&ids)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(existing)
    }

    async fn insert(&self, name: String, slug: String) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO tags (name, slug) VALUES ($1, $2) ON CONFLICT (slug) DO NOTHING",
        )
        .bind(name)
        .bind(slug)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(sqlx::FromRow)]
struct TagRow {
    id: i64,
    name: String,
    slug: String,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag {
            id: row.id,
            name: row.name,
            slug: row.slug,
        }
    }
}
