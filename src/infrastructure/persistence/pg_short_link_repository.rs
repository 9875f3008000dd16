//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

const LINK_SELECT: &str =
    "SELECT id, original_url, short_code, recipe_id, created_at FROM short_links";

pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    /// Inserts a new mapping. A unique violation on the short code is
    /// surfaced as `Conflict` so the caller can draw a fresh code.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO short_links (original_url, short_code, recipe_id)
            VALUES ($1, $2, $3)
            RETURNING id, original_url, short_code, recipe_id, created_at
            "#,
        )
        .bind(&new_link.original_url)
        .bind(&new_link.short_code)
        .bind(new_link.recipe_id)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|err| {
            if let sqlx::Error::Database(db) = &err
                && db.is_unique_violation()
                && db.constraint() == Some("short_links_short_code_key")
            {
                return AppError::conflict(
                    "Short code already taken",
                    json!({ "short_code": new_link.short_code }),
                );
            }
            AppError::from(err)
        })?;

        Ok(ShortLink::from(row))
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(&format!("{LINK_SELECT} WHERE short_code = $1"))
            .bind(short_code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn find_by_recipe(&self, recipe_id: i64) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(&format!(
            "{LINK_SELECT} WHERE recipe_id = $1 ORDER BY id LIMIT 1"
        ))
        .bind(recipe_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortLink::from))
    }
}

#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    original_url: String,
    short_code: String,
    recipe_id: i64,
    created_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink {
            id: row.id,
            original_url: row.original_url,
            short_code: row.short_code,
            recipe_id: row.recipe_id,
            created_at: row.created_at,
        }
    }
}
