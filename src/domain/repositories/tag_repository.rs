//! Repository trait for tag reference data.

use crate::domain::entities::Tag;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the tag catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Tag>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, AppError>;

    /// Returns the subset of `ids` that actually exist.
    async fn find_existing_ids(&self, ids: Vec<i64>) -> Result<Vec<i64>, AppError>;

    /// Inserts a tag, skipping it if the name or slug already exists.
    /// Returns `true` when a row was inserted.
    async fn insert(&self, name: String, slug: String) -> Result<bool, AppError>;
}
