//! Repository trait for favorite marks.

use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for `(user, recipe)` favorite pairs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Adds a favorite mark. Returns `false` if the pair already existed.
    async fn add(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError>;

    /// Removes a favorite mark. Returns `false` if the pair was absent.
    async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError>;

    /// Returns the subset of `recipe_ids` that `user_id` has favorited.
    ///
    /// Batch form used when decorating recipe listings.
    async fn marked_ids(&self, user_id: i64, recipe_ids: Vec<i64>) -> Result<Vec<i64>, AppError>;
}
