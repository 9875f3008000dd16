//! Repository trait for author subscriptions.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for `(follower, author)` pairs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Records a subscription. Returns `false` if it already existed.
    async fn add(&self, user_id: i64, following_id: i64) -> Result<bool, AppError>;

    /// Removes a subscription. Returns `false` if it was absent.
    async fn remove(&self, user_id: i64, following_id: i64) -> Result<bool, AppError>;

    /// Returns the subset of `user_ids` that `user_id` follows.
    async fn followed_ids(&self, user_id: i64, user_ids: Vec<i64>) -> Result<Vec<i64>, AppError>;

    /// Lists the users `user_id` follows, oldest subscription first.
    async fn list_following(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<User>, AppError>;

    /// Counts the users `user_id` follows.
    async fn count_following(&self, user_id: i64) -> Result<i64, AppError>;
}
