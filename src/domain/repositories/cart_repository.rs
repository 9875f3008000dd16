//! Repository trait for shopping cart entries.

use crate::domain::entities::CartLine;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for `(user, recipe)` shopping cart pairs.
///
/// Besides membership operations it exposes the raw ingredient lines of
/// everything in a user's cart; the grouping pass that turns those lines
/// into a shopping list lives in
/// [`crate::application::services::ShoppingListService`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Adds a cart entry. Returns `false` if the pair already existed.
    async fn add(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError>;

    /// Removes a cart entry. Returns `false` if the pair was absent.
    async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError>;

    /// Returns the subset of `recipe_ids` currently in `user_id`'s cart.
    async fn marked_ids(&self, user_id: i64, recipe_ids: Vec<i64>) -> Result<Vec<i64>, AppError>;

    /// Returns every ingredient line of every recipe in the user's cart,
    /// ungrouped. An empty cart yields an empty vector, not an error.
    async fn cart_lines(&self, user_id: i64) -> Result<Vec<CartLine>, AppError>;
}
