//! Repository trait for recipe data access.

use crate::domain::entities::{NewRecipe, Recipe, RecipeFilter, RecipeSummary};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recipes and their ingredient lines.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRecipeRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Creates a recipe together with its tag links and ingredient lines
    /// in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. Referenced tag
    /// and ingredient ids must already be validated by the caller.
    async fn create(&self, new_recipe: NewRecipe) -> Result<Recipe, AppError>;

    /// Replaces the mutable fields of an existing recipe: name, text,
    /// cooking time, tag set, and the full list of ingredient lines.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no recipe matches `id`.
    async fn update(&self, id: i64, changes: NewRecipe) -> Result<Recipe, AppError>;

    /// Deletes a recipe; child rows (lines, tags, marks, short links)
    /// cascade at the storage layer.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` if the id was
    /// unknown.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Fetches a recipe with its author, tags, and ingredient lines.
    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, AppError>;

    /// Lists recipes matching `filter`, newest first.
    async fn list(
        &self,
        filter: RecipeFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Recipe>, AppError>;

    /// Counts recipes matching `filter`.
    async fn count(&self, filter: RecipeFilter) -> Result<i64, AppError>;

    /// Lists up to `limit` of an author's recipes, newest first.
    ///
    /// Used for subscription previews.
    async fn list_by_author(
        &self,
        author_id: i64,
        limit: i64,
    ) -> Result<Vec<RecipeSummary>, AppError>;

    /// Counts all recipes by an author.
    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError>;
}
