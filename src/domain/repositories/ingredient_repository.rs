//! Repository trait for ingredient reference data.

use crate::domain::entities::Ingredient;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the ingredient catalog.
///
/// The catalog is read-only for API traffic; writes happen through the
/// admin import command.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Lists ingredients, optionally filtered by a name search term.
    ///
    /// When `name` is given, matches are case-insensitive substring hits
    /// with prefix matches ordered first.
    async fn list(&self, name: Option<String>) -> Result<Vec<Ingredient>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Ingredient>, AppError>;

    /// Returns the subset of `ids` that actually exist.
    ///
    /// Used to reject recipe payloads referencing unknown ingredients.
    async fn find_existing_ids(&self, ids: Vec<i64>) -> Result<Vec<i64>, AppError>;

    /// Bulk-inserts `(name, measurement_unit)` pairs, skipping rows that
    /// already exist. Returns the number of rows inserted.
    async fn insert_many(&self, items: Vec<(String, String)>) -> Result<u64, AppError>;
}
