//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Persists a freshly allocated short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if another allocator inserted the
    /// same code between the caller's existence check and this insert.
    /// The caller treats that as a collision and redraws.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Looks up a short link by its code. Pure read.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Looks up the short link created for a recipe.
    async fn find_by_recipe(&self, recipe_id: i64) -> Result<Option<ShortLink>, AppError>;
}
