//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user lookup and creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or email is taken.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;
}
