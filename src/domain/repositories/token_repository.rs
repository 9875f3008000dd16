//! Repository trait for API token authentication.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// API token metadata.
///
/// Only the HMAC-SHA256 hash of a token is stored; the raw value is shown
/// once at creation time and cannot be recovered.
#[derive(Debug, Clone)]
pub struct ApiToken {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Repository interface for API token management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Resolves a token hash to its owning user.
    ///
    /// Returns `Ok(None)` for unknown or revoked tokens.
    async fn find_user_by_hash(&self, token_hash: &str) -> Result<Option<User>, AppError>;

    /// Updates the `last_used_at` timestamp after successful authentication.
    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError>;

    /// Stores a new token hash for a user.
    async fn create_token(
        &self,
        user_id: i64,
        name: &str,
        token_hash: &str,
    ) -> Result<(), AppError>;

    /// Lists all tokens with their status.
    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError>;

    /// Revokes a token by name. Returns `false` if no active token matched.
    async fn revoke(&self, name: &str) -> Result<bool, AppError>;
}
