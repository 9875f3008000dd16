//! Authentication service for API token validation.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Hashes a raw token with HMAC-SHA256 under the server signing secret.
///
/// Returns a 64-character lowercase hex-encoded MAC. Shared with the admin
/// CLI so tokens created offline verify against the same stored hash.
pub fn hash_token(signing_secret: &str, token: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Service for authenticating API requests via Bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before
/// storage and comparison. An attacker with read-only access to the
/// database cannot verify or forge tokens without the server-side secret.
pub struct AuthService<R: TokenRepository> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: TokenRepository> AuthService<R> {
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Authenticates a raw token and resolves it to the owning user.
    ///
    /// On success, updates the token's `last_used_at` timestamp for audit
    /// purposes; a failure to do so does not fail the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for unknown or revoked tokens
    /// and [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        let user = self
            .repository
            .find_user_by_hash(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid or revoked token" }),
                )
            })?;

        let _ = self.repository.update_last_used(&token_hash).await;

        Ok(user)
    }
}
