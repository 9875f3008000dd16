//! Short link allocation and resolution.

use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_short_code, is_valid_short_code};
use crate::utils::original_url::validate_original_url;
use serde_json::json;

/// Service for allocating and resolving recipe short links.
pub struct ShortLinkService<S: ShortLinkRepository> {
    repository: Arc<S>,
}

impl<S: ShortLinkRepository> ShortLinkService<S> {
    pub fn new(repository: Arc<S>) -> Self {
        Self { repository }
    }

    /// Allocates a short link for a freshly created recipe.
    ///
    /// Draws a random 10-character alphanumeric code, checks the store,
    /// and redraws on collision. The check-then-insert pair is not atomic,
    /// so a concurrent allocator can still win the insert; the resulting
    /// unique-constraint conflict is treated exactly like a collision and
    /// triggers another draw. Collisions are recovered silently and never
    /// surfaced to the caller.
    ///
    /// The loop has no retry cap: with a 62^10 code space, termination is
    /// probabilistic but immediate in practice.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `original_url` is not an
    /// absolute http(s) URL, or [`AppError::Internal`] on database errors.
    pub async fn create_for_recipe(
        &self,
        recipe_id: i64,
        original_url: &str,
    ) -> Result<ShortLink, AppError> {
        let original_url = validate_original_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid original URL", json!({ "reason": e.to_string() }))
        })?;

        loop {
            let short_code = generate_short_code();

            if self.repository.find_by_code(&short_code).await?.is_some() {
                tracing::debug!("Short code collision, redrawing");
                continue;
            }

            match self
                .repository
                .insert(NewShortLink {
                    original_url: original_url.clone(),
                    short_code,
                    recipe_id,
                })
                .await
            {
                Ok(link) => return Ok(link),
                // Lost a race with a concurrent allocator; redraw.
                Err(AppError::Conflict { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Resolves a short code to its stored target URL. Pure read.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for malformed or unknown codes.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        if !is_valid_short_code(code) {
            return Err(not_found(code));
        }

        self.repository
            .find_by_code(code)
            .await?
            .map(|link| link.original_url)
            .ok_or_else(|| not_found(code))
    }

    /// Returns the short link created for a recipe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe has no short link.
    pub async fn get_for_recipe(&self, recipe_id: i64) -> Result<ShortLink, AppError> {
        self.repository
            .find_by_recipe(recipe_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Short link not found for recipe",
                    json!({ "recipe_id": recipe_id }),
                )
            })
    }

    /// Constructs the shareable URL for a code.
    pub fn short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/s/{}", base_url.trim_end_matches('/'), code)
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockShortLinkRepository;
    use chrono::Utc;

    fn stored(new_link: NewShortLink) -> ShortLink {
        ShortLink {
            id: 1,
            original_url: new_link.original_url,
            short_code: new_link.short_code,
            recipe_id: new_link.recipe_id,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_persists_generated_code() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_code().times(1).returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .returning(|new_link| Ok(stored(new_link)));

        let service = ShortLinkService::new(Arc::new(repo));
        let link = service
            .create_for_recipe(7, "https://example.com/api/recipes/7")
            .await
            .unwrap();

        assert_eq!(link.recipe_id, 7);
        assert_eq!(link.short_code.len(), 10);
        assert!(link.short_code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(link.original_url, "https://example.com/api/recipes/7");
    }

    #[tokio::test]
    async fn test_collision_triggers_silent_redraw() {
        // First draw collides with a pre-existing row; the second draw
        // succeeds and yields a distinct code.
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_code().times(1).returning(|code| {
            Ok(Some(ShortLink {
                id: 9,
                original_url: "https://example.com/api/recipes/1".to_string(),
                short_code: code.to_string(),
                recipe_id: 1,
                created_at: Utc::now(),
            }))
        });
        repo.expect_find_by_code().times(1).returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .returning(|new_link| Ok(stored(new_link)));

        let service = ShortLinkService::new(Arc::new(repo));
        let result = service
            .create_for_recipe(2, "https://example.com/api/recipes/2")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_insert_conflict_triggers_redraw() {
        // The existence check passes but a concurrent allocator wins the
        // insert; the conflict is recovered with another draw.
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_code().times(2).returning(|_| Ok(None));
        repo.expect_insert().times(1).returning(|_| {
            Err(AppError::conflict(
                "Unique constraint violation",
                serde_json::json!({ "constraint": "short_links_short_code_key" }),
            ))
        });
        repo.expect_insert()
            .times(1)
            .returning(|new_link| Ok(stored(new_link)));

        let service = ShortLinkService::new(Arc::new(repo));
        let result = service
            .create_for_recipe(3, "https://example.com/api/recipes/3")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_url() {
        let repo = MockShortLinkRepository::new();
        let service = ShortLinkService::new(Arc::new(repo));

        let result = service.create_for_recipe(1, "not a url").await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_resolve_returns_original_url() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_code()
            .withf(|code| code == "AbC123xyz0")
            .times(1)
            .returning(|code| {
                Ok(Some(ShortLink {
                    id: 4,
                    original_url: "https://example.com/api/recipes/4".to_string(),
                    short_code: code.to_string(),
                    recipe_id: 4,
                    created_at: Utc::now(),
                }))
            });

        let service = ShortLinkService::new(Arc::new(repo));
        let url = service.resolve("AbC123xyz0").await.unwrap();

        assert_eq!(url, "https://example.com/api/recipes/4");
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_is_not_found() {
        let mut repo = MockShortLinkRepository::new();
        repo.expect_find_by_code().times(1).returning(|_| Ok(None));

        let service = ShortLinkService::new(Arc::new(repo));
        let result = service.resolve("AAAAAAAAAA").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_malformed_code_skips_store_lookup() {
        // No expectation on find_by_code: a malformed code never reaches
        // the repository.
        let repo = MockShortLinkRepository::new();

        let service = ShortLinkService::new(Arc::new(repo));
        let result = service.resolve("nope").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[test]
    fn test_short_url_format() {
        let service = ShortLinkService::new(Arc::new(MockShortLinkRepository::new()));

        assert_eq!(
            service.short_url("https://food.example.com/", "AbC123xyz0"),
            "https://food.example.com/s/AbC123xyz0"
        );
        assert_eq!(
            service.short_url("https://food.example.com", "AbC123xyz0"),
            "https://food.example.com/s/AbC123xyz0"
        );
    }
}
