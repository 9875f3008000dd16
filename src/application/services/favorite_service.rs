//! Favorite marks on recipes.

use std::sync::Arc;

use crate::domain::entities::Recipe;
use crate::domain::repositories::{FavoriteRepository, RecipeRepository};
use crate::error::AppError;
use serde_json::json;

/// Service for adding and removing favorite marks.
pub struct FavoriteService<F: FavoriteRepository, R: RecipeRepository> {
    favorite_repository: Arc<F>,
    recipe_repository: Arc<R>,
}

impl<F: FavoriteRepository, R: RecipeRepository> FavoriteService<F, R> {
    pub fn new(favorite_repository: Arc<F>, recipe_repository: Arc<R>) -> Self {
        Self {
            favorite_repository,
            recipe_repository,
        }
    }

    /// Marks a recipe as a favorite and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown recipe and
    /// [`AppError::Validation`] if the mark already exists.
    pub async fn add(&self, user_id: i64, recipe_id: i64) -> Result<Recipe, AppError> {
        let recipe = self.get_recipe(recipe_id).await?;

        let added = self.favorite_repository.add(user_id, recipe_id).await?;
        if !added {
            return Err(AppError::bad_request(
                "Recipe is already favorited",
                json!({ "recipe_id": recipe_id }),
            ));
        }

        Ok(recipe)
    }

    /// Removes a favorite mark.
    pub async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<(), AppError> {
        self.get_recipe(recipe_id).await?;

        let removed = self.favorite_repository.remove(user_id, recipe_id).await?;
        if !removed {
            return Err(AppError::bad_request(
                "Recipe is not in favorites",
                json!({ "recipe_id": recipe_id }),
            ));
        }

        Ok(())
    }

    /// Returns the subset of `recipe_ids` that `user_id` has favorited.
    pub async fn favorited_ids(
        &self,
        user_id: i64,
        recipe_ids: Vec<i64>,
    ) -> Result<Vec<i64>, AppError> {
        self.favorite_repository.marked_ids(user_id, recipe_ids).await
    }

    async fn get_recipe(&self, recipe_id: i64) -> Result<Recipe, AppError> {
        self.recipe_repository
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Recipe not found", json!({ "recipe_id": recipe_id }))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;
    use crate::domain::repositories::{MockFavoriteRepository, MockRecipeRepository};
    use chrono::Utc;

    fn test_recipe(id: i64) -> Recipe {
        Recipe {
            id,
            author: User {
                id: 1,
                username: "chef".to_string(),
                email: "chef@example.com".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                created_at: Utc::now(),
            },
            name: "Pie".to_string(),
            text: "Bake.".to_string(),
            cooking_time: 60,
            tags: vec![],
            ingredients: vec![],
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_add_returns_recipe() {
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_recipe(id))));
        let mut favorites = MockFavoriteRepository::new();
        favorites.expect_add().times(1).returning(|_, _| Ok(true));

        let service = FavoriteService::new(Arc::new(favorites), Arc::new(recipes));
        let recipe = service.add(1, 5).await.unwrap();

        assert_eq!(recipe.id, 5);
    }

    #[tokio::test]
    async fn test_duplicate_add_is_client_error() {
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_recipe(id))));
        let mut favorites = MockFavoriteRepository::new();
        favorites.expect_add().times(1).returning(|_, _| Ok(false));

        let service = FavoriteService::new(Arc::new(favorites), Arc::new(recipes));
        let result = service.add(1, 5).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_remove_absent_mark_is_client_error() {
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_recipe(id))));
        let mut favorites = MockFavoriteRepository::new();
        favorites
            .expect_remove()
            .times(1)
            .returning(|_, _| Ok(false));

        let service = FavoriteService::new(Arc::new(favorites), Arc::new(recipes));
        let result = service.remove(1, 5).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }
}
