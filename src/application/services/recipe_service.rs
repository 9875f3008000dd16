//! Recipe creation, retrieval, and catalog reads.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::{Ingredient, NewRecipe, Recipe, RecipeFilter, Tag};
use crate::domain::repositories::{IngredientRepository, RecipeRepository, TagRepository};
use crate::error::AppError;
use serde_json::json;

/// Service for recipe CRUD and the read-only tag/ingredient catalogs.
///
/// Payload shape checks (lengths, minimums) live in the request DTOs;
/// referential checks against the catalogs live here.
pub struct RecipeService<R: RecipeRepository, I: IngredientRepository, T: TagRepository> {
    recipe_repository: Arc<R>,
    ingredient_repository: Arc<I>,
    tag_repository: Arc<T>,
}

impl<R: RecipeRepository, I: IngredientRepository, T: TagRepository> RecipeService<R, I, T> {
    pub fn new(
        recipe_repository: Arc<R>,
        ingredient_repository: Arc<I>,
        tag_repository: Arc<T>,
    ) -> Self {
        Self {
            recipe_repository,
            ingredient_repository,
            tag_repository,
        }
    }

    /// Creates a recipe for `author_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if ingredient ids repeat, or any
    /// referenced ingredient or tag does not exist.
    pub async fn create_recipe(&self, new_recipe: NewRecipe) -> Result<Recipe, AppError> {
        self.check_references(&new_recipe).await?;
        self.recipe_repository.create(new_recipe).await
    }

    /// Replaces the mutable fields of a recipe. Only the author may edit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown recipe,
    /// [`AppError::Forbidden`] if `editor_id` is not the author, and
    /// [`AppError::Validation`] for referential failures.
    pub async fn update_recipe(
        &self,
        editor_id: i64,
        recipe_id: i64,
        changes: NewRecipe,
    ) -> Result<Recipe, AppError> {
        self.check_ownership(editor_id, recipe_id).await?;
        self.check_references(&changes).await?;
        self.recipe_repository.update(recipe_id, changes).await
    }

    /// Deletes a recipe. Only the author may delete.
    pub async fn delete_recipe(&self, editor_id: i64, recipe_id: i64) -> Result<(), AppError> {
        self.check_ownership(editor_id, recipe_id).await?;
        self.recipe_repository.delete(recipe_id).await?;
        Ok(())
    }

    /// Fetches a recipe with author, tags, and ingredient lines.
    pub async fn get_recipe(&self, recipe_id: i64) -> Result<Recipe, AppError> {
        self.recipe_repository
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Recipe not found", json!({ "recipe_id": recipe_id }))
            })
    }

    /// Lists recipes matching `filter` together with the total count.
    pub async fn list_recipes(
        &self,
        filter: RecipeFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Recipe>, i64), AppError> {
        let recipes = self
            .recipe_repository
            .list(filter.clone(), offset, limit)
            .await?;
        let count = self.recipe_repository.count(filter).await?;
        Ok((recipes, count))
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>, AppError> {
        self.tag_repository.list().await
    }

    pub async fn get_tag(&self, id: i64) -> Result<Tag, AppError> {
        self.tag_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Tag not found", json!({ "id": id })))
    }

    pub async fn list_ingredients(&self, name: Option<String>) -> Result<Vec<Ingredient>, AppError> {
        self.ingredient_repository.list(name).await
    }

    pub async fn get_ingredient(&self, id: i64) -> Result<Ingredient, AppError> {
        self.ingredient_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Ingredient not found", json!({ "id": id })))
    }

    async fn check_ownership(&self, editor_id: i64, recipe_id: i64) -> Result<(), AppError> {
        let recipe = self.get_recipe(recipe_id).await?;

        if recipe.author.id != editor_id {
            return Err(AppError::forbidden(
                "Only the author can modify this recipe",
                json!({ "recipe_id": recipe_id }),
            ));
        }

        Ok(())
    }

    /// Rejects payloads with repeated or unknown ingredient ids, or
    /// repeated or unknown tag ids.
    async fn check_references(&self, payload: &NewRecipe) -> Result<(), AppError> {
        let ingredient_ids: Vec<i64> = payload
            .ingredients
            .iter()
            .map(|line| line.ingredient_id)
            .collect();

        let unique: HashSet<i64> = ingredient_ids.iter().copied().collect();
        if unique.len() != ingredient_ids.len() {
            return Err(AppError::bad_request(
                "Ingredients must be unique within a recipe",
                json!({}),
            ));
        }

        let existing = self
            .ingredient_repository
            .find_existing_ids(ingredient_ids.clone())
            .await?;
        let existing: HashSet<i64> = existing.into_iter().collect();
        let mut missing: Vec<i64> = unique.difference(&existing).copied().collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            return Err(AppError::bad_request(
                "Unknown ingredients",
                json!({ "missing_ids": missing }),
            ));
        }

        let tag_unique: HashSet<i64> = payload.tag_ids.iter().copied().collect();
        if tag_unique.len() != payload.tag_ids.len() {
            return Err(AppError::bad_request("Tags must be unique", json!({})));
        }

        let existing_tags = self
            .tag_repository
            .find_existing_ids(payload.tag_ids.clone())
            .await?;
        let existing_tags: HashSet<i64> = existing_tags.into_iter().collect();
        let mut missing_tags: Vec<i64> = tag_unique.difference(&existing_tags).copied().collect();
        if !missing_tags.is_empty() {
            missing_tags.sort_unstable();
            return Err(AppError::bad_request(
                "Unknown tags",
                json!({ "missing_ids": missing_tags }),
            ));
        }

        Ok(())
    }
}
