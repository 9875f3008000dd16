//! Handlers for the ingredient reference endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::ingredient::{IngredientListParams, IngredientResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists ingredients, optionally filtered by a case-insensitive name
/// search. Prefix matches sort before other substring matches.
///
/// # Endpoint
///
/// `GET /api/ingredients?name=<search>`
pub async fn list_ingredients_handler(
    Query(params): Query<IngredientListParams>,
    State(state): State<AppState>,
) -> Result<Json<Vec<IngredientResponse>>, AppError> {
    let ingredients = state.recipe_service.list_ingredients(params.name).await?;

    Ok(Json(
        ingredients
            .into_iter()
            .map(IngredientResponse::from)
            .collect(),
    ))
}

/// Retrieves a single ingredient.
///
/// # Endpoint
///
/// `GET /api/ingredients/{id}`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown ingredient id.
pub async fn get_ingredient_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<IngredientResponse>, AppError> {
    let ingredient = state.recipe_service.get_ingredient(id).await?;

    Ok(Json(IngredientResponse::from(ingredient)))
}
