//! Handlers for recipe CRUD and listing.

use axum::{
    Extension, Json,
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
};
use std::collections::HashSet;
use tracing::warn;
use validator::Validate;

use crate::api::dto::pagination::Paginated;
use crate::api::dto::recipe::{RecipeFlags, RecipeListParams, RecipeRequest, RecipeResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::domain::entities::Recipe;
use crate::error::AppError;
use crate::state::AppState;

/// Lists recipes with filtering and pagination.
///
/// # Endpoint
///
/// `GET /api/recipes?page=&limit=&author=&tags=&is_favorited=&is_in_shopping_cart=`
///
/// Anonymous callers get all recipes with mark flags `false`; the
/// mark-based filters only apply to authenticated callers.
pub async fn list_recipes_handler(
    Query(params): Query<RecipeListParams>,
    OriginalUri(uri): OriginalUri,
    State(state): State<AppState>,
    current_user: Option<Extension<CurrentUser>>,
) -> Result<Json<Paginated<RecipeResponse>>, AppError> {
    let (offset, limit) = params
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|msg| AppError::bad_request(msg, serde_json::json!({})))?;

    let user_id = current_user.as_ref().map(|Extension(u)| u.0.id);
    let filter = params.to_filter(user_id);

    let (recipes, count) = state
        .recipe_service
        .list_recipes(filter, offset, limit)
        .await?;

    let flags = resolve_flags(&state, user_id, &recipes).await?;

    let results = recipes
        .into_iter()
        .zip(flags)
        .map(|(recipe, flags)| RecipeResponse::new(recipe, flags))
        .collect();

    Ok(Json(Paginated::new(
        uri.path(),
        params.pagination.page(),
        params.pagination.limit(),
        count,
        results,
    )))
}

/// Retrieves a single recipe.
///
/// # Endpoint
///
/// `GET /api/recipes/{id}`
pub async fn get_recipe_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    current_user: Option<Extension<CurrentUser>>,
) -> Result<Json<RecipeResponse>, AppError> {
    let recipe = state.recipe_service.get_recipe(id).await?;

    let user_id = current_user.as_ref().map(|Extension(u)| u.0.id);
    let flags = resolve_flags(&state, user_id, std::slice::from_ref(&recipe)).await?;

    Ok(Json(RecipeResponse::new(
        recipe,
        flags.into_iter().next().unwrap_or_default(),
    )))
}

/// Creates a recipe and allocates its short link.
///
/// # Endpoint
///
/// `POST /api/recipes`
///
/// # Errors
///
/// Returns 400 Bad Request for invalid payloads, unknown tag or
/// ingredient ids, or repeated ingredient ids.
pub async fn create_recipe_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<RecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), AppError> {
    payload.validate()?;

    let recipe = state
        .recipe_service
        .create_recipe(payload.into_new_recipe(user.id))
        .await?;

    // The short link targets the recipe's canonical page. Allocation
    // failure does not fail the create; get-link retries lazily.
    let canonical_url = format!("{}/recipes/{}", state.base_url, recipe.id);
    if let Err(err) = state
        .short_link_service
        .create_for_recipe(recipe.id, &canonical_url)
        .await
    {
        warn!(recipe_id = recipe.id, %err, "short link allocation failed");
    }

    let flags = resolve_flags(&state, Some(user.id), std::slice::from_ref(&recipe)).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecipeResponse::new(
            recipe,
            flags.into_iter().next().unwrap_or_default(),
        )),
    ))
}

/// Replaces a recipe's mutable fields.
///
/// # Endpoint
///
/// `PATCH /api/recipes/{id}`
///
/// # Errors
///
/// Returns 403 Forbidden when the caller is not the author and 404 Not
/// Found for an unknown recipe.
pub async fn update_recipe_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<RecipeRequest>,
) -> Result<Json<RecipeResponse>, AppError> {
    payload.validate()?;

    let recipe = state
        .recipe_service
        .update_recipe(user.id, id, payload.into_new_recipe(user.id))
        .await?;

    let flags = resolve_flags(&state, Some(user.id), std::slice::from_ref(&recipe)).await?;

    Ok(Json(RecipeResponse::new(
        recipe,
        flags.into_iter().next().unwrap_or_default(),
    )))
}

/// Deletes a recipe.
///
/// # Endpoint
///
/// `DELETE /api/recipes/{id}`
///
/// # Errors
///
/// Returns 403 Forbidden when the caller is not the author and 404 Not
/// Found for an unknown recipe.
pub async fn delete_recipe_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    state.recipe_service.delete_recipe(user.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Resolves per-caller mark flags for a batch of recipes with one query
/// per mark kind. Anonymous callers get all-false flags.
pub(super) async fn resolve_flags(
    state: &AppState,
    user_id: Option<i64>,
    recipes: &[Recipe],
) -> Result<Vec<RecipeFlags>, AppError> {
    let Some(user_id) = user_id else {
        return Ok(vec![RecipeFlags::default(); recipes.len()]);
    };

    let recipe_ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();
    let author_ids: Vec<i64> = recipes.iter().map(|r| r.author.id).collect();

    let favorited: HashSet<i64> = state
        .favorite_service
        .favorited_ids(user_id, recipe_ids.clone())
        .await?
        .into_iter()
        .collect();

    let in_cart: HashSet<i64> = state
        .shopping_list_service
        .in_cart_ids(user_id, recipe_ids)
        .await?
        .into_iter()
        .collect();

    let followed: HashSet<i64> = state
        .subscription_service
        .followed_ids(user_id, author_ids)
        .await?
        .into_iter()
        .collect();

    Ok(recipes
        .iter()
        .map(|recipe| RecipeFlags {
            is_favorited: favorited.contains(&recipe.id),
            is_in_shopping_cart: in_cart.contains(&recipe.id),
            author_is_subscribed: followed.contains(&recipe.author.id),
        })
        .collect())
}
