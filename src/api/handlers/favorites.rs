//! Handlers for favoriting recipes.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::recipe::RecipeSummaryResponse;
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Adds a recipe to the caller's favorites.
///
/// # Endpoint
///
/// `POST /api/recipes/{id}/favorite`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown recipe and 400 Bad Request if
/// the recipe is already favorited.
pub async fn add_favorite_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), AppError> {
    let recipe = state.favorite_service.add(user.id, id).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecipeSummaryResponse::from(&recipe)),
    ))
}

/// Removes a recipe from the caller's favorites.
///
/// # Endpoint
///
/// `DELETE /api/recipes/{id}/favorite`
///
/// # Errors
///
/// Returns 400 Bad Request if the recipe was not favorited.
pub async fn remove_favorite_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    state.favorite_service.remove(user.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
