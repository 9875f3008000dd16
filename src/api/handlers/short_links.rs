//! Handlers for short link retrieval and redirect.

use axum::{
    Json,
    extract::{Path, State},
    response::Redirect,
};

use crate::api::dto::short_link::ShortLinkResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the short link for a recipe, allocating one if it does not
/// exist yet.
///
/// # Endpoint
///
/// `GET /api/recipes/{id}/get-link`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown recipe.
pub async fn get_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ShortLinkResponse>, AppError> {
    // Recipe existence gates allocation; the FK alone would surface a
    // bare 500 on a bad id.
    state.recipe_service.get_recipe(id).await?;

    let link = match state.short_link_service.get_for_recipe(id).await {
        Ok(link) => link,
        Err(AppError::NotFound { .. }) => {
            let canonical_url = format!("{}/recipes/{}", state.base_url, id);
            state
                .short_link_service
                .create_for_recipe(id, &canonical_url)
                .await?
        }
        Err(err) => return Err(err),
    };

    Ok(Json(ShortLinkResponse {
        short_link: state
            .short_link_service
            .short_url(&state.base_url, &link.short_code),
    }))
}

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /s/{code}`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown or malformed code.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let original_url = state.short_link_service.resolve(&code).await?;

    Ok(Redirect::temporary(&original_url))
}
