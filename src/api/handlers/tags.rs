//! Handlers for the tag reference endpoints.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::tag::TagResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all tags.
///
/// # Endpoint
///
/// `GET /api/tags`
pub async fn list_tags_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagResponse>>, AppError> {
    let tags = state.recipe_service.list_tags().await?;

    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

/// Retrieves a single tag.
///
/// # Endpoint
///
/// `GET /api/tags/{id}`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown tag id.
pub async fn get_tag_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<TagResponse>, AppError> {
    let tag = state.recipe_service.get_tag(id).await?;

    Ok(Json(TagResponse::from(tag)))
}
