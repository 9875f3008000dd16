//! Handlers for shopping cart membership and the downloadable shopping list.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::recipe::RecipeSummaryResponse;
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::render_shopping_list_csv;

/// Adds a recipe to the caller's shopping cart.
///
/// # Endpoint
///
/// `POST /api/recipes/{id}/shopping_cart`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown recipe and 400 Bad Request if
/// the recipe is already in the cart.
pub async fn add_to_cart_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<(StatusCode, Json<RecipeSummaryResponse>), AppError> {
    let recipe = state.shopping_list_service.add(user.id, id).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecipeSummaryResponse::from(&recipe)),
    ))
}

/// Removes a recipe from the caller's shopping cart.
///
/// # Endpoint
///
/// `DELETE /api/recipes/{id}/shopping_cart`
///
/// # Errors
///
/// Returns 400 Bad Request if the recipe was not in the cart.
pub async fn remove_from_cart_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    state.shopping_list_service.remove(user.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Downloads the caller's aggregated shopping list as a CSV attachment.
///
/// # Endpoint
///
/// `GET /api/recipes/download_shopping_cart`
///
/// The same ingredient across several cart recipes collapses into one
/// row with the summed amount. An empty cart yields a header-only file.
pub async fn download_shopping_cart_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let items = state.shopping_list_service.aggregate(user.id).await?;

    let body = render_shopping_list_csv(&items);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping_cart.csv\"",
            ),
        ],
        body,
    ))
}
