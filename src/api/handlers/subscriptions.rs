//! Handlers for author subscriptions.

use axum::{
    Extension, Json,
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::pagination::Paginated;
use crate::api::dto::user::{SubscriptionParams, SubscriptionResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's subscriptions with bounded recipe previews.
///
/// # Endpoint
///
/// `GET /api/users/subscriptions?page=&limit=&recipes_limit=`
pub async fn list_subscriptions_handler(
    Query(params): Query<SubscriptionParams>,
    OriginalUri(uri): OriginalUri,
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Paginated<SubscriptionResponse>>, AppError> {
    let (offset, limit) = params
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|msg| AppError::bad_request(msg, serde_json::json!({})))?;
    let recipes_limit = params
        .validate_recipes_limit()
        .map_err(|msg| AppError::bad_request(msg, serde_json::json!({})))?;

    let (subscriptions, count) = state
        .subscription_service
        .subscriptions(user.id, recipes_limit, offset, limit)
        .await?;

    let results = subscriptions
        .into_iter()
        .map(SubscriptionResponse::from)
        .collect();

    Ok(Json(Paginated::new(
        uri.path(),
        params.pagination.page(),
        params.pagination.limit(),
        count,
        results,
    )))
}

/// Subscribes the caller to an author.
///
/// # Endpoint
///
/// `POST /api/users/{id}/subscribe?recipes_limit=`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown author and 400 Bad Request for
/// self-subscription or a duplicate subscription.
pub async fn subscribe_handler(
    Path(id): Path<i64>,
    Query(params): Query<SubscriptionParams>,
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), AppError> {
    let recipes_limit = params
        .validate_recipes_limit()
        .map_err(|msg| AppError::bad_request(msg, serde_json::json!({})))?;

    let subscription = state
        .subscription_service
        .subscribe(user.id, id, recipes_limit)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse::from(subscription)),
    ))
}

/// Unsubscribes the caller from an author.
///
/// # Endpoint
///
/// `DELETE /api/users/{id}/subscribe`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown author and 400 Bad Request if
/// no subscription existed.
pub async fn unsubscribe_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    state.subscription_service.unsubscribe(user.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
