//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::domain::entities::User;
use crate::{error::AppError, state::AppState};

/// The authenticated caller, inserted as a request extension.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// On success the resolved [`CurrentUser`] is inserted into the request
/// extensions for handlers to pick up.
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Token is not found or revoked
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let user = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Like [`layer`], but anonymous requests pass through without a
/// [`CurrentUser`] extension. A present-but-invalid token is still
/// rejected.
pub async fn optional_layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let bearer = AuthBearer::from_request_parts(&mut parts, &()).await.ok();

    let mut req = Request::from_parts(parts, body);

    if let Some(AuthBearer(token)) = bearer {
        let user = st.auth_service.authenticate(&token).await?;
        req.extensions_mut().insert(CurrentUser(user));
    }

    Ok(next.run(req).await)
}
