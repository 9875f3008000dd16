//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /s/{code}`  - Short link redirect (public)
//! - `GET /health`    - Health check (public)
//! - `/api/*`         - REST API (reads public, writes Bearer token)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer token, optional on read endpoints
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let public = api::routes::public_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::optional_layer,
    ));

    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let protected = if behind_proxy {
        protected.layer(rate_limit::secure_smart_layer())
    } else {
        protected.layer(rate_limit::secure_layer())
    };

    let api_router = Router::new().merge(public).merge(protected);

    let redirect = Router::new().route("/s/{code}", get(redirect_handler));
    let redirect = if behind_proxy {
        redirect.layer(rate_limit::smart_layer())
    } else {
        redirect.layer(rate_limit::layer())
    };

    let router = Router::new()
        .merge(redirect)
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
