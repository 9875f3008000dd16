//! REST API layer: routes, handlers, payloads, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
