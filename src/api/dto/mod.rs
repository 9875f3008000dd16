//! Request and response payloads for the REST API.

pub mod health;
pub mod ingredient;
pub mod pagination;
pub mod recipe;
pub mod short_link;
pub mod tag;
pub mod user;
