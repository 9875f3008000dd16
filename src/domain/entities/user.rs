//! User entity and subscription view.

use chrono::{DateTime, Utc};

/// A registered user account.
///
/// Credentials are not stored here; API access goes through opaque bearer
/// tokens (see [`crate::domain::repositories::TokenRepository`]).
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// A followed author together with a bounded preview of their recipes.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub user: User,
    pub recipes: Vec<super::recipe::RecipeSummary>,
    pub recipes_count: i64,
}
