//! User and subscription payloads.

use serde::Deserialize;
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

use super::pagination::PaginationParams;
use super::recipe::RecipeSummaryResponse;
use crate::domain::entities::{Subscription, User};

pub const DEFAULT_RECIPES_LIMIT: u32 = 1;
pub const MAX_RECIPES_LIMIT: u32 = 100;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

impl UserResponse {
    pub fn new(user: User, is_subscribed: bool) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed,
        }
    }
}

/// A followed author with a bounded preview of their recipes.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    pub recipes: Vec<RecipeSummaryResponse>,
    pub recipes_count: i64,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(sub: Subscription) -> Self {
        Self {
            id: sub.user.id,
            username: sub.user.username,
            email: sub.user.email,
            first_name: sub.user.first_name,
            last_name: sub.user.last_name,
            // The listing only ever contains authors the caller follows.
            is_subscribed: true,
            recipes: sub
                .recipes
                .into_iter()
                .map(RecipeSummaryResponse::from)
                .collect(),
            recipes_count: sub.recipes_count,
        }
    }
}

/// Query parameters for subscription endpoints.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub recipes_limit: Option<u32>,
}

impl SubscriptionParams {
    /// Returns the validated recipe preview size (default 1, at most 100).
    pub fn validate_recipes_limit(&self) -> Result<i64, String> {
        let limit = self.recipes_limit.unwrap_or(DEFAULT_RECIPES_LIMIT);

        if !(1..=MAX_RECIPES_LIMIT).contains(&limit) {
            return Err(format!(
                "recipes_limit must be between 1 and {MAX_RECIPES_LIMIT}"
            ));
        }

        Ok(i64::from(limit))
    }
}
