//! Short link entity mapping a compact code to a recipe page URL.

use chrono::{DateTime, Utc};

/// A persisted short link.
///
/// Created exactly once when a recipe is published, immutable thereafter,
/// and removed when the recipe is deleted (cascade).
#[derive(Debug, Clone)]
pub struct ShortLink {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub recipe_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Input data for persisting a freshly allocated short link.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub original_url: String,
    pub short_code: String,
    pub recipe_id: i64,
}
