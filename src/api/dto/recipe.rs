//! Recipe request/response payloads.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use super::pagination::PaginationParams;
use super::tag::TagResponse;
use super::user::UserResponse;
use crate::domain::entities::{
    IngredientLine, NewIngredientLine, NewRecipe, Recipe, RecipeFilter, RecipeSummary,
};

/// One ingredient reference in a create/update payload.
///
/// Serialize is required by the nested list validation on
/// [`RecipeRequest`], which echoes failing elements into error params.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct IngredientLineRequest {
    pub id: i64,

    #[validate(range(min = 1, message = "Amount must be at least 1"))]
    pub amount: i32,
}

/// Create/replace payload. Update reuses the same shape; replacement of
/// tags and ingredient lines is always full.
#[derive(Debug, Deserialize, Validate)]
pub struct RecipeRequest {
    #[validate(length(min = 1, max = 256, message = "Name must be 1-256 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,

    #[validate(range(min = 1, message = "Cooking time must be at least 1 minute"))]
    pub cooking_time: i32,

    #[validate(length(min = 1, message = "At least one tag is required"))]
    pub tags: Vec<i64>,

    #[validate(length(min = 1, message = "At least one ingredient is required"))]
    #[validate(nested)]
    pub ingredients: Vec<IngredientLineRequest>,
}

impl RecipeRequest {
    pub fn into_new_recipe(self, author_id: i64) -> NewRecipe {
        NewRecipe {
            author_id,
            name: self.name,
            text: self.text,
            cooking_time: self.cooking_time,
            tag_ids: self.tags,
            ingredients: self
                .ingredients
                .into_iter()
                .map(|line| NewIngredientLine {
                    ingredient_id: line.id,
                    amount: line.amount,
                })
                .collect(),
        }
    }
}

/// Query parameters for the recipe list endpoint.
///
/// `tags` is a comma-separated list of slugs. `is_favorited` and
/// `is_in_shopping_cart` take `1` to enable and are ignored for
/// unauthenticated callers.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub author: Option<i64>,

    #[serde(default)]
    pub tags: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub is_favorited: Option<u8>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub is_in_shopping_cart: Option<u8>,
}

impl RecipeListParams {
    /// Converts query parameters to a listing filter. Mark-based filters
    /// need the caller's identity and are dropped when it is absent.
    pub fn to_filter(&self, current_user_id: Option<i64>) -> RecipeFilter {
        let tag_slugs = self
            .tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|slug| !slug.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        RecipeFilter {
            author_id: self.author,
            tag_slugs,
            favorited_by: current_user_id.filter(|_| self.is_favorited == Some(1)),
            in_cart_of: current_user_id.filter(|_| self.is_in_shopping_cart == Some(1)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IngredientLineResponse {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<IngredientLine> for IngredientLineResponse {
    fn from(line: IngredientLine) -> Self {
        Self {
            id: line.ingredient_id,
            name: line.name,
            measurement_unit: line.measurement_unit,
            amount: line.amount,
        }
    }
}

/// Per-caller mark flags attached to a recipe payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeFlags {
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub author_is_subscribed: bool,
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: i64,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<IngredientLineResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
}

impl RecipeResponse {
    pub fn new(recipe: Recipe, flags: RecipeFlags) -> Self {
        Self {
            id: recipe.id,
            tags: recipe.tags.into_iter().map(TagResponse::from).collect(),
            author: UserResponse::new(recipe.author, flags.author_is_subscribed),
            ingredients: recipe
                .ingredients
                .into_iter()
                .map(IngredientLineResponse::from)
                .collect(),
            is_favorited: flags.is_favorited,
            is_in_shopping_cart: flags.is_in_shopping_cart,
            name: recipe.name,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Compact recipe payload used in mark responses and subscription previews.
#[derive(Debug, Serialize)]
pub struct RecipeSummaryResponse {
    pub id: i64,
    pub name: String,
    pub cooking_time: i32,
}

impl From<RecipeSummary> for RecipeSummaryResponse {
    fn from(summary: RecipeSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            cooking_time: summary.cooking_time,
        }
    }
}

impl From<&Recipe> for RecipeSummaryResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_param_splits_on_comma() {
        let params = RecipeListParams {
            tags: Some("breakfast,dinner".to_string()),
            ..Default::default()
        };

        let filter = params.to_filter(None);
        assert_eq!(filter.tag_slugs, vec!["breakfast", "dinner"]);
    }

    #[test]
    fn test_tags_param_skips_blank_segments() {
        let params = RecipeListParams {
            tags: Some(" breakfast, ,dinner,".to_string()),
            ..Default::default()
        };

        let filter = params.to_filter(None);
        assert_eq!(filter.tag_slugs, vec!["breakfast", "dinner"]);
    }

    #[test]
    fn test_mark_filters_require_identity() {
        let params = RecipeListParams {
            is_favorited: Some(1),
            is_in_shopping_cart: Some(1),
            ..Default::default()
        };

        let anonymous = params.to_filter(None);
        assert!(anonymous.favorited_by.is_none());
        assert!(anonymous.in_cart_of.is_none());

        let authenticated = params.to_filter(Some(7));
        assert_eq!(authenticated.favorited_by, Some(7));
        assert_eq!(authenticated.in_cart_of, Some(7));
    }

    #[test]
    fn test_mark_filters_off_by_default() {
        let filter = RecipeListParams::default().to_filter(Some(7));
        assert!(filter.favorited_by.is_none());
        assert!(filter.in_cart_of.is_none());
    }

    #[test]
    fn test_request_validation_rejects_zero_amount() {
        let request = RecipeRequest {
            name: "Pancakes".to_string(),
            text: "Mix and fry.".to_string(),
            cooking_time: 15,
            tags: vec![1],
            ingredients: vec![IngredientLineRequest { id: 1, amount: 0 }],
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_validation_reports_nested_line_errors() {
        let request = RecipeRequest {
            name: "Pancakes".to_string(),
            text: "Mix and fry.".to_string(),
            cooking_time: 15,
            tags: vec![1],
            ingredients: vec![
                IngredientLineRequest { id: 1, amount: 2 },
                IngredientLineRequest { id: 2, amount: 0 },
            ],
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.errors().contains_key("ingredients"));

        let valid = RecipeRequest {
            name: "Pancakes".to_string(),
            text: "Mix and fry.".to_string(),
            cooking_time: 15,
            tags: vec![1],
            ingredients: vec![IngredientLineRequest { id: 1, amount: 2 }],
        };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_request_validation_rejects_empty_collections() {
        let request = RecipeRequest {
            name: "Pancakes".to_string(),
            text: "Mix and fry.".to_string(),
            cooking_time: 15,
            tags: vec![],
            ingredients: vec![],
        };

        assert!(request.validate().is_err());
    }
}
