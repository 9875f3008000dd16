//! Recipe entity and related value types.

use chrono::{DateTime, Utc};

use super::tag::Tag;
use super::user::User;

/// One ingredient line of a recipe, denormalized with the ingredient's
/// display fields.
#[derive(Debug, Clone)]
pub struct IngredientLine {
    pub ingredient_id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// A published recipe with its author, tags, and ingredient lines.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: i64,
    pub author: User,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<IngredientLine>,
    pub created_at: DateTime<Utc>,
}

/// Compact recipe view used in subscription previews and mark responses.
#[derive(Debug, Clone)]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    pub cooking_time: i32,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}

/// One ingredient reference in a create/update payload.
#[derive(Debug, Clone)]
pub struct NewIngredientLine {
    pub ingredient_id: i64,
    pub amount: i32,
}

/// Input data for creating a recipe or fully replacing its mutable fields.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub author_id: i64,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub tag_ids: Vec<i64>,
    pub ingredients: Vec<NewIngredientLine>,
}

/// Listing filter. All fields are conjunctive; `None`/empty means "no
/// constraint on this axis".
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub author_id: Option<i64>,
    pub tag_slugs: Vec<String>,
    /// Only recipes favorited by this user.
    pub favorited_by: Option<i64>,
    /// Only recipes in this user's shopping cart.
    pub in_cart_of: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_recipe() {
        let recipe = Recipe {
            id: 3,
            author: User {
                id: 1,
                username: "chef".to_string(),
                email: "chef@example.com".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                created_at: Utc::now(),
            },
            name: "Pancakes".to_string(),
            text: "Mix and fry.".to_string(),
            cooking_time: 15,
            tags: vec![],
            ingredients: vec![],
            created_at: Utc::now(),
        };

        let summary = RecipeSummary::from(&recipe);
        assert_eq!(summary.id, 3);
        assert_eq!(summary.name, "Pancakes");
        assert_eq!(summary.cooking_time, 15);
    }
}
