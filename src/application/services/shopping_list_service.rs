//! Shopping cart membership and shopping list aggregation.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::entities::{Recipe, ShoppingListItem};
use crate::domain::repositories::{CartRepository, RecipeRepository};
use crate::error::AppError;
use serde_json::json;

/// Service for managing a user's shopping cart and producing the
/// aggregated shopping list.
pub struct ShoppingListService<C: CartRepository, R: RecipeRepository> {
    cart_repository: Arc<C>,
    recipe_repository: Arc<R>,
}

impl<C: CartRepository, R: RecipeRepository> ShoppingListService<C, R> {
    pub fn new(cart_repository: Arc<C>, recipe_repository: Arc<R>) -> Self {
        Self {
            cart_repository,
            recipe_repository,
        }
    }

    /// Adds a recipe to the user's cart and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown recipe and
    /// [`AppError::Validation`] if the recipe is already in the cart.
    pub async fn add(&self, user_id: i64, recipe_id: i64) -> Result<Recipe, AppError> {
        let recipe = self.get_recipe(recipe_id).await?;

        let added = self.cart_repository.add(user_id, recipe_id).await?;
        if !added {
            return Err(AppError::bad_request(
                "Recipe is already in the shopping cart",
                json!({ "recipe_id": recipe_id }),
            ));
        }

        Ok(recipe)
    }

    /// Removes a recipe from the user's cart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown recipe and
    /// [`AppError::Validation`] if the recipe was not in the cart.
    pub async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<(), AppError> {
        self.get_recipe(recipe_id).await?;

        let removed = self.cart_repository.remove(user_id, recipe_id).await?;
        if !removed {
            return Err(AppError::bad_request(
                "Recipe is not in the shopping cart",
                json!({ "recipe_id": recipe_id }),
            ));
        }

        Ok(())
    }

    /// Returns the subset of `recipe_ids` currently in `user_id`'s cart.
    pub async fn in_cart_ids(
        &self,
        user_id: i64,
        recipe_ids: Vec<i64>,
    ) -> Result<Vec<i64>, AppError> {
        self.cart_repository.marked_ids(user_id, recipe_ids).await
    }

    /// Aggregates the user's cart into one row per distinct
    /// (ingredient name, measurement unit) pair.
    ///
    /// The grouping key is the display pair, not the ingredient id, so two
    /// ingredient records sharing a name and unit collapse into one row.
    /// Amounts accumulate into an `i64` with saturating addition; stored
    /// values outside the authoring-time validation range are summed
    /// arithmetically rather than rejected.
    ///
    /// Output is ordered by (name, unit). An empty cart yields an empty
    /// vector.
    pub async fn aggregate(&self, user_id: i64) -> Result<Vec<ShoppingListItem>, AppError> {
        let lines = self.cart_repository.cart_lines(user_id).await?;

        let mut groups: BTreeMap<(String, String), i64> = BTreeMap::new();
        for line in lines {
            let total = groups
                .entry((line.name, line.measurement_unit))
                .or_insert(0);
            *total = total.saturating_add(i64::from(line.amount));
        }

        Ok(groups
            .into_iter()
            .map(|((name, measurement_unit), amount)| ShoppingListItem {
                name,
                measurement_unit,
                amount,
            })
            .collect())
    }

    async fn get_recipe(&self, recipe_id: i64) -> Result<Recipe, AppError> {
        self.recipe_repository
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Recipe not found", json!({ "recipe_id": recipe_id }))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CartLine, User};
    use crate::domain::repositories::{MockCartRepository, MockRecipeRepository};
    use chrono::Utc;

    fn line(name: &str, unit: &str, amount: i32) -> CartLine {
        CartLine {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
            amount,
        }
    }

    fn test_recipe(id: i64) -> Recipe {
        Recipe {
            id,
            author: User {
                id: 1,
                username: "chef".to_string(),
                email: "chef@example.com".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                created_at: Utc::now(),
            },
            name: "Soup".to_string(),
            text: "Boil.".to_string(),
            cooking_time: 30,
            tags: vec![],
            ingredients: vec![],
            created_at: Utc::now(),
        }
    }

    fn service(
        cart: MockCartRepository,
        recipes: MockRecipeRepository,
    ) -> ShoppingListService<MockCartRepository, MockRecipeRepository> {
        ShoppingListService::new(Arc::new(cart), Arc::new(recipes))
    }

    #[tokio::test]
    async fn test_empty_cart_yields_empty_list() {
        let mut cart = MockCartRepository::new();
        cart.expect_cart_lines().times(1).returning(|_| Ok(vec![]));

        let items = service(cart, MockRecipeRepository::new())
            .aggregate(1)
            .await
            .unwrap();

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_single_recipe_sum() {
        let mut cart = MockCartRepository::new();
        cart.expect_cart_lines()
            .times(1)
            .returning(|_| Ok(vec![line("salt", "g", 5), line("sugar", "g", 2)]));

        let items = service(cart, MockRecipeRepository::new())
            .aggregate(1)
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert!(items.contains(&ShoppingListItem {
            name: "salt".to_string(),
            measurement_unit: "g".to_string(),
            amount: 5,
        }));
        assert!(items.contains(&ShoppingListItem {
            name: "sugar".to_string(),
            measurement_unit: "g".to_string(),
            amount: 2,
        }));
    }

    #[tokio::test]
    async fn test_cross_recipe_amounts_merge_into_one_row() {
        let mut cart = MockCartRepository::new();
        cart.expect_cart_lines()
            .times(1)
            .returning(|_| Ok(vec![line("flour", "g", 100), line("flour", "g", 50)]));

        let items = service(cart, MockRecipeRepository::new())
            .aggregate(1)
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "flour");
        assert_eq!(items[0].amount, 150);
    }

    #[tokio::test]
    async fn test_grouping_is_by_name_and_unit_not_id() {
        // Two distinct ingredient records named "Salt"/"g" collapse; the
        // same name under a different unit stays separate.
        let mut cart = MockCartRepository::new();
        cart.expect_cart_lines().times(1).returning(|_| {
            Ok(vec![
                line("Salt", "g", 3),
                line("Salt", "g", 4),
                line("Salt", "tbsp", 1),
            ])
        });

        let items = service(cart, MockRecipeRepository::new())
            .aggregate(1)
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        let grams = items
            .iter()
            .find(|i| i.measurement_unit == "g")
            .unwrap();
        assert_eq!(grams.amount, 7);
    }

    #[tokio::test]
    async fn test_aggregate_output_order_is_stable() {
        let lines = vec![
            line("zucchini", "pc", 2),
            line("apple", "pc", 1),
            line("flour", "g", 10),
        ];

        let mut first = MockCartRepository::new();
        let l = lines.clone();
        first.expect_cart_lines().returning(move |_| Ok(l.clone()));
        let a = service(first, MockRecipeRepository::new())
            .aggregate(1)
            .await
            .unwrap();

        let mut second = MockCartRepository::new();
        let mut reversed = lines.clone();
        reversed.reverse();
        second
            .expect_cart_lines()
            .returning(move |_| Ok(reversed.clone()));
        let b = service(second, MockRecipeRepository::new())
            .aggregate(1)
            .await
            .unwrap();

        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_sum_saturates_instead_of_overflowing() {
        let mut cart = MockCartRepository::new();
        cart.expect_cart_lines().times(1).returning(|_| {
            Ok(vec![
                line("flour", "g", i32::MAX),
                line("flour", "g", i32::MAX),
            ])
        });

        let items = service(cart, MockRecipeRepository::new())
            .aggregate(1)
            .await
            .unwrap();

        assert_eq!(items[0].amount, i64::from(i32::MAX) * 2);
    }

    #[tokio::test]
    async fn test_add_unknown_recipe_is_not_found() {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_find_by_id().returning(|_| Ok(None));

        let result = service(MockCartRepository::new(), recipes).add(1, 99).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_add_is_client_error() {
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_recipe(id))));
        let mut cart = MockCartRepository::new();
        cart.expect_add().times(1).returning(|_, _| Ok(false));

        let result = service(cart, recipes).add(1, 5).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_remove_absent_entry_is_client_error() {
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_recipe(id))));
        let mut cart = MockCartRepository::new();
        cart.expect_remove().times(1).returning(|_, _| Ok(false));

        let result = service(cart, recipes).remove(1, 5).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }
}
