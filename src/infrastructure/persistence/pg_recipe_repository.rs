//! PostgreSQL implementation of the recipe repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{
    IngredientLine, NewRecipe, Recipe, RecipeFilter, RecipeSummary, Tag, User,
};
use crate::domain::repositories::RecipeRepository;
use crate::error::AppError;
use serde_json::json;

/// PostgreSQL repository for recipes, their tag links, and ingredient
/// lines.
pub struct PgRecipeRepository {
    pool: Arc<PgPool>,
}

impl PgRecipeRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Loads tags for a set of recipes, keyed by recipe id.
    async fn load_tags(&self, recipe_ids: &[i64]) -> Result<HashMap<i64, Vec<Tag>>, AppError> {
        let rows = sqlx::query_as::<_, RecipeTagRow>(
            r#"
            SELECT rt.recipe_id, t.id, t.name, t.slug
            FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id = ANY($1)
            ORDER BY t.id
            "#,
        )
        .bind(recipe_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut by_recipe: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in rows {
            by_recipe.entry(row.recipe_id).or_default().push(Tag {
                id: row.id,
                name: row.name,
                slug: row.slug,
            });
        }
        Ok(by_recipe)
    }

    /// Loads ingredient lines for a set of recipes, keyed by recipe id.
    async fn load_lines(
        &self,
        recipe_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<IngredientLine>>, AppError> {
        let rows = sqlx::query_as::<_, RecipeLineRow>(
            r#"
            SELECT ri.recipe_id, ri.ingredient_id, i.name, i.measurement_unit, ri.amount
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = ANY($1)
            ORDER BY ri.id
            "#,
        )
        .bind(recipe_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut by_recipe: HashMap<i64, Vec<IngredientLine>> = HashMap::new();
        for row in rows {
            by_recipe
                .entry(row.recipe_id)
                .or_default()
                .push(IngredientLine {
                    ingredient_id: row.ingredient_id,
                    name: row.name,
                    measurement_unit: row.measurement_unit,
                    amount: row.amount,
                });
        }
        Ok(by_recipe)
    }

    /// Assembles full recipes from base rows plus batch-loaded children.
    async fn assemble(&self, rows: Vec<RecipeRow>) -> Result<Vec<Recipe>, AppError> {
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut tags = self.load_tags(&ids).await?;
        let mut lines = self.load_lines(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                let mut recipe = Recipe::from(row);
                recipe.tags = tags.remove(&id).unwrap_or_default();
                recipe.ingredients = lines.remove(&id).unwrap_or_default();
                recipe
            })
            .collect())
    }
}

const RECIPE_SELECT: &str = r#"
SELECT r.id, r.name, r.text, r.cooking_time, r.created_at,
       u.id AS author_id, u.username AS author_username,
       u.email AS author_email, u.first_name AS author_first_name,
       u.last_name AS author_last_name, u.created_at AS author_created_at
FROM recipes r
JOIN users u ON u.id = r.author_id
"#;

const FILTER_WHERE: &str = r#"
WHERE ($1::bigint IS NULL OR r.author_id = $1)
  AND (NOT $2 OR EXISTS (
      SELECT 1 FROM recipe_tags rt
      JOIN tags t ON t.id = rt.tag_id
      WHERE rt.recipe_id = r.id AND t.slug = ANY($3)))
  AND ($4::bigint IS NULL OR EXISTS (
      SELECT 1 FROM favorites f
      WHERE f.recipe_id = r.id AND f.user_id = $4))
  AND ($5::bigint IS NULL OR EXISTS (
      SELECT 1 FROM shopping_cart sc
      WHERE sc.recipe_id = r.id AND sc.user_id = $5))
"#;

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn create(&self, new_recipe: NewRecipe) -> Result<Recipe, AppError> {
        let mut tx = self.pool.begin().await?;

        let recipe_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO recipes (author_id, name, text, cooking_time)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(new_recipe.author_id)
        .bind(&new_recipe.name)
        .bind(&new_recipe.text)
        .bind(new_recipe.cooking_time)
        .fetch_one(&mut *tx)
        .await?;

        insert_children(&mut tx, recipe_id, &new_recipe).await?;
        tx.commit().await?;

        self.find_by_id(recipe_id).await?.ok_or_else(|| {
            AppError::internal("Recipe vanished after insert", json!({ "id": recipe_id }))
        })
    }

    async fn update(&self, id: i64, changes: NewRecipe) -> Result<Recipe, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE recipes SET name = $2, text = $3, cooking_time = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.text)
        .bind(changes.cooking_time)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found("Recipe not found", json!({ "id": id })));
        }

        // Full replacement of the tag set and the ingredient lines.
        sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_children(&mut tx, id, &changes).await?;
        tx.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Recipe vanished after update", json!({ "id": id })))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, AppError> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!("{RECIPE_SELECT} WHERE r.id = $1"))
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(self.assemble(vec![row]).await?.into_iter().next())
    }

    async fn list(
        &self,
        filter: RecipeFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Recipe>, AppError> {
        let sql = format!(
            "{RECIPE_SELECT} {FILTER_WHERE} ORDER BY r.created_at DESC, r.id DESC LIMIT $6 OFFSET $7"
        );

        let rows = sqlx::query_as::<_, RecipeRow>(&sql)
            .bind(filter.author_id)
            .bind(!filter.tag_slugs.is_empty())
            .bind(&filter.tag_slugs)
            .bind(filter.favorited_by)
            .bind(filter.in_cart_of)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        self.assemble(rows).await
    }

    async fn count(&self, filter: RecipeFilter) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM recipes r {FILTER_WHERE}");

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(filter.author_id)
            .bind(!filter.tag_slugs.is_empty())
            .bind(&filter.tag_slugs)
            .bind(filter.favorited_by)
            .bind(filter.in_cart_of)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn list_by_author(
        &self,
        author_id: i64,
        limit: i64,
    ) -> Result<Vec<RecipeSummary>, AppError> {
        let rows = sqlx::query_as::<_, RecipeSummaryRow>(
            r#"
            SELECT id, name, cooking_time
            FROM recipes
            WHERE author_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(author_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RecipeSummary {
                id: r.id,
                name: r.name,
                cooking_time: r.cooking_time,
            })
            .collect())
    }

    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}

async fn insert_children(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    recipe_id: i64,
    recipe: &NewRecipe,
) -> Result<(), AppError> {
    for tag_id in &recipe.tag_ids {
        sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES ($1, $2)")
            .bind(recipe_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await?;
    }

    for line in &recipe.ingredients {
        sqlx::query(
            r#"
            INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(recipe_id)
        .bind(line.ingredient_id)
        .bind(line.amount)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

#[derive(sqlx::FromRow)]
struct RecipeRow {
    id: i64,
    name: String,
    text: String,
    cooking_time: i32,
    created_at: chrono::DateTime<chrono::Utc>,
    author_id: i64,
    author_username: String,
    author_email: String,
    author_first_name: String,
    author_last_name: String,
    author_created_at: chrono::DateTime<chrono::Utc>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: row.id,
            author: User {
                id: row.author_id,
                username: row.author_username,
                email: row.author_email,
                first_name: row.author_first_name,
                last_name: row.author_last_name,
                created_at: row.author_created_at,
            },
            name: row.name,
            text: row.text,
            cooking_time: row.cooking_time,
            tags: vec![],
            ingredients: vec![],
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RecipeTagRow {
    recipe_id: i64,
    id: i64,
    name: String,
    slug: String,
}

#[derive(sqlx::FromRow)]
struct RecipeLineRow {
    recipe_id: i64,
    ingredient_id: i64,
    name: String,
    measurement_unit: String,
    amount: i32,
}

#[derive(sqlx::FromRow)]
struct RecipeSummaryRow {
    id: i64,
    name: String,
    cooking_time: i32,
}
