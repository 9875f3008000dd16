//! PostgreSQL implementation of the shopping cart repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::CartLine;
use crate::domain::repositories::CartRepository;
use crate::error::AppError;

pub struct PgCartRepository {
    pool: Arc<PgPool>,
}

impl PgCartRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn add(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO shopping_cart (user_id, recipe_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, recipe_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(recipe_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM shopping_cart WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id)
            .bind(recipe_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn marked_ids(&self, user_id: i64, recipe_ids: Vec<i64>) -> Result<Vec<i64>, AppError> {
        if recipe_ids.is_empty() {
            return Ok(vec![]);
        }

        let marked: Vec<i64> = sqlx::query_scalar(
            "SELECT recipe_id FROM shopping_cart WHERE user_id = $1 AND recipe_id = ANY($2)",
        )
        .bind(user_id)
        .bind(&recipe_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(marked)
    }

    /// One row per ingredient line of every recipe in the cart; the same
    /// ingredient appears once per recipe that uses it. Aggregation happens
    /// in the service layer.
    async fn cart_lines(&self, user_id: i64) -> Result<Vec<CartLine>, AppError> {
        let lines = sqlx::query_as::<_, CartLineRow>(
            r#"
            SELECT i.name, i.measurement_unit, ri.amount
            FROM shopping_cart sc
            JOIN recipe_ingredients ri ON ri.recipe_id = sc.recipe_id
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE sc.user_id = $1
            ORDER BY ri.id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(lines.into_iter().map(CartLine::from).collect())
    }
}

#[derive(sqlx::FromRow)]
struct CartLineRow {
    name: String,
    measurement_unit: String,
    amount: i32,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        CartLine {
            name: row.name,
            measurement_unit: row.measurement_unit,
            amount: row.amount,
        }
    }
}
