//! PostgreSQL implementation of the ingredient repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Ingredient;
use crate::domain::repositories::IngredientRepository;
use crate::error::AppError;

pub struct PgIngredientRepository {
    pool: Arc<PgPool>,
}

impl PgIngredientRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IngredientRepository for PgIngredientRepository {
    async fn list(&self, name: Option<String>) -> Result<Vec<Ingredient>, AppError> {
        let rows = match name {
            Some(name) if !name.is_empty() => {
                // Substring match; prefix hits sort first, then alphabetical.
                sqlx::query_as::<_, IngredientRow>(
                    r#"
                    SELECT id, name, measurement_unit
                    FROM ingredients
                    WHERE name ILIKE '%' || $1 || '%'
                    ORDER BY (name ILIKE $1 || '%') DESC, name
                    "#,
                )
                .bind(name)
                .fetch_all(self.pool.as_ref())
                .await?
            }
            _ => {
                sqlx::query_as::<_, IngredientRow>(
                    "SELECT id, name, measurement_unit FROM ingredients ORDER BY name",
                )
                .fetch_all(self.pool.as_ref())
                .await?
            }
        };

        Ok(rows.into_iter().map(Ingredient::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Ingredient>, AppError> {
        let row = sqlx::query_as::<_, IngredientRow>(
            "SELECT id, name, measurement_unit FROM ingredients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Ingredient::from))
    }

    async fn find_existing_ids(&self, ids: Vec<i64>) -> Result<Vec<i64>, AppError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let existing: Vec<i64> =
            sqlx::query_scalar("SELECT id FROM ingredients WHERE id = ANY($1)")
                .bind(&ids)
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(existing)
    }

    async fn insert_many(&self, items: Vec<(String, String)>) -> Result<u64, AppError> {
        let mut inserted = 0;

        for (name, measurement_unit) in items {
            let result = sqlx::query(
                r#"
                INSERT INTO ingredients (name, measurement_unit)
                VALUES ($1, $2)
                ON CONFLICT ON CONSTRAINT ingredients_name_unit_key DO NOTHING
                "#,
            )
            .bind(name)
            .bind(measurement_unit)
            .execute(self.pool.as_ref())
            .await?;

            inserted += result.rows_affected();
        }

        Ok(inserted)
    }
}

#[derive(sqlx::FromRow)]
struct IngredientRow {
    id: i64,
    name: String,
    measurement_unit: String,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Ingredient {
            id: row.id,
            name: row.name,
            measurement_unit: row.measurement_unit,
        }
    }
}
