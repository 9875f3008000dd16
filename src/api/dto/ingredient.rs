//! Ingredient catalog payloads.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Ingredient;

/// Query parameters for the ingredient list endpoint.
#[derive(Debug, Deserialize)]
pub struct IngredientListParams {
    /// Case-insensitive name search; prefix matches sort first.
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IngredientResponse {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}
