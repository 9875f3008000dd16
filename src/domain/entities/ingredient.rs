//! Ingredient entity.

/// An ingredient with its measurement unit.
///
/// Unique per `(name, measurement_unit)` pair at the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}
