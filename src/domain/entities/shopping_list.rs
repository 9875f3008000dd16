//! Shopping list value types.

/// One raw ingredient line from a recipe currently in a user's cart,
/// before aggregation. The same (name, unit) pair may appear many times.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// One aggregated shopping list row: total amount per (name, unit) group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}
