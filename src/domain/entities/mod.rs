//! Core business entities.

pub mod ingredient;
pub mod recipe;
pub mod shopping_list;
pub mod short_link;
pub mod tag;
pub mod user;

pub use ingredient::Ingredient;
pub use recipe::{IngredientLine, NewIngredientLine, NewRecipe, Recipe, RecipeFilter, RecipeSummary};
pub use shopping_list::{CartLine, ShoppingListItem};
pub use short_link::{NewShortLink, ShortLink};
pub use tag::Tag;
pub use user::{NewUser, Subscription, User};
