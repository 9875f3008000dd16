//! Repository traits abstracting the relational store.
//!
//! Each trait is implemented by a PostgreSQL repository under
//! [`crate::infrastructure::persistence`] and automocked for service unit
//! tests.

pub mod cart_repository;
pub mod favorite_repository;
pub mod follow_repository;
pub mod ingredient_repository;
pub mod recipe_repository;
pub mod short_link_repository;
pub mod tag_repository;
pub mod token_repository;
pub mod user_repository;

pub use cart_repository::CartRepository;
pub use favorite_repository::FavoriteRepository;
pub use follow_repository::FollowRepository;
pub use ingredient_repository::IngredientRepository;
pub use recipe_repository::RecipeRepository;
pub use short_link_repository::ShortLinkRepository;
pub use tag_repository::TagRepository;
pub use token_repository::{ApiToken, TokenRepository};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use cart_repository::MockCartRepository;
#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
#[cfg(test)]
pub use follow_repository::MockFollowRepository;
#[cfg(test)]
pub use ingredient_repository::MockIngredientRepository;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
