//! PostgreSQL-backed repository implementations.

mod pg_cart_repository;
mod pg_favorite_repository;
mod pg_follow_repository;
mod pg_ingredient_repository;
mod pg_recipe_repository;
mod pg_short_link_repository;
mod pg_tag_repository;
mod pg_token_repository;
mod pg_user_repository;

pub use pg_cart_repository::PgCartRepository;
pub use pg_favorite_repository::PgFavoriteRepository;
pub use pg_follow_repository::PgFollowRepository;
pub use pg_ingredient_repository::PgIngredientRepository;
pub use pg_recipe_repository::PgRecipeRepository;
pub use pg_short_link_repository::PgShortLinkRepository;
pub use pg_tag_repository::PgTagRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
