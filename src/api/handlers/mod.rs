//! HTTP request handlers.

pub mod favorites;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod shopping_cart;
pub mod short_links;
pub mod subscriptions;
pub mod tags;

pub use favorites::{add_favorite_handler, remove_favorite_handler};
pub use health::health_handler;
pub use ingredients::{get_ingredient_handler, list_ingredients_handler};
pub use recipes::{
    create_recipe_handler, delete_recipe_handler, get_recipe_handler, list_recipes_handler,
    update_recipe_handler,
};
pub use shopping_cart::{
    add_to_cart_handler, download_shopping_cart_handler, remove_from_cart_handler,
};
pub use short_links::{get_link_handler, redirect_handler};
pub use subscriptions::{list_subscriptions_handler, subscribe_handler, unsubscribe_handler};
pub use tags::{get_tag_handler, list_tags_handler};
