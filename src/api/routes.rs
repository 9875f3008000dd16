//! API route configuration.
//!
//! Read endpoints are public; callers presenting a Bearer token get
//! personalized mark flags via [`crate::api::middleware::auth`].

use crate::api::handlers::{
    add_favorite_handler, add_to_cart_handler, create_recipe_handler, delete_recipe_handler,
    download_shopping_cart_handler, get_ingredient_handler, get_link_handler, get_recipe_handler,
    get_tag_handler, list_ingredients_handler, list_recipes_handler, list_subscriptions_handler,
    list_tags_handler, remove_favorite_handler, remove_from_cart_handler, subscribe_handler,
    unsubscribe_handler, update_recipe_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Read-only routes, open to anonymous callers.
///
/// # Endpoints
///
/// - `GET /tags`                    - List tags
/// - `GET /tags/{id}`               - Retrieve a tag
/// - `GET /ingredients`             - List/search ingredients
/// - `GET /ingredients/{id}`        - Retrieve an ingredient
/// - `GET /recipes`                 - List recipes (filter + paginate)
/// - `GET /recipes/{id}`            - Retrieve a recipe
/// - `GET /recipes/{id}/get-link`   - Short link for a recipe
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/tags", get(list_tags_handler))
        .route("/tags/{id}", get(get_tag_handler))
        .route("/ingredients", get(list_ingredients_handler))
        .route("/ingredients/{id}", get(get_ingredient_handler))
        .route("/recipes", get(list_recipes_handler))
        .route("/recipes/{id}", get(get_recipe_handler))
        .route("/recipes/{id}/get-link", get(get_link_handler))
}

/// Write and per-user routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /recipes`                        - Create a recipe
/// - `PATCH  /recipes/{id}`                   - Replace a recipe's fields
/// - `DELETE /recipes/{id}`                   - Delete a recipe
/// - `POST   /recipes/{id}/favorite`          - Favorite a recipe
/// - `DELETE /recipes/{id}/favorite`          - Unfavorite a recipe
/// - `POST   /recipes/{id}/shopping_cart`     - Add a recipe to the cart
/// - `DELETE /recipes/{id}/shopping_cart`     - Remove a recipe from the cart
/// - `GET    /recipes/download_shopping_cart` - Aggregated CSV shopping list
/// - `GET    /users/subscriptions`            - List subscriptions
/// - `POST   /users/{id}/subscribe`           - Subscribe to an author
/// - `DELETE /users/{id}/subscribe`           - Unsubscribe from an author
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", post(create_recipe_handler))
        .route(
            "/recipes/{id}",
            delete(delete_recipe_handler).patch(update_recipe_handler),
        )
        .route(
            "/recipes/{id}/favorite",
            post(add_favorite_handler).delete(remove_favorite_handler),
        )
        .route(
            "/recipes/{id}/shopping_cart",
            post(add_to_cart_handler).delete(remove_from_cart_handler),
        )
        .route(
            "/recipes/download_shopping_cart",
            get(download_shopping_cart_handler),
        )
        .route("/users/subscriptions", get(list_subscriptions_handler))
        .route(
            "/users/{id}/subscribe",
            post(subscribe_handler).delete(unsubscribe_handler),
        )
}
