mod common;

use axum::{Router, middleware};
use axum_test::TestServer;
use recipebook::api::middleware::auth;
use recipebook::api::routes::protected_routes;
use recipebook::state::AppState;
use sqlx::PgPool;

fn app(state: AppState) -> Router {
    let protected = protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new().nest("/api", protected).with_state(state)
}

#[sqlx::test]
async fn test_add_and_remove_cart_entry(pool: PgPool) {
    let server = TestServer::new(app(common::create_test_state(pool.clone()))).unwrap();

    let user_id = common::create_user(&pool, "shopper").await;
    common::create_token(&pool, user_id, "shopper-token").await;
    let author_id = common::create_user(&pool, "chef").await;
    let recipe_id = common::create_recipe(&pool, author_id, "Pancakes").await;

    let response = server
        .post(&format!("/api/recipes/{recipe_id}/shopping_cart"))
        .add_header("Authorization", "Bearer shopper-token")
        .await;
    assert_eq!(response.status_code(), 201);

    // Duplicate add is a client error.
    let response = server
        .post(&format!("/api/recipes/{recipe_id}/shopping_cart"))
        .add_header("Authorization", "Bearer shopper-token")
        .await;
    response.assert_status_bad_request();

    let response = server
        .delete(&format!("/api/recipes/{recipe_id}/shopping_cart"))
        .add_header("Authorization", "Bearer shopper-token")
        .await;
    assert_eq!(response.status_code(), 204);

    // Removing an absent entry is a client error.
    let response = server
        .delete(&format!("/api/recipes/{recipe_id}/shopping_cart"))
        .add_header("Authorization", "Bearer shopper-token")
        .await;
    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_add_unknown_recipe_to_cart(pool: PgPool) {
    let server = TestServer::new(app(common::create_test_state(pool.clone()))).unwrap();

    let user_id = common::create_user(&pool, "shopper").await;
    common::create_token(&pool, user_id, "shopper-token").await;

    let response = server
        .post("/api/recipes/9999/shopping_cart")
        .add_header("Authorization", "Bearer shopper-token")
        .await;

    response.assert_status_not_found();
}

#[sqlx::test]
async fn test_download_aggregates_across_recipes(pool: PgPool) {
    let server = TestServer::new(app(common::create_test_state(pool.clone()))).unwrap();

    let user_id = common::create_user(&pool, "shopper").await;
    common::create_token(&pool, user_id, "shopper-token").await;
    let author_id = common::create_user(&pool, "chef").await;

    let flour = common::create_ingredient(&pool, "flour", "g").await;
    let milk = common::create_ingredient(&pool, "milk", "ml").await;

    let pancakes = common::create_recipe(&pool, author_id, "Pancakes").await;
    common::add_recipe_ingredient(&pool, pancakes, flour, 200).await;
    common::add_recipe_ingredient(&pool, pancakes, milk, 300).await;

    let bread = common::create_recipe(&pool, author_id, "Bread").await;
    common::add_recipe_ingredient(&pool, bread, flour, 500).await;

    common::add_to_cart(&pool, user_id, pancakes).await;
    common::add_to_cart(&pool, user_id, bread).await;

    let response = server
        .get("/api/recipes/download_shopping_cart")
        .add_header("Authorization", "Bearer shopper-token")
        .await;

    response.assert_status_ok();
    assert!(
        response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );
    assert!(
        response
            .header("content-disposition")
            .to_str()
            .unwrap()
            .contains("attachment")
    );

    // Shared ingredient collapses into one summed row, sorted by name.
    let body = response.text();
    assert_eq!(
        body,
        "Name;Measurement unit;Amount\nflour;g;700\nmilk;ml;300\n"
    );
}

#[sqlx::test]
async fn test_download_empty_cart(pool: PgPool) {
    let server = TestServer::new(app(common::create_test_state(pool.clone()))).unwrap();

    let user_id = common::create_user(&pool, "shopper").await;
    common::create_token(&pool, user_id, "shopper-token").await;

    let response = server
        .get("/api/recipes/download_shopping_cart")
        .add_header("Authorization", "Bearer shopper-token")
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), "Name;Measurement unit;Amount\n");
}

#[sqlx::test]
async fn test_download_groups_by_name_and_unit(pool: PgPool) {
    let server = TestServer::new(app(common::create_test_state(pool.clone()))).unwrap();

    let user_id = common::create_user(&pool, "shopper").await;
    common::create_token(&pool, user_id, "shopper-token").await;
    let author_id = common::create_user(&pool, "chef").await;

    // Same name under two units stays as two rows.
    let sugar_g = common::create_ingredient(&pool, "sugar", "g").await;
    let sugar_tbsp = common::create_ingredient(&pool, "sugar", "tbsp").await;

    let recipe = common::create_recipe(&pool, author_id, "Cake").await;
    common::add_recipe_ingredient(&pool, recipe, sugar_g, 100).await;
    common::add_recipe_ingredient(&pool, recipe, sugar_tbsp, 2).await;

    common::add_to_cart(&pool, user_id, recipe).await;

    let response = server
        .get("/api/recipes/download_shopping_cart")
        .add_header("Authorization", "Bearer shopper-token")
        .await;

    assert_eq!(
        response.text(),
        "Name;Measurement unit;Amount\nsugar;g;100\nsugar;tbsp;2\n"
    );
}
