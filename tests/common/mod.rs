#![allow(dead_code)]

use recipebook::application::services::hash_token;
use recipebook::state::AppState;
use sqlx::PgPool;

pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";
pub const TEST_BASE_URL: &str = "http://localhost:3000";

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(
        pool,
        TEST_BASE_URL.to_string(),
        TEST_SIGNING_SECRET.to_string(),
    )
}

pub async fn create_user(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (username, email, first_name, last_name)
        VALUES ($1, $1 || '@example.com', 'Test', 'User')
        RETURNING id
        "#,
    )
    .bind(username)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Stores an API token for `user_id`; requests authenticate with the raw
/// `token` value.
pub async fn create_token(pool: &PgPool, user_id: i64, token: &str) {
    let token_hash = hash_token(TEST_SIGNING_SECRET, token);

    sqlx::query("INSERT INTO api_tokens (user_id, name, token_hash) VALUES ($1, 'test', $2)")
        .bind(user_id)
        .bind(token_hash)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_tag(pool: &PgPool, name: &str, slug: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO tags (name, slug) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_ingredient(pool: &PgPool, name: &str, unit: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO ingredients (name, measurement_unit) VALUES ($1, $2) RETURNING id",
    )
    .bind(name)
    .bind(unit)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Creates a bare recipe row; tags and ingredient lines are attached
/// separately.
pub async fn create_recipe(pool: &PgPool, author_id: i64, name: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO recipes (author_id, name, text, cooking_time)
        VALUES ($1, $2, 'Test instructions.', 10)
        RETURNING id
        "#,
    )
    .bind(author_id)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn add_recipe_tag(pool: &PgPool, recipe_id: i64, tag_id: i64) {
    sqlx::query("INSERT INTO recipe_tags (recipe_id, tag_id) VALUES ($1, $2)")
        .bind(recipe_id)
        .bind(tag_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn add_recipe_ingredient(pool: &PgPool, recipe_id: i64, ingredient_id: i64, amount: i32) {
    sqlx::query(
        "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) VALUES ($1, $2, $3)",
    )
    .bind(recipe_id)
    .bind(ingredient_id)
    .bind(amount)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn add_to_cart(pool: &PgPool, user_id: i64, recipe_id: i64) {
    sqlx::query("INSERT INTO shopping_cart (user_id, recipe_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_short_link(pool: &PgPool, recipe_id: i64, code: &str, url: &str) {
    sqlx::query(
        "INSERT INTO short_links (original_url, short_code, recipe_id) VALUES ($1, $2, $3)",
    )
    .bind(url)
    .bind(code)
    .bind(recipe_id)
    .execute(pool)
    .await
    .unwrap();
}
