mod common;

use recipebook::domain::repositories::CartRepository;
use recipebook::infrastructure::persistence::PgCartRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
async fn test_add_is_idempotent_at_storage_layer(pool: PgPool) {
    let user_id = common::create_user(&pool, "shopper").await;
    let author_id = common::create_user(&pool, "chef").await;
    let recipe_id = common::create_recipe(&pool, author_id, "Pancakes").await;

    let repo = PgCartRepository::new(Arc::new(pool));

    assert!(repo.add(user_id, recipe_id).await.unwrap());
    // Second insert reports no new row; the service turns this into a
    // client error.
    assert!(!repo.add(user_id, recipe_id).await.unwrap());

    assert!(repo.remove(user_id, recipe_id).await.unwrap());
    assert!(!repo.remove(user_id, recipe_id).await.unwrap());
}

#[sqlx::test]
async fn test_cart_lines_joins_all_cart_recipes(pool: PgPool) {
    let user_id = common::create_user(&pool, "shopper").await;
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

    let repo = PgCartRepository::new(Arc::new(pool));

    // One raw line per recipe ingredient; no aggregation here.
    let lines = repo.cart_lines(user_id).await.unwrap();
    assert_eq!(lines.len(), 3);

    let flour_lines: Vec<_> = lines.iter().filter(|l| l.name == "flour").collect();
    assert_eq!(flour_lines.len(), 2);
    let total: i64 = flour_lines.iter().map(|l| i64::from(l.amount)).sum();
    assert_eq!(total, 700);
}

#[sqlx::test]
async fn test_cart_lines_empty_for_empty_cart(pool: PgPool) {
    let user_id = common::create_user(&pool, "shopper").await;

    let repo = PgCartRepository::new(Arc::new(pool));

    assert!(repo.cart_lines(user_id).await.unwrap().is_empty());
}

#[sqlx::test]
async fn test_marked_ids(pool: PgPool) {
    let user_id = common::create_user(&pool, "shopper").await;
    let author_id = common::create_user(&pool, "chef").await;

    let pancakes = common::create_recipe(&pool, author_id, "Pancakes").await;
    let bread = common::create_recipe(&pool, author_id, "Bread").await;

    common::add_to_cart(&pool, user_id, pancakes).await;

    let repo = PgCartRepository::new(Arc::new(pool));

    let marked = repo
        .marked_ids(user_id, vec![pancakes, bread])
        .await
        .unwrap();
    assert_eq!(marked, vec![pancakes]);

    assert!(repo.marked_ids(user_id, vec![]).await.unwrap().is_empty());
}
