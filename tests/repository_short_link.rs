mod common;

use recipebook::application::services::ShortLinkService;
use recipebook::domain::entities::NewShortLink;
use recipebook::domain::repositories::ShortLinkRepository;
use recipebook::error::AppError;
use recipebook::infrastructure::persistence::PgShortLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
async fn test_insert_and_find_by_code(pool: PgPool) {
    let author_id = common::create_user(&pool, "chef").await;
    let recipe_id = common::create_recipe(&pool, author_id, "Pancakes").await;

    let repo = PgShortLinkRepository::new(Arc::new(pool));

    let link = repo
        .insert(NewShortLink {
            original_url: "http://localhost:3000/recipes/1".to_string(),
            short_code: "aB3dE5fG7h".to_string(),
            recipe_id,
        })
        .await
        .unwrap();

    assert_eq!(link.short_code, "aB3dE5fG7h");
    assert_eq!(link.recipe_id, recipe_id);

    let found = repo.find_by_code("aB3dE5fG7h").await.unwrap().unwrap();
    assert_eq!(found.id, link.id);
    assert_eq!(found.original_url, "http://localhost:3000/recipes/1");

    assert!(repo.find_by_code("zzzzzzzzzz").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_duplicate_code_maps_to_conflict(pool: PgPool) {
    let author_id = common::create_user(&pool, "chef").await;
    let recipe_id = common::create_recipe(&pool, author_id, "Pancakes").await;

    let repo = PgShortLinkRepository::new(Arc::new(pool));

    let new_link = |url: &str| NewShortLink {
        original_url: url.to_string(),
        short_code: "aB3dE5fG7h".to_string(),
        recipe_id,
    };

    repo.insert(new_link("http://localhost:3000/recipes/1"))
        .await
        .unwrap();

    let err = repo
        .insert(new_link("http://localhost:3000/recipes/2"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[sqlx::test]
async fn test_service_allocates_through_store(pool: PgPool) {
    let author_id = common::create_user(&pool, "chef").await;
    let recipe_id = common::create_recipe(&pool, author_id, "Pancakes").await;

    let service = ShortLinkService::new(Arc::new(PgShortLinkRepository::new(Arc::new(
        pool.clone(),
    ))));

    let link = service
        .create_for_recipe(recipe_id, "http://localhost:3000/recipes/1")
        .await
        .unwrap();

    assert_eq!(link.short_code.len(), 10);
    assert!(link.short_code.chars().all(|c| c.is_ascii_alphanumeric()));

    let resolved = service.resolve(&link.short_code).await.unwrap();
    assert_eq!(resolved, "http://localhost:3000/recipes/1");
}

#[sqlx::test]
async fn test_find_by_recipe(pool: PgPool) {
    let author_id = common::create_user(&pool, "chef").await;
    let recipe_id = common::create_recipe(&pool, author_id, "Pancakes").await;

    let repo = PgShortLinkRepository::new(Arc::new(pool));

    assert!(repo.find_by_recipe(recipe_id).await.unwrap().is_none());

    repo.insert(NewShortLink {
        original_url: "http://localhost:3000/recipes/1".to_string(),
        short_code: "aB3dE5fG7h".to_string(),
        recipe_id,
    })
    .await
    .unwrap();

    let found = repo.find_by_recipe(recipe_id).await.unwrap().unwrap();
    assert_eq!(found.short_code, "aB3dE5fG7h");
}
