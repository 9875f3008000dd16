mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use recipebook::api::handlers::health_handler;
use serde_json::Value;
use sqlx::PgPool;

#[sqlx::test]
async fn test_health_ok(pool: PgPool) {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(common::create_test_state(pool));

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "ok");
}
