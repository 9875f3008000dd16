//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

const USER_SELECT: &str =
    "SELECT id, username, email, first_name, last_name, created_at FROM users";

pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{USER_SELECT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{USER_SELECT} WHERE username = $1"))
            .bind(username)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, first_name, last_name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, first_name, last_name, created_at
            "#,
        )
        .bind(new_user.username)
        .bind(new_user.email)
        .bind(new_user.first_name)
        .bind(new_user.last_name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(User::from(row))
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            created_at: row.created_at,
        }
    }
}
