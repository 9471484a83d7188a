//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::catalog::{User, UserDetails};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::UserRepository;

use super::offer_repository::db_error;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, details: UserDetails) -> Result<User, DomainError> {
        let result = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (name, email) VALUES ($1, $2) \
             RETURNING id, name, email, created_at",
        )
        .bind(details.name())
        .bind(details.email())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into_user()),
            Err(e) => Err(write_error("insert user", details.email(), e)),
        }
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, created_at FROM users WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch user", e))?;

        Ok(row.map(UserRow::into_user))
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, created_at FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list users", e))?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }

    async fn update(&self, id: UserId, details: UserDetails) -> Result<Option<User>, DomainError> {
        let result = sqlx::query_as::<_, UserRow>(
            "UPDATE users SET name = $2, email = $3 WHERE id = $1 \
             RETURNING id, name, email, created_at",
        )
        .bind(id.as_i32())
        .bind(details.name())
        .bind(details.email())
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.map(UserRow::into_user)),
            Err(e) => Err(write_error("update user", details.email(), e)),
        }
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn write_error(what: &str, email: &str, e: sqlx::Error) -> DomainError {
    match e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DomainError::new(
            ErrorCode::Conflict,
            format!("user with email {}", email),
        ),
        e => db_error(what, e),
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: UserId::new(self.id),
            name: self.name,
            email: self.email,
            created_at: Timestamp::from_datetime(self.created_at),
        }
    }
}
