//! User Repository
//!
//! 사용자 계정 관련 데이터베이스 연산을 담당합니다.

use async_trait::async_trait;
use sqlx::PgPool;
use store_core::{NewUser, StoreResult, User};

use super::UserStore;

const USER_COLUMNS: &str = "id, name, email, password, role, created_at";

/// PostgreSQL 사용자 저장소.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE {} = $1", USER_COLUMNS, column);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let sql = format!(
            "INSERT INTO users (name, email, password, role) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );
        let created = sqlx::query_as::<_, User>(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.role)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<User>> {
        self.find_one("name", name).await
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.find_one("email", email).await
    }

    async fn update(&self, user: &User) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, email = $3, password = $4, role = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.role)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
