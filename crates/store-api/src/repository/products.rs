//! Product Repository
//!
//! 상품 관련 데이터베이스 연산을 담당합니다.

use async_trait::async_trait;
use sqlx::PgPool;
use store_core::{NewProduct, Product, StoreResult};

use super::ProductStore;

/// PostgreSQL 상품 저장소.
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductRepository {
    async fn create(&self, product: NewProduct) -> StoreResult<Product> {
        let created = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, price, quantity, created_at
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, quantity, created_at FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, quantity, created_at FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn update(&self, id: i64, product: NewProduct) -> StoreResult<Option<Product>> {
        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4, quantity = $5
            WHERE id = $1
            RETURNING id, name, description, price, quantity, created_at
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
