//! 저장소 계층.
//!
//! 서비스는 `UserStore` / `ProductStore` 트레이트에만 의존합니다.
//! PostgreSQL 구현은 운영용, 메모리 구현은 데이터베이스 미설정 시와 테스트용입니다.

use async_trait::async_trait;
use store_core::{NewProduct, NewUser, Product, StoreResult, User};

mod memory;
mod products;
mod users;

pub use memory::{MemoryProductStore, MemoryUserStore};
pub use products::PgProductRepository;
pub use users::PgUserRepository;

/// 사용자 저장소.
///
/// `create`와 `update`로 전달되는 비밀번호는 이미 해시된 값입니다.
/// 이메일 중복은 `StoreError::Conflict`로 보고됩니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> StoreResult<User>;

    async fn list(&self) -> StoreResult<Vec<User>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// 전체 필드를 교체합니다. 대상이 없으면 `false`.
    async fn update(&self, user: &User) -> StoreResult<bool>;

    /// 대상이 없으면 `false`.
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

/// 상품 저장소.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn create(&self, product: NewProduct) -> StoreResult<Product>;

    async fn list(&self) -> StoreResult<Vec<Product>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Product>>;

    /// 수정된 상품을 반환합니다. 대상이 없으면 `None`.
    async fn update(&self, id: i64, product: NewProduct) -> StoreResult<Option<Product>>;

    async fn delete(&self, id: i64) -> StoreResult<bool>;
}
