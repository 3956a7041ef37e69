//! 메모리 저장소.
//!
//! 데이터베이스가 설정되지 않은 개발 환경과 테스트에서 사용합니다.
//! 프로세스 종료 시 데이터는 사라집니다.

use async_trait::async_trait;
use chrono::Utc;
use store_core::{NewProduct, NewUser, Product, StoreError, StoreResult, User};
use tokio::sync::RwLock;

use super::{ProductStore, UserStore};

const EMAIL_CONSTRAINT: &str = "users_email_key";

#[derive(Debug)]
struct Table<T> {
    next_id: i64,
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            rows: Vec::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// 메모리 사용자 저장소.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    table: RwLock<Table<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let mut table = self.table.write().await;
        if table.rows.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(EMAIL_CONSTRAINT.to_string()));
        }

        let created = User {
            id: table.allocate_id(),
            name: user.name,
            email: user.email,
            password: user.password,
            role: user.role,
            created_at: Utc::now(),
        };
        table.rows.push(created.clone());
        Ok(created)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.name == name).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.email == email).cloned())
    }

    async fn update(&self, user: &User) -> StoreResult<bool> {
        let mut table = self.table.write().await;
        if table
            .rows
            .iter()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(StoreError::Conflict(EMAIL_CONSTRAINT.to_string()));
        }

        match table.rows.iter_mut().find(|u| u.id == user.id) {
            Some(row) => {
                *row = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|u| u.id != id);
        Ok(table.rows.len() != before)
    }
}

/// 메모리 상품 저장소.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    table: RwLock<Table<Product>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn create(&self, product: NewProduct) -> StoreResult<Product> {
        let mut table = self.table.write().await;
        let created = Product {
            id: table.allocate_id(),
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            created_at: Utc::now(),
        };
        table.rows.push(created.clone());
        Ok(created)
    }

    async fn list(&self) -> StoreResult<Vec<Product>> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Product>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, id: i64, product: NewProduct) -> StoreResult<Option<Product>> {
        let mut table = self.table.write().await;
        Ok(table.rows.iter_mut().find(|p| p.id == id).map(|row| {
            row.name = product.name;
            row.description = product.description;
            row.price = product.price;
            row.quantity = product.quantity;
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|p| p.id != id);
        Ok(table.rows.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "alice".to_string(),
            email: email.to_string(),
            password: "$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA".to_string(),
            role: "user".to_string(),
        }
    }

    #[tokio::test]
    async fn test_user_create_and_find() {
        let store = MemoryUserStore::new();
        let created = store.create(new_user("alice@example.com")).await.unwrap();
        assert_eq!(created.id, 1);

        let by_email = store.find_by_email("alice@example.com").await.unwrap();
        assert_eq!(by_email, Some(created.clone()));
        let by_name = store.find_by_name("alice").await.unwrap();
        assert_eq!(by_name, Some(created.clone()));
        assert_eq!(store.find_by_id(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_user_duplicate_email() {
        let store = MemoryUserStore::new();
        store.create(new_user("dup@example.com")).await.unwrap();

        let result = store.create(new_user("dup@example.com")).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_user_update_conflict_and_missing() {
        let store = MemoryUserStore::new();
        let a = store.create(new_user("a@example.com")).await.unwrap();
        let mut b = store.create(new_user("b@example.com")).await.unwrap();

        b.email = a.email.clone();
        assert!(matches!(
            store.update(&b).await,
            Err(StoreError::Conflict(_))
        ));

        let mut ghost = a.clone();
        ghost.id = 42;
        ghost.email = "ghost@example.com".to_string();
        assert!(!store.update(&ghost).await.unwrap());
    }

    #[tokio::test]
    async fn test_user_delete() {
        let store = MemoryUserStore::new();
        let user = store.create(new_user("gone@example.com")).await.unwrap();

        assert!(store.delete(user.id).await.unwrap());
        assert!(!store.delete(user.id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_product_update() {
        let store = MemoryProductStore::new();
        let created = store
            .create(NewProduct {
                name: "Mouse".to_string(),
                description: "Wireless".to_string(),
                price: dec!(19.99),
                quantity: 3,
            })
            .await
            .unwrap();

        let updated = store
            .update(
                created.id,
                NewProduct {
                    name: "Mouse".to_string(),
                    description: "Wireless, silent".to_string(),
                    price: dec!(24.99),
                    quantity: 2,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.price, dec!(24.99));
        assert_eq!(updated.created_at, created.created_at);

        let missing = store
            .update(
                99,
                NewProduct {
                    name: "x".to_string(),
                    description: "y".to_string(),
                    price: dec!(1),
                    quantity: 1,
                },
            )
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
