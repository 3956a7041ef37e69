//! 상품 서비스.

use std::sync::Arc;

use store_core::{NewProduct, Product};
use tracing::{info, warn};

use super::ServiceError;
use crate::repository::ProductStore;

/// 상품 서비스.
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl std::fmt::Debug for ProductService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductService").finish_non_exhaustive()
    }
}

fn check_id(id: i64) -> Result<(), ServiceError> {
    if id <= 0 {
        return Err(ServiceError::validation("invalid product id"));
    }
    Ok(())
}

fn check_product(product: &NewProduct) -> Result<(), ServiceError> {
    product.check().map_err(|reason| {
        warn!(reason, "Rejected product input");
        ServiceError::validation(reason)
    })
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, product: NewProduct) -> Result<Product, ServiceError> {
        check_product(&product)?;
        let created = self.store.create(product).await?;

        info!(product_id = created.id, "Product created");
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.store.list().await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Product, ServiceError> {
        check_id(id)?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("product {}", id)))
    }

    pub async fn update(&self, id: i64, product: NewProduct) -> Result<Product, ServiceError> {
        check_id(id)?;
        check_product(&product)?;

        let updated = self
            .store
            .update(id, product)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("product {}", id)))?;

        info!(product_id = id, "Product updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        check_id(id)?;
        if !self.store.delete(id).await? {
            return Err(ServiceError::NotFound(format!("product {}", id)));
        }

        info!(product_id = id, "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryProductStore;
    use rust_decimal_macros::dec;

    fn service() -> ProductService {
        ProductService::new(Arc::new(MemoryProductStore::new()))
    }

    fn keyboard() -> NewProduct {
        NewProduct {
            name: "Keyboard".to_string(),
            description: "Mechanical keyboard".to_string(),
            price: dec!(89.90),
            quantity: 5,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service();
        let created = service.create(keyboard()).await.unwrap();

        let fetched = service.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_product() {
        let service = service();
        let mut product = keyboard();
        product.price = dec!(0);

        assert!(matches!(
            service.create(product).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let service = service();
        let created = service.create(keyboard()).await.unwrap();

        let mut changed = keyboard();
        changed.quantity = 9;
        let updated = service.update(created.id, changed).await.unwrap();
        assert_eq!(updated.quantity, 9);

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.get_by_id(created.id).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(created.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_ids() {
        let service = service();
        assert!(matches!(
            service.get_by_id(0).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.update(-1, keyboard()).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.update(77, keyboard()).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
