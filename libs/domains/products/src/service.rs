use std::sync::Arc;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::Product;
use crate::repository::{ProductRepository, ProductTransaction};

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Persist a new product and return it with its store-assigned id
    ///
    /// Any id on the input is discarded. The insert runs in its own unit of
    /// work; on any failure the unit of work is dropped and nothing is stored.
    #[instrument(skip(self, product), fields(product_name = ?product.name))]
    pub async fn create_product(&self, mut product: Product) -> ProductResult<Product> {
        let mut txn = self.repository.begin().await?;

        product.id = None;
        let created = txn.insert(product).await?;

        txn.commit().await?;
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductError;
    use crate::repository::{MockProductRepository, MockProductTransaction};

    fn assigning_transaction(id: i64) -> MockProductTransaction {
        let mut txn = MockProductTransaction::new();
        txn.expect_insert()
            .withf(|product| product.id.is_none())
            .times(1)
            .returning(move |mut product| {
                product.id = Some(id);
                Ok(product)
            });
        txn
    }

    #[tokio::test]
    async fn test_create_product_clears_client_id() {
        let mut txn = assigning_transaction(1);
        txn.expect_commit().times(1).returning(|| Ok(()));

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_begin()
            .times(1)
            .return_once(move || Ok(txn));

        let service = ProductService::new(mock_repo);
        let mut input = Product::new("Widget", 9.99);
        input.id = Some(999);

        let created = service.create_product(input).await.unwrap();

        assert_eq!(created.id, Some(1));
        assert_eq!(created.name.as_deref(), Some("Widget"));
        assert_eq!(created.price, Some(9.99));
    }

    #[tokio::test]
    async fn test_create_product_zero_id_is_replaced() {
        let mut txn = assigning_transaction(7);
        txn.expect_commit().times(1).returning(|| Ok(()));

        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_begin().return_once(move || Ok(txn));

        let service = ProductService::new(mock_repo);
        let mut input = Product::new("Widget", 9.99);
        input.id = Some(0);

        let created = service.create_product(input).await.unwrap();

        assert_eq!(created.id, Some(7));
    }

    #[tokio::test]
    async fn test_begin_failure_propagates() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_begin()
            .times(1)
            .returning(|| Err(ProductError::Database("connection refused".into())));

        let service = ProductService::new(mock_repo);
        let err = service
            .create_product(Product::new("Widget", 9.99))
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::Database(_)));
    }

    #[tokio::test]
    async fn test_insert_failure_skips_commit() {
        let mut txn = MockProductTransaction::new();
        txn.expect_insert()
            .times(1)
            .returning(|_| Err(ProductError::Database("duplicate key".into())));
        txn.expect_commit().never();

        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_begin().return_once(move || Ok(txn));

        let service = ProductService::new(mock_repo);
        let err = service
            .create_product(Product::new("Widget", 9.99))
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::Database(msg) if msg == "duplicate key"));
    }

    #[tokio::test]
    async fn test_commit_failure_propagates() {
        let mut txn = assigning_transaction(1);
        txn.expect_commit()
            .times(1)
            .returning(|| Err(ProductError::Database("serialization failure".into())));

        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_begin().return_once(move || Ok(txn));

        let service = ProductService::new(mock_repo);
        let result = service.create_product(Product::new("Widget", 9.99)).await;

        assert!(result.is_err());
    }
}
