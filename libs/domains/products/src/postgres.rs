use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::{
    entity,
    error::ProductResult,
    models::Product,
    repository::{ProductRepository, ProductTransaction},
};

#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Wraps a `DatabaseTransaction`, which rolls back when dropped uncommitted
pub struct PgProductTransaction {
    txn: DatabaseTransaction,
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    type Transaction = PgProductTransaction;

    async fn begin(&self) -> ProductResult<PgProductTransaction> {
        let txn = self.db.begin().await?;
        Ok(PgProductTransaction { txn })
    }
}

#[async_trait]
impl ProductTransaction for PgProductTransaction {
    async fn insert(&mut self, product: Product) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = product.into();
        let model = active_model.insert(&self.txn).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn commit(self) -> ProductResult<()> {
        self.txn.commit().await?;
        Ok(())
    }
}
