use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use crate::error::ProductResult;
use crate::models::Product;

/// Repository trait for Product persistence
///
/// Writes happen inside a unit of work obtained from [`begin`](Self::begin).
#[cfg_attr(test, mockall::automock(type Transaction = MockProductTransaction;))]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    type Transaction: ProductTransaction + 'static;

    /// Start a unit of work
    async fn begin(&self) -> ProductResult<Self::Transaction>;
}

/// A unit of work against the product store
///
/// Dropping a transaction without calling [`commit`](Self::commit) rolls back
/// everything written through it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductTransaction: Send {
    /// Insert a product; the store assigns its id
    async fn insert(&mut self, product: Product) -> ProductResult<Product>;

    /// Make all writes of this unit of work durable
    async fn commit(self) -> ProductResult<()>;
}

#[derive(Debug, Default)]
struct Store {
    products: BTreeMap<i64, Product>,
    last_id: i64,
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// A transaction holds the store's write lock until it is committed or
/// dropped, so units of work are serialized.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All committed products ordered by id
    pub async fn all(&self) -> Vec<Product> {
        let store = self.store.read().await;
        store.products.values().cloned().collect()
    }
}

pub struct InMemoryProductTransaction {
    store: OwnedRwLockWriteGuard<Store>,
    staged: Vec<Product>,
    last_id: i64,
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    type Transaction = InMemoryProductTransaction;

    async fn begin(&self) -> ProductResult<InMemoryProductTransaction> {
        let store = self.store.clone().write_owned().await;
        let last_id = store.last_id;

        Ok(InMemoryProductTransaction {
            store,
            staged: Vec::new(),
            last_id,
        })
    }
}

#[async_trait]
impl ProductTransaction for InMemoryProductTransaction {
    async fn insert(&mut self, mut product: Product) -> ProductResult<Product> {
        self.last_id += 1;
        product.id = Some(self.last_id);
        self.staged.push(product.clone());

        tracing::info!(product_id = self.last_id, "Created product");
        Ok(product)
    }

    async fn commit(mut self) -> ProductResult<()> {
        self.store.last_id = self.last_id;
        for product in self.staged.drain(..) {
            if let Some(id) = product.id {
                self.store.products.insert(id, product);
            }
        }
        Ok(())
    }
}
