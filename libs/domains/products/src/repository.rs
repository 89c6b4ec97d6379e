use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product, ProductPatch, ProductSummary};
use crate::query::{ProductFilter, QuerySpec, SortKey};

/// Repository trait for Product persistence
///
/// Every call is independent; there are no cross-call transactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product, assigning its id and timestamps
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// One page of summaries; no matches is an empty vec, not an error
    async fn find_many(&self, query: &QuerySpec) -> ProductResult<Vec<ProductSummary>>;

    /// Total matches for `filter`, ignoring pagination
    async fn count(&self, filter: &ProductFilter) -> ProductResult<u64>;

    /// Apply the supplied fields and refresh `updated_at`
    async fn update(&self, id: Uuid, patch: ProductPatch) -> ProductResult<Product>;

    /// Remove a product and return it
    async fn delete(&self, id: Uuid) -> ProductResult<Product>;
}

/// Orders products for `sort`, with the newer id first on ties.
pub(crate) fn compare(sort: SortKey, a: &Product, b: &Product) -> Ordering {
    let primary = match sort {
        SortKey::Recent => b.created_at.cmp(&a.created_at),
        SortKey::Favorite => b.favorite_count.cmp(&a.favorite_count),
    };
    primary.then_with(|| b.id.cmp(&a.id))
}

/// In-memory repository for development and tests.
///
/// Natural order is insertion order.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let product = Product::new(input);
        self.products.write().await.push(product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_many(&self, query: &QuerySpec) -> ProductResult<Vec<ProductSummary>> {
        let products = self.products.read().await;

        let mut matching: Vec<&Product> = products
            .iter()
            .filter(|p| query.filter.matches(&p.name, &p.description))
            .collect();

        if let Some(sort) = query.sort {
            matching.sort_by(|a, b| compare(sort, a, b));
        }

        Ok(matching
            .into_iter()
            .skip(usize::try_from(query.skip).unwrap_or(usize::MAX))
            .take(usize::try_from(query.limit).unwrap_or(usize::MAX))
            .map(Product::summary)
            .collect())
    }

    async fn count(&self, filter: &ProductFilter) -> ProductResult<u64> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| filter.matches(&p.name, &p.description))
            .count() as u64)
    }

    async fn update(&self, id: Uuid, patch: ProductPatch) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;
        product.apply_patch(patch);

        tracing::info!(product_id = %id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;
        let removed = products.remove(index);

        tracing::info!(product_id = %id, "Deleted product");
        Ok(removed)
    }
}
