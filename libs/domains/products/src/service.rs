//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductPage, UpdateProduct};
use crate::query::{ListParams, QuerySpec};
use crate::repository::ProductRepository;
use crate::validation::{validate_for_create, validate_for_update};

/// Product service providing business logic operations
///
/// Input is validated here, before any repository call.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// One page of summaries plus totals for the whole result set.
    #[instrument(skip(self))]
    pub async fn list_products(&self, params: ListParams) -> ProductResult<ProductPage> {
        let query = QuerySpec::build(&params);

        let (list, total_count) = tokio::try_join!(
            self.repository.find_many(&query),
            self.repository.count(&query.filter),
        )?;

        Ok(ProductPage {
            list,
            total_count,
            page: query.page,
            page_size: query.page_size,
            total_pages: total_count.div_ceil(query.page_size),
        })
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = validate_for_create(input)?;
        self.repository.create(product).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let patch = validate_for_update(input)?;
        self.repository.update(id, patch).await
    }

    /// Delete a product, returning the removed record
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository.delete(id).await
    }
}
