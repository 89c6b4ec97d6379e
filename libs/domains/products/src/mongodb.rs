//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{self, doc, Bson, Document},
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product, ProductPatch, ProductSummary};
use crate::query::{ProductFilter, QuerySpec, SortKey};
use crate::repository::ProductRepository;

pub const COLLECTION_NAME: &str = "products";

/// Stored form of a product
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    description: String,
    price: i64,
    tags: Vec<String>,
    images: Vec<String>,
    favorite_count: i64,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

/// Projection of [`ProductDocument`] used by list queries
#[derive(Debug, Deserialize)]
struct ProductSummaryDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    price: i64,
    created_at: bson::DateTime,
}

fn parse_id(id: &str) -> ProductResult<Uuid> {
    Uuid::parse_str(id).map_err(|e| ProductError::Database(format!("stored id '{}': {}", id, e)))
}

fn to_chrono(value: bson::DateTime) -> ProductResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value.timestamp_millis())
        .ok_or_else(|| ProductError::Database(format!("stored timestamp out of range: {}", value)))
}

fn to_bson_datetime(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

impl ProductDocument {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            tags: product.tags.clone(),
            images: product.images.clone(),
            favorite_count: product.favorite_count,
            created_at: to_bson_datetime(product.created_at),
            updated_at: to_bson_datetime(product.updated_at),
        }
    }

    fn into_product(self) -> ProductResult<Product> {
        Ok(Product {
            id: parse_id(&self.id)?,
            name: self.name,
            description: self.description,
            price: self.price,
            tags: self.tags,
            images: self.images,
            favorite_count: self.favorite_count,
            created_at: to_chrono(self.created_at)?,
            updated_at: to_chrono(self.updated_at)?,
        })
    }
}

impl ProductSummaryDocument {
    fn into_summary(self) -> ProductResult<ProductSummary> {
        Ok(ProductSummary {
            id: parse_id(&self.id)?,
            name: self.name,
            price: self.price,
            created_at: to_chrono(self.created_at)?,
        })
    }
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION_NAME)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Create the indexes backing the list sorts and keyword search
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "created_at": -1, "_id": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "favorite_count": -1, "_id": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_favorite_count".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(IndexOptions::builder().name("idx_name".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "description": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_description".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": id.to_string() }
    }

    /// Keyword becomes a case-insensitive regex on name or description, with
    /// metacharacters escaped so it matches literally.
    fn build_filter(filter: &ProductFilter) -> Document {
        match &filter.keyword {
            None => doc! {},
            Some(keyword) => {
                let pattern = regex::escape(keyword);
                doc! {
                    "$or": [
                        { "name": { "$regex": pattern.as_str(), "$options": "i" } },
                        { "description": { "$regex": pattern.as_str(), "$options": "i" } },
                    ]
                }
            }
        }
    }

    fn build_sort(sort: SortKey) -> Document {
        match sort {
            SortKey::Recent => doc! { "created_at": -1, "_id": -1 },
            SortKey::Favorite => doc! { "favorite_count": -1, "_id": -1 },
        }
    }

    fn build_projection(fields: &[&str]) -> Document {
        fields
            .iter()
            .map(|field| (field.to_string(), Bson::Int32(1)))
            .collect()
    }

    fn build_find_options(query: &QuerySpec) -> FindOptions {
        let mut options = FindOptions::builder()
            .skip(query.skip)
            .limit(i64::try_from(query.limit).unwrap_or(i64::MAX))
            .projection(Self::build_projection(query.fields))
            .build();
        options.sort = query.sort.map(Self::build_sort);
        options
    }

    fn build_update(patch: ProductPatch) -> Document {
        let mut set = doc! { "updated_at": bson::DateTime::now() };

        if let Some(name) = patch.name {
            set.insert("name", name);
        }
        if let Some(description) = patch.description {
            set.insert("description", description);
        }
        if let Some(price) = patch.price {
            set.insert("price", price);
        }
        if let Some(tags) = patch.tags {
            set.insert("tags", tags);
        }
        if let Some(images) = patch.images {
            set.insert("images", images);
        }
        if let Some(favorite_count) = patch.favorite_count {
            set.insert("favorite_count", favorite_count);
        }

        doc! { "$set": set }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let document = ProductDocument::from_product(&Product::new(input));
        self.collection.insert_one(&document).await?;

        let product = document.into_product()?;
        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        self.collection
            .find_one(Self::id_filter(id))
            .await?
            .map(ProductDocument::into_product)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_many(&self, query: &QuerySpec) -> ProductResult<Vec<ProductSummary>> {
        let options = Self::build_find_options(query);

        let cursor = self
            .collection
            .clone_with_type::<ProductSummaryDocument>()
            .find(Self::build_filter(&query.filter))
            .with_options(options)
            .await?;
        let documents: Vec<ProductSummaryDocument> = cursor.try_collect().await?;

        documents
            .into_iter()
            .map(ProductSummaryDocument::into_summary)
            .collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &ProductFilter) -> ProductResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(filter))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: Uuid, patch: ProductPatch) -> ProductResult<Product> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let document = self
            .collection
            .find_one_and_update(Self::id_filter(id), Self::build_update(patch))
            .with_options(options)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        tracing::info!(product_id = %id, "Product updated successfully");
        document.into_product()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<Product> {
        let document = self
            .collection
            .find_one_and_delete(Self::id_filter(id))
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        tracing::info!(product_id = %id, "Product deleted successfully");
        document.into_product()
    }
}
