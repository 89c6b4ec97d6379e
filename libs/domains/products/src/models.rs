use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned at creation
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Price in whole currency units, never negative
    pub price: i64,
    pub tags: Vec<String>,
    /// Image references (URLs or storage keys)
    pub images: Vec<String>,
    pub favorite_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(input: NewProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            tags: input.tags,
            images: input.images,
            favorite_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the supplied fields and refresh `updated_at`.
    pub fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(favorite_count) = patch.favorite_count {
            self.favorite_count = favorite_count;
        }
        self.updated_at = Utc::now().max(self.created_at);
    }

    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            created_at: self.created_at,
        }
    }
}

/// List view of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

/// One page of list results
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub list: Vec<ProductSummary>,
    /// Matches across all pages
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

/// Price as sent by clients: a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

/// Request body for creating a product.
///
/// Every field is optional here so that missing and invalid values are
/// reported as domain errors rather than deserialization failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateProduct {
    #[schema(example = "Oak desk")]
    pub name: Option<String>,
    #[schema(example = "Solid oak, 140x70cm")]
    pub description: Option<String>,
    #[schema(value_type = f64, example = 25000)]
    pub price: Option<PriceInput>,
    pub tags: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

/// Request body for a partial update.
///
/// Absent fields are left untouched. An explicit `null` for name,
/// description, price or tags is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Option<PriceInput>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<String>>)]
    pub tags: Option<Option<Vec<String>>>,
    pub images: Option<Vec<String>>,
    pub favorite_count: Option<i64>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`).
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A validated product, ready to be stored
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0))]
    pub price: i64,
    pub tags: Vec<String>,
    pub images: Vec<String>,
}

/// A validated partial update
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ProductPatch {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    #[validate(range(min = 0))]
    pub favorite_count: Option<i64>,
}
