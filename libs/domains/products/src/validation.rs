//! Turns raw request bodies into validated values before anything is stored.

use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, NewProduct, PriceInput, ProductPatch, UpdateProduct};

/// Check a create request and normalize it.
///
/// Strings and tags are trimmed, the price is coerced to a whole number and
/// `images` defaults to empty.
pub fn validate_for_create(input: CreateProduct) -> ProductResult<NewProduct> {
    let name = required_text("name", input.name)?;
    let description = required_text("description", input.description)?;
    let price = coerce_price(input.price.ok_or(ProductError::MissingField("price"))?)?;
    let tags = trim_tags(input.tags.ok_or(ProductError::MissingField("tags"))?);

    let product = NewProduct {
        name,
        description,
        price,
        tags,
        images: input.images.unwrap_or_default(),
    };
    check(&product)?;

    Ok(product)
}

/// Check only the fields present in an update request.
pub fn validate_for_update(input: UpdateProduct) -> ProductResult<ProductPatch> {
    let name = input
        .name
        .map(|name| required_text("name", name))
        .transpose()?;
    let description = input
        .description
        .map(|description| required_text("description", description))
        .transpose()?;
    let price = input
        .price
        .map(|price| coerce_price(price.ok_or(ProductError::MissingField("price"))?))
        .transpose()?;
    let tags = input
        .tags
        .map(|tags| tags.map(trim_tags).ok_or(ProductError::MissingField("tags")))
        .transpose()?;

    let patch = ProductPatch {
        name,
        description,
        price,
        tags,
        images: input.images,
        favorite_count: input.favorite_count,
    };
    check(&patch)?;

    Ok(patch)
}

fn required_text(field: &'static str, value: Option<String>) -> ProductResult<String> {
    let trimmed = value.as_deref().map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(ProductError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn trim_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter().map(|tag| tag.trim().to_string()).collect()
}

/// Coerce a price to a non-negative whole number, truncating toward zero.
///
/// An empty string counts as missing. Non-numeric, non-finite and
/// negative values are rejected.
fn coerce_price(price: PriceInput) -> ProductResult<i64> {
    let value = match price {
        PriceInput::Number(n) => n,
        PriceInput::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(ProductError::MissingField("price"));
            }
            text.parse::<f64>()
                .map_err(|_| ProductError::InvalidPrice(format!("'{}' is not a number", text)))?
        }
    };

    if !value.is_finite() {
        return Err(ProductError::InvalidPrice(format!("{} is not a finite number", value)));
    }
    if value < 0.0 {
        return Err(ProductError::InvalidPrice(format!("{} is negative", value)));
    }
    if value >= i64::MAX as f64 {
        return Err(ProductError::InvalidPrice(format!("{} is too large", value)));
    }

    Ok(value.trunc() as i64)
}

/// Run the derived constraints, mapping a failure to the matching domain error.
fn check<T: Validate>(value: &T) -> ProductResult<()> {
    value.validate().map_err(|errors| {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();

        match fields.first().map(String::as_str) {
            Some("name") => ProductError::MissingField("name"),
            Some("description") => ProductError::MissingField("description"),
            Some("price") => ProductError::InvalidPrice("must not be negative".to_string()),
            Some("favorite_count") => {
                ProductError::Validation("favoriteCount must not be negative".to_string())
            }
            _ => ProductError::Validation(errors.to_string()),
        }
    })
}
