//! Integration tests for Products domain
//!
//! These tests run the MongoDB repository against a real server via
//! testcontainers. They need Docker, so they are ignored by default:
//!
//! ```text
//! cargo test -p domain_products --test integration_test -- --ignored
//! ```

use domain_products::{
    ListParams, MongoProductRepository, NewProduct, ProductError, ProductFilter, ProductPatch,
    ProductRepository, QuerySpec,
};
use test_utils::{assertions::*, TestDataBuilder, TestMongo};

fn new_product(builder: &TestDataBuilder, suffix: &str, description: &str) -> NewProduct {
    NewProduct {
        name: builder.name("product", suffix),
        description: description.to_string(),
        price: 100,
        tags: vec!["test".to_string()],
        images: vec![],
    }
}

async fn repository(mongo: &TestMongo, builder: &TestDataBuilder) -> MongoProductRepository {
    let repo = MongoProductRepository::new(&mongo.database(&builder.database_name()));
    repo.init_indexes().await.unwrap();
    repo
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_get_product() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_create_and_get");
    let repo = repository(&mongo, &builder).await;

    let created = repo
        .create(new_product(&builder, "main", "Integration test product"))
        .await
        .unwrap();
    assert_eq!(created.favorite_count, 0);

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "product should exist");

    assert_uuid_eq(retrieved.id, created.id, "retrieved product id");
    assert_eq!(retrieved.name, created.name);
    assert_eq!(
        retrieved.created_at.timestamp_millis(),
        created.created_at.timestamp_millis()
    );

    let missing = repo.get_by_id(builder.unknown_id()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_many_paginates_and_filters() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_find_many");
    let repo = repository(&mongo, &builder).await;

    for i in 0..12 {
        let description = if i % 3 == 0 { "Has a CHAIR" } else { "table" };
        repo.create(new_product(&builder, &i.to_string(), description))
            .await
            .unwrap();
    }

    let first = QuerySpec::build(&ListParams {
        page_size: Some("5".to_string()),
        ..Default::default()
    });
    let page = repo.find_many(&first).await.unwrap();
    assert_eq!(page.len(), 5);

    let created_at: Vec<_> = page.iter().map(|p| p.created_at).collect();
    assert_non_increasing(&created_at, "recent order");

    let filtered = ProductFilter::keyword(Some("chair"));
    assert_eq!(repo.count(&filtered).await.unwrap(), 4);
    assert_eq!(repo.count(&ProductFilter::default()).await.unwrap(), 12);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_favorite_order() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_favorite_order");
    let repo = repository(&mongo, &builder).await;

    for (suffix, favorites) in [("a", 2), ("b", 9), ("c", 4)] {
        let product = repo
            .create(new_product(&builder, suffix, "d"))
            .await
            .unwrap();
        repo.update(
            product.id,
            ProductPatch {
                favorite_count: Some(favorites),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    let query = QuerySpec::build(&ListParams {
        order_by: Some("favorite".to_string()),
        ..Default::default()
    });
    let names: Vec<_> = repo
        .find_many(&query)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();

    assert_eq!(
        names,
        vec![
            builder.name("product", "b"),
            builder.name("product", "c"),
            builder.name("product", "a"),
        ]
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_and_delete() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("mongo_update_delete");
    let repo = repository(&mongo, &builder).await;

    let created = repo
        .create(new_product(&builder, "main", "Before"))
        .await
        .unwrap();

    let updated = repo
        .update(
            created.id,
            ProductPatch {
                price: Some(50),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 50);
    assert_eq!(updated.description, "Before");
    assert!(updated.updated_at >= updated.created_at);

    let removed = repo.delete(created.id).await.unwrap();
    assert_uuid_eq(removed.id, created.id, "deleted product id");

    assert!(matches!(
        repo.delete(created.id).await,
        Err(ProductError::NotFound(_))
    ));
    assert!(matches!(
        repo.update(created.id, ProductPatch::default()).await,
        Err(ProductError::NotFound(_))
    ));
}
