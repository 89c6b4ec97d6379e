//! Handler tests for Products domain
//!
//! These tests drive the products router end to end over the in-memory
//! repository: request parsing, status codes, response bodies and the
//! list envelope.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_products::{
    handlers, InMemoryProductRepository, Product, ProductPage, ProductService,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use test_utils::{assertions::assert_non_increasing, TestDataBuilder};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::new()))
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

async fn create(app: &Router, name: &str, description: &str, price: i64) -> Product {
    let (status, body) = send(
        app,
        "POST",
        "/",
        Some(json!({
            "name": name,
            "description": description,
            "price": price,
            "tags": ["test"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    serde_json::from_value(body).unwrap()
}

async fn list(app: &Router, query: &str) -> ProductPage {
    let (status, body) = send(app, "GET", &format!("/?{query}"), None).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn test_create_product_returns_201() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("handler_create_201");

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({
            "name": builder.name("chair", "main"),
            "description": "Comfortable",
            "price": 129.99,
            "tags": ["furniture"]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], builder.name("chair", "main"));
    assert_eq!(body["price"], 129);
    assert_eq!(body["favoriteCount"], 0);
    assert_eq!(body["images"], json!([]));
    assert_eq!(body["createdAt"], body["updatedAt"]);
}

#[tokio::test]
async fn test_create_accepts_numeric_string_price() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({
            "name": "Lamp",
            "description": "Desk lamp",
            "price": "300",
            "tags": []
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["price"], 300);
}

#[tokio::test]
async fn test_create_missing_price_returns_400_and_stores_nothing() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({ "name": "Chair", "description": "No price", "tags": [] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Missing required field: price");

    assert_eq!(list(&app, "").await.total_count, 0);
}

#[tokio::test]
async fn test_create_negative_price_returns_400() {
    let app = app();

    let (status, _) = send(
        &app,
        "POST",
        "/",
        Some(json!({ "name": "Chair", "description": "d", "price": -20, "tags": [] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["code"], 1003);
}

#[tokio::test]
async fn test_get_product_round_trip() {
    let app = app();
    let created = create(&app, "Desk", "Oak desk", 250).await;

    let (status, body) = send(&app, "GET", &format!("/{}", created.id), None).await;

    assert_eq!(status, StatusCode::OK);
    let fetched: Product = serde_json::from_value(body).unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids_return_404() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("handler_404");

    for id in [builder.unknown_id().to_string(), "not-a-uuid".to_string()] {
        for method in ["GET", "DELETE"] {
            let (status, body) = send(&app, method, &format!("/{id}"), None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method} /{id}");
            assert_eq!(body["error"], "NOT_FOUND");
        }

        let (status, _) = send(&app, "PATCH", &format!("/{id}"), Some(json!({ "price": 1 }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PATCH /{id}");
    }
}

#[tokio::test]
async fn test_pagination_pages_are_disjoint() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("handler_pagination");

    for i in 0..25 {
        create(&app, &builder.name("item", &i.to_string()), "d", builder.price(i)).await;
    }

    let mut seen = HashSet::new();
    for (page, expected_len) in [(1, 10), (2, 10), (3, 5)] {
        let result = list(&app, &format!("page={page}&pageSize=10")).await;

        assert_eq!(result.list.len(), expected_len);
        assert_eq!(result.total_count, 25);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.page, page);
        for item in result.list {
            assert!(seen.insert(item.id), "{} appeared on two pages", item.id);
        }
    }
    assert_eq!(seen.len(), 25);

    let beyond = list(&app, "page=4&pageSize=10").await;
    assert!(beyond.list.is_empty());
    assert_eq!(beyond.total_count, 25);
}

#[tokio::test]
async fn test_lenient_paging_parameters_fall_back_to_defaults() {
    let app = app();
    create(&app, "Only", "one", 1).await;

    let result = list(&app, "page=abc&pageSize=-5").await;

    assert_eq!(result.page, 1);
    assert_eq!(result.page_size, 10);
    assert_eq!(result.list.len(), 1);
}

#[tokio::test]
async fn test_huge_page_returns_empty_page() {
    let app = app();
    create(&app, "Only", "one", 1).await;

    let result = list(&app, "page=99999999999999999999&pageSize=50").await;

    assert!(result.list.is_empty());
    assert_eq!(result.total_count, 1);
    assert_eq!(result.page, i64::MAX as u64);
}

#[tokio::test]
async fn test_rejected_query_string_returns_json_400() {
    let app = app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?page=1&page=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "QUERY_EXTRACTION");
    assert!(body["message"].as_str().unwrap().contains("page"));
}

#[tokio::test]
async fn test_keyword_search_is_case_insensitive() {
    let app = app();
    create(&app, "Blue Chair", "Comfortable", 10).await;
    create(&app, "Sofa", "Matches any ARMCHAIR", 20).await;
    create(&app, "Table", "Oak", 30).await;

    let result = list(&app, "keyword=chair").await;

    assert_eq!(result.total_count, 2);
    let names: HashSet<_> = result.list.into_iter().map(|p| p.name).collect();
    assert_eq!(names, HashSet::from(["Blue Chair".to_string(), "Sofa".to_string()]));
}

#[tokio::test]
async fn test_keyword_with_regex_characters_matches_literally() {
    let app = app();
    create(&app, "C++ Primer", "Book", 10).await;
    create(&app, "CCC", "Not a book", 20).await;

    let result = list(&app, "keyword=c%2B%2B").await;

    assert_eq!(result.total_count, 1);
    assert_eq!(result.list[0].name, "C++ Primer");
}

#[tokio::test]
async fn test_list_items_are_summaries() {
    let app = app();
    create(&app, "Lamp", "Desk lamp", 40).await;

    let (_, body) = send(&app, "GET", "/", None).await;
    let item = body["list"][0].as_object().unwrap();

    let mut keys: Vec<_> = item.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["createdAt", "id", "name", "price"]);
}

#[tokio::test]
async fn test_favorite_order_is_most_favorited_first() {
    let app = app();
    let mut ids = Vec::new();
    for (name, favorites) in [("a", 1), ("b", 5), ("c", 3)] {
        let product = create(&app, name, "d", 10).await;
        let (status, _) = send(
            &app,
            "PATCH",
            &format!("/{}", product.id),
            Some(json!({ "favoriteCount": favorites })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        ids.push(product.id);
    }

    let result = list(&app, "orderBy=favorite").await;
    let order: Vec<_> = result.list.into_iter().map(|p| p.id).collect();

    assert_eq!(order, vec![ids[1], ids[2], ids[0]]);
}

#[tokio::test]
async fn test_favorite_order_holds_across_pages() {
    let app = app();
    let mut favorites_by_id = HashMap::new();
    for (i, favorites) in [2, 7, 2, 0, 7, 4, 2].into_iter().enumerate() {
        let product = create(&app, &format!("item-{i}"), "d", 10).await;
        let (status, _) = send(
            &app,
            "PATCH",
            &format!("/{}", product.id),
            Some(json!({ "favoriteCount": favorites })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        favorites_by_id.insert(product.id, favorites);
    }

    let mut ids = Vec::new();
    for page in 1..=4 {
        let result = list(&app, &format!("orderBy=favorite&pageSize=2&page={page}")).await;
        assert_eq!(result.total_pages, 4);
        ids.extend(result.list.into_iter().map(|p| p.id));
    }

    assert_eq!(ids.len(), 7);
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 7);

    let counts: Vec<i64> = ids.iter().map(|id| favorites_by_id[id]).collect();
    assert_non_increasing(&counts, "favoriteCount across pages");

    for pair in ids.windows(2) {
        if favorites_by_id[&pair[0]] == favorites_by_id[&pair[1]] {
            assert!(pair[0] > pair[1], "ties must be ordered by id, newest first");
        }
    }
}

#[tokio::test]
async fn test_recent_order_is_default() {
    let app = app();
    let first = create(&app, "first", "d", 1).await;
    let second = create(&app, "second", "d", 2).await;

    let result = list(&app, "").await;
    let order: Vec<_> = result.list.into_iter().map(|p| p.id).collect();

    assert_eq!(order, vec![second.id, first.id]);
}

#[tokio::test]
async fn test_patch_price_leaves_other_fields() {
    let app = app();
    let created = create(&app, "Chair", "Wooden", 100).await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/{}", created.id),
        Some(json!({ "price": 50 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated: Product = serde_json::from_value(body).unwrap();
    assert_eq!(updated.price, 50);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.tags, created.tags);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_patch_rejects_null_and_negative_values() {
    let app = app();
    let created = create(&app, "Chair", "Wooden", 100).await;
    let uri = format!("/{}", created.id);

    for body in [
        json!({ "name": null }),
        json!({ "name": "   " }),
        json!({ "price": -1 }),
        json!({ "favoriteCount": -2 }),
    ] {
        let (status, _) = send(&app, "PATCH", &uri, Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    }

    let (_, body) = send(&app, "GET", &uri, None).await;
    let unchanged: Product = serde_json::from_value(body).unwrap();
    assert_eq!(unchanged, created);
}

#[tokio::test]
async fn test_delete_then_get_returns_404() {
    let app = app();
    let created = create(&app, "Chair", "Wooden", 100).await;
    let uri = format!("/{}", created.id);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Product deleted successfully" }));

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
