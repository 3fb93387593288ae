//! Handler tests for Products domain
//!
//! Drive the product router with `oneshot` against the in-memory store:
//! - request deserialization and the 201 response body
//! - server-assigned identifiers
//! - error envelopes for bad bodies and store failures

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(repo: InMemoryProductRepository) -> Router {
    handlers::router(ProductService::new(repo))
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_create_product_on_empty_store_returns_201_with_id_1() {
    let repo = InMemoryProductRepository::new();

    let response = app(repo.clone())
        .oneshot(post_json(r#"{"name":"Widget","price":9.99}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({"id": 1, "name": "Widget", "price": 9.99}));
    assert_eq!(repo.all().await.len(), 1);
}

#[tokio::test]
async fn test_create_product_ignores_client_id() {
    let repo = InMemoryProductRepository::new();

    let response = app(repo.clone())
        .oneshot(post_json(r#"{"id":999,"name":"Widget","price":9.99}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, Some(1));

    let stored = repo.all().await;
    assert_eq!(stored[0].id, Some(1));
}

#[tokio::test]
async fn test_identical_creates_yield_two_records() {
    let repo = InMemoryProductRepository::new();
    let router = app(repo.clone());
    let body = r#"{"name":"Widget","price":9.99}"#;

    let first: Product = json_body(
        router
            .clone()
            .oneshot(post_json(body))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    let second: Product = json_body(router.oneshot(post_json(body)).await.unwrap().into_body()).await;

    assert_ne!(first.id, second.id);

    let stored = repo.all().await;
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].name, stored[1].name);
    assert_eq!(stored[0].price, stored[1].price);
}

#[tokio::test]
async fn test_extra_fields_round_trip() {
    let repo = InMemoryProductRepository::new();

    let response = app(repo)
        .oneshot(post_json(
            r#"{"name":"Widget","price":9.99,"sku":"W-1","dimensions":{"w":2,"h":3}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["sku"], "W-1");
    assert_eq!(body["dimensions"], json!({"w": 2, "h": 3}));
}

#[tokio::test]
async fn test_explicit_nulls_are_returned_as_sent() {
    let repo = InMemoryProductRepository::new();

    let response = app(repo.clone())
        .oneshot(post_json(r#"{"name":null,"price":9.99,"color":null}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!({"id": 1, "name": null, "price": 9.99, "color": null})
    );
    assert_eq!(repo.all().await[0].name, None);
}

#[tokio::test]
async fn test_integer_price_comes_back_as_float() {
    let response = app(InMemoryProductRepository::new())
        .oneshot(post_json(r#"{"name":"W","price":10}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["price"], json!(10.0));
}

#[tokio::test]
async fn test_empty_object_is_accepted() {
    let response = app(InMemoryProductRepository::new())
        .oneshot(post_json("{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!({"id": 1}));
}

#[tokio::test]
async fn test_malformed_json_is_rejected_before_persistence() {
    let repo = InMemoryProductRepository::new();

    let response = app(repo.clone())
        .oneshot(post_json(r#"{"name":"Widget","#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");
    assert!(repo.all().await.is_empty());
}

#[tokio::test]
async fn test_wrongly_typed_field_is_unprocessable() {
    let repo = InMemoryProductRepository::new();

    let response = app(repo.clone())
        .oneshot(post_json(r#"{"name":"Widget","price":"cheap"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(repo.all().await.is_empty());
}

// ============================================================================
// Store failures
// ============================================================================

/// Delegates to the in-memory store but refuses to commit
#[derive(Clone, Default)]
struct CommitFailingRepository {
    inner: InMemoryProductRepository,
}

struct CommitFailingTransaction {
    inner: InMemoryProductTransaction,
}

#[async_trait]
impl ProductRepository for CommitFailingRepository {
    type Transaction = CommitFailingTransaction;

    async fn begin(&self) -> ProductResult<CommitFailingTransaction> {
        Ok(CommitFailingTransaction {
            inner: self.inner.begin().await?,
        })
    }
}

#[async_trait]
impl ProductTransaction for CommitFailingTransaction {
    async fn insert(&mut self, product: Product) -> ProductResult<Product> {
        self.inner.insert(product).await
    }

    async fn commit(self) -> ProductResult<()> {
        Err(ProductError::Database("connection reset by peer".to_string()))
    }
}

/// Store that cannot be reached at all
struct UnavailableRepository;

#[async_trait]
impl ProductRepository for UnavailableRepository {
    type Transaction = InMemoryProductTransaction;

    async fn begin(&self) -> ProductResult<InMemoryProductTransaction> {
        Err(ProductError::Database("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_unavailable_store_returns_500() {
    let router = handlers::router(ProductService::new(UnavailableRepository));

    let response = router
        .oneshot(post_json(r#"{"name":"Widget","price":9.99}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "DATABASE_ERROR");
    assert!(!body["message"].as_str().unwrap().contains("refused"));
}

#[tokio::test]
async fn test_failed_commit_leaves_nothing_behind() {
    let repo = CommitFailingRepository::default();
    let router = handlers::router(ProductService::new(repo.clone()));

    let response = router
        .oneshot(post_json(r#"{"name":"Widget","price":9.99}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(repo.inner.all().await.is_empty());
}
