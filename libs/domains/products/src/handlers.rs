use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post,
};
use axum_helpers::AppJson;
use std::sync::Arc;

use crate::error::ProductResult;
use crate::models::Product;
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// Create the product router; mount it at `/product`
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_product::<R>))
        .with_state(shared_service)
}

/// Create a new product
///
/// Responds `201 Created` with the stored product, including its assigned id.
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AppJson(input): AppJson<Product>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}
