//! JSON extractor that renders rejections as [`AppError`].

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// JSON body extractor with the standard error envelope.
///
/// Rejections keep axum's status code (400 for syntax errors, 415 for a
/// missing `Content-Type`, 422 for a body of the wrong shape) but are rendered
/// as an [`ErrorResponse`](crate::errors::ErrorResponse).
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::post};
/// use axum_helpers::extractors::AppJson;
///
/// async fn create(AppJson(payload): AppJson<serde_json::Value>) -> String {
///     payload.to_string()
/// }
///
/// let app: Router = Router::new().route("/items", post(create));
/// ```
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(data))
    }
}
