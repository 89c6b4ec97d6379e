//! JSON body extractor that rejects with the standard error body.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// Drop-in replacement for [`axum::Json`] as an extractor.
///
/// A missing content type, malformed JSON, or a body that does not fit `T`
/// becomes [`AppError::JsonExtractorRejection`], i.e. a 400 with the
/// `{code, error, message}` body instead of axum's plain-text rejection.
///
/// # Example
/// ```ignore
/// use axum_helpers::AppJson;
///
/// async fn create(AppJson(input): AppJson<CreateProduct>) -> impl IntoResponse {
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}
