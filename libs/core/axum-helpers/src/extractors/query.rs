//! Query string extractor that rejects with the standard error body.

use crate::errors::AppError;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

/// Drop-in replacement for [`axum::extract::Query`].
///
/// A query string that does not fit `T` becomes
/// [`AppError::QueryExtractorRejection`], a 400 with the JSON error body.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(AppQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, extract::Request, http::StatusCode, routing::get};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Paging {
        page: Option<String>,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            get(|AppQuery(paging): AppQuery<Paging>| async move {
                paging.page.unwrap_or_default()
            }),
        )
    }

    fn get_request(uri: &str) -> Request {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_query_is_extracted() {
        let response = app().oneshot(get_request("/?page=3")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"3");
    }

    #[tokio::test]
    async fn test_duplicate_field_is_json_bad_request() {
        let response = app().oneshot(get_request("/?page=1&page=2")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "QUERY_EXTRACTION");
        assert_eq!(body["code"], 1012);
        assert!(body["message"].as_str().unwrap().contains("page"));
    }
}
