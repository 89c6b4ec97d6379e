//! API routes module

pub mod health;
pub mod products;

use axum::{extract::State, routing::get, Json, Router};
use core_config::AppInfo;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct Banner {
    message: String,
    version: &'static str,
}

async fn banner(State(app): State<AppInfo>) -> Json<Banner> {
    Json(Banner {
        message: format!("{} is running", app.name),
        version: app.version,
    })
}

/// Service banner at `GET /`
pub fn banner_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/", get(banner))
        .with_state(app_info)
}

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .merge(banner_router(state.config.app))
        .merge(health::router(state.clone()))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use core_config::app_info;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_banner_reports_version() {
        let response = banner_router(app_info!())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["message"], "catalog_api is running");
    }
}
