//! Gallery service routes

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use serde_json::json;

use crate::{error::ApiError, state::AppState};

/// Create the router for the gallery service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/gallery", get(get_gallery))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "gallery-service"
    }))
}

/// Full gallery catalog, rebuilt from the event folders on every request
pub async fn get_gallery(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let catalog = state.catalog.build_catalog().await.map_err(|e| {
        tracing::error!("Failed to build gallery catalog: {}", e);
        ApiError::Catalog(e)
    })?;

    Ok(Json(catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogService;
    use crate::models::EventRecord;
    use crate::resolvers::LocalResolver;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn router_for(root: &Path) -> Router {
        let catalog = CatalogService::new(
            root.to_path_buf(),
            LocalResolver::new("/events".to_string()),
            None,
        );
        create_router(AppState {
            catalog: Arc::new(catalog),
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let root = TempDir::new().unwrap();
        let response = router_for(root.path())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_gallery_returns_catalog_array() {
        let root = TempDir::new().unwrap();
        let event_dir = root.path().join("gim_1");
        std::fs::create_dir_all(&event_dir).unwrap();
        std::fs::write(
            event_dir.join("event-info.json"),
            r#"{"eventName":"GIM 1","date":"2025-02-20","description":"First general meeting"}"#,
        )
        .unwrap();
        std::fs::write(event_dir.join("a.jpg"), b"x").unwrap();

        let response = router_for(root.path())
            .oneshot(
                Request::builder()
                    .uri("/api/gallery")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let catalog: Vec<EventRecord> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].relative_path, "gim_1");
        assert_eq!(catalog[0].media_files, ["a.jpg"]);
    }

    #[tokio::test]
    async fn test_empty_root_returns_empty_array() {
        let root = TempDir::new().unwrap();
        let response = router_for(root.path())
            .oneshot(
                Request::builder()
                    .uri("/api/gallery")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_unreadable_root_returns_error_object() {
        let response = router_for(Path::new("/definitely/not/here"))
            .oneshot(
                Request::builder()
                    .uri("/api/gallery")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].is_string());
    }
}
