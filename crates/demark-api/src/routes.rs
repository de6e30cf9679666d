//! API route definitions.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors_layer;
use crate::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.config.max_body_size;

    Router::new()
        .route("/", get(handlers::index))
        .route("/upload", post(handlers::upload))
        .route("/select/:job_id", get(handlers::select_page))
        .route("/process/:job_id", post(handlers::process_video))
        .route("/status/:job_id", get(handlers::status_page))
        .route("/api/status/:job_id", get(handlers::api_status))
        .route("/download/:job_id", get(handlers::download))
        .route("/health", get(handlers::health))
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .nest_service("/processed", ServeDir::new(&state.config.processed_dir))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::ApiConfig;

    fn test_state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = ApiConfig {
            upload_dir: dir.path().join("uploads"),
            processed_dir: dir.path().join("processed"),
            ..ApiConfig::default()
        };
        (AppState::new(config).unwrap(), dir)
    }

    #[tokio::test]
    async fn test_health_route() {
        let (state, _dir) = test_state();
        let response = create_router(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_index_serves_upload_form() {
        let (state, _dir) = test_state();
        let response = create_router(state)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_job_status_is_404() {
        let (state, _dir) = test_state();
        let response = create_router(state)
            .oneshot(
                Request::get("/api/status/no-such-job")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_job_select_redirects_home() {
        let (state, _dir) = test_state();
        let response = create_router(state)
            .oneshot(
                Request::get("/select/no-such-job")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers().get("location").unwrap().to_str().unwrap();
        assert!(location.starts_with("/?message="));
    }

    #[tokio::test]
    async fn test_download_of_unknown_job_redirects_home() {
        let (state, _dir) = test_state();
        let response = create_router(state)
            .oneshot(
                Request::get("/download/no-such-job")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers().get("location").unwrap().to_str().unwrap();
        assert_eq!(location, "/?message=File+not+ready+or+invalid+job+ID");
    }

    #[tokio::test]
    async fn test_upload_without_file_part_redirects_with_message() {
        let (state, _dir) = test_state();
        let body = concat!(
            "--BOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"other\"\r\n\r\n",
            "value\r\n",
            "--BOUNDARY--\r\n"
        );
        let response = create_router(state)
            .oneshot(
                Request::post("/upload")
                    .header("content-type", "multipart/form-data; boundary=BOUNDARY")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers().get("location").unwrap().to_str().unwrap();
        assert_eq!(location, "/?message=No+file+part");
    }

    #[tokio::test]
    async fn test_upload_rejects_non_video_extension() {
        let (state, _dir) = test_state();
        let body = concat!(
            "--BOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n",
            "Content-Type: text/plain\r\n\r\n",
            "hello\r\n",
            "--BOUNDARY--\r\n"
        );
        let response = create_router(state)
            .oneshot(
                Request::post("/upload")
                    .header("content-type", "multipart/form-data; boundary=BOUNDARY")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers().get("location").unwrap().to_str().unwrap();
        assert!(location.contains("Invalid+file+type"));
    }

    #[tokio::test]
    async fn test_process_unknown_job_redirects_home() {
        let (state, _dir) = test_state();
        let response = create_router(state)
            .oneshot(
                Request::post("/process/no-such-job")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("x=0&y=0&width=10&height=10"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers().get("location").unwrap().to_str().unwrap();
        assert_eq!(location, "/?message=Invalid+job+ID");
    }
}
