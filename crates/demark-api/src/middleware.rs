//! API middleware.

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Create CORS layer.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    use axum::http::Method;

    let allowed_methods = [Method::GET, Method::POST];

    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_methods(allowed_methods)
            .allow_headers(Any)
            .allow_origin(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_methods(allowed_methods)
            .allow_headers(Any)
            .allow_origin(AllowOrigin::list(parsed))
    }
}
