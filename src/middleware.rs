use tower_http::cors::{Any, CorsLayer};

/// Cross-origin policy for the browser frontend
///
/// Any origin, method and header is allowed on every route. No credentials
/// are involved, so the wildcard origin is valid.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
