//! API Routes
//!
//! Configures the Axum router with the proxy, debug and health endpoints.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::{any, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use super::handlers::{debug_handler, health_handler, proxy_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET|POST /?target=<url>` - Proxy through the response cache
/// - `GET /debug` - Dump cached entry metadata
/// - `GET /health` - Health check endpoint
///
/// Every other path is also handled by the proxy.
///
/// # Middleware
/// - CORS: wildcard origin, methods and headers on every response
/// - Body limit: disabled, request bodies are forwarded whatever their size
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // CorsLayer only sends these two on preflight responses
    let allow_methods = SetResponseHeaderLayer::if_not_present(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("*"),
    );
    let allow_headers = SetResponseHeaderLayer::if_not_present(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("*"),
    );

    Router::new()
        .route("/", any(proxy_handler))
        .route("/debug", get(debug_handler))
        .route("/health", any(health_handler))
        .fallback(proxy_handler)
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(allow_methods)
        .layer(allow_headers)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
