//! API Handlers
//!
//! HTTP request handlers for the proxy, debug and health endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{HeaderMap, Method, StatusCode},
    response::Response,
    Json,
};
use tracing::{debug, info, warn};

use crate::cache::{derive_key_from_headers, CacheStore, CachedResponse, SharedCache};
use crate::error::{ProxyError, Result};
use crate::models::{DebugResponse, ProxyQuery, ProxyTarget};
use crate::upstream::Forwarder;

/// Application state shared across all handlers.
///
/// Built by the caller and injected into the router.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe response cache
    pub cache: SharedCache,
    /// Outbound HTTP client
    pub forwarder: Forwarder,
}

impl AppState {
    /// Creates a new AppState with the given store and a default forwarder.
    pub fn new(cache: CacheStore) -> Self {
        Self::with_forwarder(cache, Forwarder::new())
    }

    /// Creates a new AppState with an explicit forwarder.
    pub fn with_forwarder(cache: CacheStore, forwarder: Forwarder) -> Self {
        Self {
            cache: cache.into_shared(),
            forwarder,
        }
    }
}

/// Handler for GET|POST /?target=<url>
///
/// Replays the cached response for the request if there is one, otherwise
/// forwards it, buffers the upstream body, caches it and returns it.
///
/// Concurrent misses for the same key all go upstream; the last one to
/// finish owns the cache entry.
pub async fn proxy_handler(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    if method != Method::GET && method != Method::POST {
        return Err(ProxyError::MethodNotAllowed(method));
    }

    // The key uses the target as sent; the parsed URL is only for forwarding
    let ProxyTarget { raw: target, url } = ProxyQuery::from_query(query.as_deref()).resolve()?;
    let key = derive_key_from_headers(&method, &target, &headers);

    // Guard is released at the end of the statement
    let cached = state.cache.read().await.get(&key);
    if let Some(record) = cached {
        info!("Serving cached response for {}", target);
        return Ok(record.replay());
    }

    info!("Forwarding request to {}", target);
    let upstream = state
        .forwarder
        .forward(method.clone(), url, &headers, body)
        .await
        .map_err(|e| {
            let err = ProxyError::from(e);
            warn!("Upstream request to {} failed: {}", target, err);
            err
        })?;

    let status = upstream.status();
    let upstream_headers = upstream.headers().clone();
    let body = upstream.bytes().await.map_err(|e| {
        let err = ProxyError::from(e);
        warn!("Reading upstream body from {} failed: {}", target, err);
        err
    })?;

    let record = Arc::new(CachedResponse::new(
        status,
        &upstream_headers,
        body,
        target,
        method,
    ));
    state.cache.write().await.set(key.clone(), record.clone());
    debug!("Cached {} bytes under key {:?}", record.body.len(), key);

    Ok(record.replay())
}

/// Handler for GET /debug
///
/// Dumps metadata for every cached entry, keyed by cache key.
pub async fn debug_handler(State(state): State<AppState>) -> Json<DebugResponse> {
    let snapshot = state.cache.read().await.snapshot();
    Json(snapshot)
}

/// Handler for /health
///
/// Returns 200 with an empty body for GET, 405 for anything else.
pub async fn health_handler(method: Method) -> Result<StatusCode> {
    if method != Method::GET {
        return Err(ProxyError::MethodNotAllowed(method));
    }
    Ok(StatusCode::OK)
}
