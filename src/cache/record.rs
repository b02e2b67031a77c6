//! Cached Response Module
//!
//! Defines the immutable record stored for every forwarded response.

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, HeaderName, Method, StatusCode},
    response::Response,
};

use crate::models::EntrySummary;

/// Connection-scoped headers, never stored. Replayed bodies are always
/// fully buffered.
const HOP_BY_HOP_HEADERS: [HeaderName; 5] = [
    header::CONNECTION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

// == Cached Response ==
/// A fully buffered upstream response.
///
/// Records are never mutated after construction; the store shares them
/// behind an `Arc` and replaces them wholesale.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    /// Upstream status code
    pub status: StatusCode,
    /// Upstream headers, multi-valued and in upstream order
    pub headers: HeaderMap,
    /// Complete upstream body
    pub body: Bytes,
    /// Target URL the record was fetched from
    pub url: String,
    /// Method of the request that produced the record
    pub method: Method,
}

impl CachedResponse {
    // == Constructor ==
    /// Builds a record from the parts of an upstream response.
    pub fn new(
        status: StatusCode,
        headers: &HeaderMap,
        body: Bytes,
        url: impl Into<String>,
        method: Method,
    ) -> Self {
        let mut stored = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            if !is_hop_by_hop(name) {
                stored.append(name.clone(), value.clone());
            }
        }

        Self {
            status,
            headers: stored,
            body,
            url: url.into(),
            method,
        }
    }

    // == Replay ==
    /// Reconstructs the HTTP response exactly as it was received.
    pub fn replay(&self) -> Response {
        let mut response = Response::new(Body::from(self.body.clone()));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers.clone();
        response
    }

    // == Summary ==
    /// Metadata shown by the debug dump.
    pub fn summary(&self) -> EntrySummary {
        EntrySummary {
            url: self.url.clone(),
            method: self.method.to_string(),
            status: status_line(self.status),
            size: self.body.len(),
        }
    }
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS.contains(name)
        || name.as_str().eq_ignore_ascii_case("keep-alive")
        || name.as_str().eq_ignore_ascii_case("proxy-connection")
}

/// Formats a status the way it appears on the wire, e.g. `200 OK`.
fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
