//! Forwarding Client
//!
//! Issues the outbound request to the caller-chosen target.

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderName, Method};
use reqwest::{Client, Response};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Request headers the transport sets itself or that only concern the
/// inbound connection.
const SKIPPED_REQUEST_HEADERS: [HeaderName; 8] = [
    header::HOST,
    header::CONTENT_LENGTH,
    header::CONNECTION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::PROXY_AUTHORIZATION,
];

// == Forward Error ==
/// Failure to obtain an upstream response.
#[derive(Error, Debug)]
pub enum ForwardError {
    /// Only GET and POST are forwarded
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(Method),

    /// The outbound request could not be built
    #[error("Error creating request")]
    Build(#[source] reqwest::Error),

    /// DNS, connect or transport failure
    #[error("Error forwarding request")]
    Send(#[source] reqwest::Error),
}

// == Forwarder ==
/// Thin wrapper around a pooled `reqwest::Client`.
///
/// No timeout is configured: a slow upstream keeps the request open for as
/// long as it takes.
#[derive(Debug, Clone, Default)]
pub struct Forwarder {
    client: Client,
}

impl Forwarder {
    // == Constructor ==
    /// Creates a forwarder with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a forwarder around a preconfigured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    // == Forward ==
    /// Sends `method target` upstream with the caller's headers.
    ///
    /// GET requests never carry a body. POST requests carry `body` verbatim
    /// and get the caller's `Content-Type` set again after the header copy.
    /// The returned response body has not been read yet.
    pub async fn forward(
        &self,
        method: Method,
        target: Url,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<Response, ForwardError> {
        let mut outbound = outbound_headers(headers);

        let builder = match method {
            Method::GET => self.client.get(target),
            Method::POST => {
                if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
                    outbound.insert(header::CONTENT_TYPE, content_type.clone());
                }
                self.client.post(target).body(body)
            }
            other => return Err(ForwardError::UnsupportedMethod(other)),
        };

        let request = builder
            .headers(outbound)
            .build()
            .map_err(ForwardError::Build)?;

        debug!("Sending {} {}", request.method(), request.url());
        self.client
            .execute(request)
            .await
            .map_err(ForwardError::Send)
    }
}

/// Copies every header the transport lets a caller set.
fn outbound_headers(headers: &HeaderMap) -> HeaderMap {
    let mut outbound = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if SKIPPED_REQUEST_HEADERS.contains(name)
            || name.as_str().eq_ignore_ascii_case("keep-alive")
            || name.as_str().eq_ignore_ascii_case("proxy-connection")
        {
            continue;
        }
        outbound.append(name.clone(), value.clone());
    }
    outbound
}
