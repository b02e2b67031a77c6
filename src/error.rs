//! Error types for the proxy server
//!
//! Provides unified error handling using thiserror. Every variant maps to a
//! plain-text HTTP response; none of them is fatal to the process.

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::upstream::ForwardError;

// == Proxy Error Enum ==
/// Unified error type for the proxy server.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Missing or invalid `target` parameter
    #[error("{0}")]
    BadRequest(String),

    /// Method not served by the route
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(Method),

    /// The upstream request could not be built or sent
    #[error("{0}")]
    Upstream(String),

    /// The upstream body could not be read to completion
    #[error("Error reading response body: {0}")]
    Read(String),
}

impl From<ForwardError> for ProxyError {
    fn from(err: ForwardError) -> Self {
        match err {
            ForwardError::UnsupportedMethod(method) => ProxyError::MethodNotAllowed(method),
            other => ProxyError::Upstream(error_chain(other)),
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Read(error_chain(err))
    }
}

/// Renders an error with all of its sources, `outer: inner: root`.
fn error_chain<E>(err: E) -> String
where
    E: std::error::Error + Send + Sync + 'static,
{
    format!("{:#}", anyhow::Error::new(err))
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProxyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Read(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy server.
pub type Result<T> = std::result::Result<T, ProxyError>;
