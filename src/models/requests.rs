//! Request models for the proxy API
//!
//! Parses the `target` query parameter of a proxy request.

use url::Url;

use crate::error::{ProxyError, Result};

/// Usage hint returned when the `target` parameter is missing.
pub const USAGE: &str = "Up and running! Usage: ?target=<URL> (e.g., ?target=https://example.com)";

/// A validated proxy target.
///
/// `raw` is the decoded parameter exactly as sent and is what the cache key
/// and the debug dump use. `url` is its parsed form, used only to forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTarget {
    /// Target as supplied by the caller
    pub raw: String,
    /// Parsed absolute URL
    pub url: Url,
}

/// Query string of a proxy request (`/?target=<url>`)
///
/// # Fields
/// - `target`: first `target` value, percent-decoded; `None` when absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyQuery {
    /// Raw target as supplied by the caller
    pub target: Option<String>,
}

impl ProxyQuery {
    /// Parses a raw query string.
    ///
    /// Only the first occurrence of `target` counts; other parameters are
    /// ignored.
    pub fn from_query(query: Option<&str>) -> Self {
        let target = query.and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(name, _)| name == "target")
                .map(|(_, value)| value.into_owned())
        });
        Self { target }
    }

    /// Validates the target as an absolute `http`/`https` URL.
    pub fn resolve(&self) -> Result<ProxyTarget> {
        let raw = match self.target.as_deref() {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(ProxyError::BadRequest(USAGE.to_string())),
        };

        let url = Url::parse(raw)
            .map_err(|e| ProxyError::BadRequest(format!("Invalid 'target' URL: {}", e)))?;

        match url.scheme() {
            "http" | "https" => Ok(ProxyTarget {
                raw: raw.to_string(),
                url,
            }),
            other => Err(ProxyError::BadRequest(format!(
                "Invalid 'target' URL: unsupported scheme '{}'",
                other
            ))),
        }
    }
}
