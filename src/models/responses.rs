//! Response models for the proxy API
//!
//! Defines the JSON shape of the debug dump.

use std::collections::HashMap;

use serde::Serialize;

/// Metadata for one cached entry, as listed by `GET /debug`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySummary {
    /// Target URL the entry was fetched from
    #[serde(rename = "URL")]
    pub url: String,
    /// Request method
    #[serde(rename = "Method")]
    pub method: String,
    /// Upstream status line, e.g. `200 OK`
    #[serde(rename = "Status")]
    pub status: String,
    /// Buffered body length in bytes
    #[serde(rename = "Size")]
    pub size: usize,
}

/// Response body for the debug endpoint (GET /debug), keyed by cache key
pub type DebugResponse = HashMap<String, EntrySummary>;
