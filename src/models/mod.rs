//! Request and Response models for the proxy API
//!
//! Query parsing for the proxy entry point and the debug dump DTOs.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{ProxyQuery, ProxyTarget, USAGE};
pub use responses::{DebugResponse, EntrySummary};
