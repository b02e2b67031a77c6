//! Upstream Module
//!
//! Outbound HTTP to the target servers.
//!
//! # Components
//! - Forwarder: builds and sends the upstream request for GET and POST

mod client;

pub use client::{ForwardError, Forwarder};
