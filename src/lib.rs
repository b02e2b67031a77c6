//! Cache Proxy - A forward HTTP proxy with an in-memory response cache
//!
//! Forwards GET and POST requests to the URL given in the `target` query
//! parameter and replays stored responses for repeated requests.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
