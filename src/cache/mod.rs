//! Cache Module
//!
//! Key derivation, the stored response record and the shared response store.

mod key;
mod record;
mod store;


// Re-export public types
pub use key::{derive_key, derive_key_from_headers};
pub use record::CachedResponse;
pub use store::{CacheStore, SharedCache};
