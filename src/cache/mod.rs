//! Response cache
//!
//! Keeps every query response ever fetched in a flat JSON file keyed by a
//! fingerprint of the query and its variables, so repeated runs are offline.

mod fingerprint;
mod response_cache;

pub use fingerprint::{canonical_json, Fingerprint};
pub use response_cache::{CacheConfig, ResponseCache};
