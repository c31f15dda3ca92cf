//! Response caching.
//!
//! Memoizes model responses keyed by the exact message text, so an identical
//! message is answered without spending outbound rate budget.

#![warn(missing_docs)]

mod cache;

pub use cache::{CacheConfig, CacheConfigBuilder, CacheEntry, ResponseCache};
