//! Response cache implementation.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

/// Cached response with bookkeeping.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry {
    value: String,
    inserted_at: Instant,
    #[getter(skip)]
    last_used: u64,
}

/// Configuration for the response cache.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct CacheConfig {
    /// Maximum cache size (number of entries)
    #[serde(default = "default_max_size")]
    max_size: usize,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_max_size() -> usize {
    100
}

fn default_enabled() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
            enabled: default_enabled(),
        }
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    // Monotonic use counter; the entry with the smallest stamp is the LRU one.
    clock: u64,
}

impl CacheState {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn evict_lru(&mut self) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| key.clone());

        if let Some(key) = victim {
            tracing::debug!(key_len = key.len(), "Evicting LRU entry");
            self.entries.remove(&key);
        }
    }
}

/// Thread-safe cache of model responses.
///
/// Keys are the verbatim message text. Lookups are hash-map reads; the
/// internal lock is independent of any other shared state.
///
/// # Example
///
/// ```
/// use chatgate_cache::{CacheConfig, ResponseCache};
///
/// let cache = ResponseCache::new(CacheConfig::default());
/// cache.insert("Hello", "Hi there");
/// assert_eq!(cache.lookup("Hello").as_deref(), Some("Hi there"));
/// assert!(cache.lookup("hello").is_none());
/// ```
#[derive(Debug)]
pub struct ResponseCache {
    config: CacheConfig,
    state: Mutex<CacheState>,
}

impl ResponseCache {
    /// Create a new response cache with configuration.
    pub fn new(config: CacheConfig) -> Self {
        tracing::debug!(
            max_size = config.max_size,
            enabled = config.enabled,
            "Creating new ResponseCache"
        );
        Self {
            config,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(CacheConfig::default().with_enabled(false))
    }

    /// Whether lookups can ever hit.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled && self.config.max_size > 0
    }

    /// Get the cached response for `key`, marking it most recently used.
    #[tracing::instrument(skip_all, fields(key_len = key.len()))]
    pub fn lookup(&self, key: &str) -> Option<String> {
        if !self.is_enabled() {
            tracing::debug!("Cache disabled, returning None");
            return None;
        }

        let mut state = self.lock();
        let stamp = state.tick();
        let entry = state.entries.get_mut(key)?;
        entry.last_used = stamp;

        tracing::debug!("Cache hit");
        Some(entry.value.clone())
    }

    /// Store a response. The same key overwrites (last writer wins).
    #[tracing::instrument(skip_all, fields(key_len = tracing::field::Empty))]
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        if !self.is_enabled() {
            tracing::debug!("Cache disabled, skipping insert");
            return;
        }

        let key = key.into();
        tracing::Span::current().record("key_len", key.len());
        let mut state = self.lock();

        if state.entries.len() >= self.config.max_size && !state.entries.contains_key(&key) {
            state.evict_lru();
        }

        let stamp = state.tick();
        state.entries.insert(
            key,
            CacheEntry {
                value: value.into(),
                inserted_at: Instant::now(),
                last_used: stamp,
            },
        );

        tracing::debug!(cache_size = state.entries.len(), "Inserted entry into cache");
    }

    /// Get a copy of the entry for `key` without touching recency.
    pub fn peek(&self, key: &str) -> Option<CacheEntry> {
        self.lock().entries.get(key).cloned()
    }

    /// Remove one entry.
    pub fn remove(&self, key: &str) -> bool {
        self.lock().entries.remove(key).is_some()
    }

    /// Clear all cache entries.
    pub fn clear(&self) {
        let mut state = self.lock();
        let count = state.entries.len();
        state.entries.clear();
        tracing::info!(cleared = count, "Cleared cache");
    }

    /// Get number of cached entries.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Get the configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
