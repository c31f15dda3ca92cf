//! Tests for response caching.

use chatgate_cache::{CacheConfig, CacheConfigBuilder, ResponseCache};
use std::sync::Arc;

fn cache_with_capacity(max_size: usize) -> ResponseCache {
    ResponseCache::new(CacheConfig::default().with_max_size(max_size))
}

#[test]
fn test_cache_insert_and_lookup() {
    let cache = ResponseCache::default();
    cache.insert("Hello", "Hi there");

    assert_eq!(cache.lookup("Hello"), Some("Hi there".to_string()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_insert_accepts_owned_keys() {
    let cache = ResponseCache::default();
    let key = String::from("Tell me a joke");
    cache.insert(key.clone(), String::from("Why did the crab cross the road?"));
    cache.insert(key.as_str(), "A second answer");

    assert_eq!(cache.lookup(&key).as_deref(), Some("A second answer"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_miss() {
    let cache = ResponseCache::default();
    assert!(cache.lookup("Hello").is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_key_is_verbatim() {
    let cache = ResponseCache::default();
    cache.insert("Hello", "Hi there");

    assert!(cache.lookup("hello").is_none());
    assert!(cache.lookup("Hello ").is_none());
    assert!(cache.lookup("Hello").is_some());
}

#[test]
fn test_insert_same_key_last_writer_wins() {
    let cache = cache_with_capacity(2);
    cache.insert("Hello", "first");
    cache.insert("Hello", "second");

    assert_eq!(cache.lookup("Hello"), Some("second".to_string()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_lru_eviction() {
    let cache = cache_with_capacity(2);
    cache.insert("a", "1");
    cache.insert("b", "2");

    // Touch "a" so "b" becomes least recently used
    assert!(cache.lookup("a").is_some());

    cache.insert("c", "3");

    assert_eq!(cache.len(), 2);
    assert!(cache.peek("b").is_none());
    assert!(cache.peek("a").is_some());
    assert!(cache.peek("c").is_some());
}

#[test]
fn test_overwrite_at_capacity_does_not_evict() {
    let cache = cache_with_capacity(2);
    cache.insert("a", "1");
    cache.insert("b", "2");
    cache.insert("a", "1b");

    assert_eq!(cache.len(), 2);
    assert!(cache.peek("b").is_some());
    assert_eq!(cache.peek("a").unwrap().value(), "1b");
}

#[test]
fn test_disabled_cache_never_stores() {
    let cache = ResponseCache::disabled();
    cache.insert("Hello", "Hi there");

    assert!(cache.lookup("Hello").is_none());
    assert!(cache.is_empty());
    assert!(!cache.is_enabled());
}

#[test]
fn test_zero_capacity_behaves_disabled() {
    let cache = cache_with_capacity(0);
    cache.insert("Hello", "Hi there");
    assert!(cache.lookup("Hello").is_none());
}

#[test]
fn test_clear_and_remove() {
    let cache = ResponseCache::default();
    cache.insert("a", "1");
    cache.insert("b", "2");

    assert!(cache.remove("a"));
    assert!(!cache.remove("a"));
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_builder_defaults() {
    let config = CacheConfigBuilder::default()
        .max_size(10)
        .build()
        .unwrap();
    assert_eq!(*config.max_size(), 10);
    assert!(*config.enabled());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_access() {
    let cache = Arc::new(cache_with_capacity(16));

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let cache = cache.clone();
            tokio::spawn(async move {
                let key = format!("message-{}", i % 8);
                cache.insert(key.clone(), format!("response-{}", i % 8));
                cache.lookup(&key)
            })
        })
        .collect();

    for handle in handles {
        let value = handle.await.unwrap();
        assert!(value.unwrap().starts_with("response-"));
    }
    assert_eq!(cache.len(), 8);
}
