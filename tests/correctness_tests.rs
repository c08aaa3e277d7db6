//! Correctness Tests for the LRU + TTL cache
//!
//! Small capacities and deterministic access patterns, with explicit checks for
//! which key was evicted after each insert.

use lru_ttl::clock::ManualClock;
use lru_ttl::config::{CacheConfig, CacheOption};
use lru_ttl::Cache;
use std::collections::HashSet;
use std::time::Duration;

/// Helper to create a cache with the given capacity and no TTL
fn make_cache<V: Clone>(cap: i64) -> Cache<&'static str, V> {
    Cache::with_options([CacheOption::Capacity(cap)])
}

#[test]
fn test_lru_evicts_first_inserted_without_reads() {
    let cache = make_cache(3);
    cache.set("k1", 1);
    cache.set("k2", 2);
    cache.set("k3", 3);
    cache.set("k4", 4);

    assert_eq!(cache.get(&"k1"), None);
    assert_eq!(cache.get(&"k2"), Some(2));
    assert_eq!(cache.get(&"k3"), Some(3));
    assert_eq!(cache.get(&"k4"), Some(4));
}

#[test]
fn test_read_refreshes_recency() {
    let cache = make_cache(2);
    cache.set("a", 1);
    cache.set("b", 2);
    assert_eq!(cache.get(&"a"), Some(1));
    cache.set("c", 3);

    assert_eq!(cache.get(&"b"), None, "b was least recently used");
    assert_eq!(cache.get(&"a"), Some(1));
    assert_eq!(cache.get(&"c"), Some(3));
}

#[test]
fn test_overwrite_occupies_one_slot() {
    let cache = make_cache(2);
    cache.set("k", 1);
    cache.set("k", 2);
    assert_eq!(cache.get(&"k"), Some(2));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_overwrite_refreshes_recency() {
    let cache = make_cache(2);
    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("a", 10);
    cache.set("c", 3);

    assert_eq!(cache.get(&"b"), None);
    assert_eq!(cache.get(&"a"), Some(10));
}

#[test]
fn test_miss_does_not_change_size_or_order() {
    let cache = make_cache(3);
    cache.set("a", 1);
    cache.set("b", 2);
    let before = cache.keys();

    assert_eq!(cache.get(&"missing"), None);

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.keys(), before);
}

#[test]
fn test_capacity_bound_keeps_most_recent_keys() {
    let cap = 5;
    let cache: Cache<u32, u32> = Cache::with_options([CacheOption::Capacity(cap)]);
    for i in 0..50u32 {
        cache.set(i, i * 10);
        assert!(cache.len() <= 5);
    }

    let survivors: HashSet<u32> = cache.keys().into_iter().collect();
    assert_eq!(survivors, (45..50).collect::<HashSet<_>>());
    assert_eq!(cache.keys(), [49, 48, 47, 46, 45]);
}

#[test]
fn test_mixed_access_pattern() {
    let cache = make_cache(3);
    cache.set("a", 1);
    cache.set("b", 2);
    cache.set("c", 3);
    cache.get(&"a"); // order: a c b
    cache.set("d", 4); // evicts b
    cache.get(&"c"); // order: c d a
    cache.set("e", 5); // evicts a

    assert_eq!(cache.keys(), ["e", "c", "d"]);
    assert_eq!(cache.get(&"a"), None);
    assert_eq!(cache.get(&"b"), None);
}

#[test]
fn test_capacity_one() {
    let cache = make_cache(1);
    cache.set("a", 1);
    cache.set("b", 2);
    assert_eq!(cache.get(&"a"), None);
    assert_eq!(cache.get(&"b"), Some(2));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_invalid_capacity_yields_default() {
    for cap in [-5, 0] {
        let cache: Cache<u8, u8> = Cache::with_options([CacheOption::Capacity(cap)]);
        assert_eq!(cache.capacity().get(), 128);
    }
}

#[test]
fn test_negative_ttl_yields_disabled() {
    let cache: Cache<u8, u8> = Cache::with_options([CacheOption::TtlSecs(-1.0)]);
    assert_eq!(cache.ttl(), None);
}

#[test]
fn test_none_options_are_skipped() {
    let cache: Cache<u8, u8> = Cache::with_options([None, Some(CacheOption::Capacity(3)), None]);
    assert_eq!(cache.capacity().get(), 3);
}

#[test]
fn test_default_capacity_is_enforced() {
    let cache: Cache<u32, u32> = Cache::new(CacheConfig::default());
    for i in 0..200 {
        cache.set(i, i);
    }
    assert_eq!(cache.len(), 128);
    assert_eq!(cache.get(&71), None);
    assert_eq!(cache.get(&72), Some(72));
}

#[test]
fn test_eviction_does_not_consider_expiry() {
    let clock = ManualClock::new();
    let config = CacheConfig::default()
        .with_capacity(2)
        .with_ttl(Duration::from_secs(10));
    let cache = Cache::with_clock(config, clock.clone());

    cache.set("old", 1);
    clock.advance(Duration::from_secs(8));
    cache.set("new", 2);
    // "old" is still fresh, but it is the LRU entry
    cache.set("newest", 3);

    assert_eq!(cache.get(&"old"), None);
    assert_eq!(cache.get(&"new"), Some(2));
}

#[derive(Debug, Clone, PartialEq)]
struct ComplexValue {
    val: i32,
    description: String,
}

#[test]
fn test_complex_values_are_copied_out() {
    let cache: Cache<String, ComplexValue> = Cache::with_options([CacheOption::Capacity(2)]);
    let fruit = ComplexValue {
        val: 1,
        description: String::from("First fruit"),
    };
    cache.set(String::from("apple"), fruit.clone());

    let mut copy = cache.get("apple").unwrap();
    copy.description.push_str(" (edited)");

    assert_eq!(cache.get("apple"), Some(fruit));
}
