//! Basic usage of the LRU + TTL cache.
//!
//! Run with: cargo run --example basic_usage

use lru_ttl::clock::ManualClock;
use lru_ttl::config::{CacheConfig, CacheOption};
use lru_ttl::Cache;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() {
    println!("LRU + TTL Cache Examples");
    println!("========================\n");

    lru_eviction();
    ttl_expiry();
    lenient_configuration();
    shared_across_threads();
}

fn lru_eviction() {
    println!("1. LRU eviction");
    let cache = Cache::with_options([CacheOption::Capacity(2)]);
    cache.set("apple", 1);
    cache.set("banana", 2);
    cache.get(&"apple");
    cache.set("cherry", 3);
    println!("   keys (most recent first): {:?}", cache.keys());
    println!("   banana after eviction: {:?}\n", cache.get(&"banana"));
}

fn ttl_expiry() {
    println!("2. TTL expiry");
    let clock = ManualClock::new();
    let config = CacheConfig::default().with_ttl(Duration::from_secs(30));
    let cache = Cache::with_clock(config, clock.clone());

    cache.set("session", "token-123");
    println!("   fresh: {:?}", cache.get(&"session"));
    clock.advance(Duration::from_secs(31));
    println!("   after 31s: {:?}", cache.get(&"session"));
    println!("   entries left: {}\n", cache.len());
}

fn lenient_configuration() {
    println!("3. Invalid options are ignored");
    let cache: Cache<u32, u32> = Cache::with_options([
        Some(CacheOption::Capacity(-5)),
        None,
        Some(CacheOption::TtlSecs(-1.0)),
    ]);
    println!(
        "   capacity = {}, ttl = {:?}",
        cache.capacity(),
        cache.ttl()
    );
    match CacheConfig::try_new(-5, 1.0) {
        Ok(config) => println!("   strict config: {config:?}\n"),
        Err(err) => println!("   strict config rejected: {err}\n"),
    }
}

fn shared_across_threads() {
    println!("4. Shared across threads");
    let cache = Arc::new(Cache::new(CacheConfig::default().with_capacity(100)));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..1000 {
                    let key = format!("key_{}_{}", t, i % 50);
                    cache.set(key.clone(), i);
                    let _ = cache.get(&key);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    println!("   entries: {} (capacity {})", cache.len(), cache.capacity());
}
