#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## How entries leave the cache
//!
//! ```text
//!            set (new key)                 set / get (fresh)
//!   ABSENT ───────────────▶ PRESENT ◀──────────────────────┐
//!     ▲                     │  │  └────────────────────────┘
//!     │   capacity eviction │  │ clock passes expires_at
//!     ├─────────────────────┘  ▼
//!     │                  PRESENT (stale)
//!     │   get, or eviction │
//!     └────────────────────┘
//! ```
//!
//! - **Capacity**: inserting a new key into a full cache evicts the least
//!   recently used entry, fresh or not.
//! - **Expiry**: checked only when a key is read. A stale hit is removed and
//!   reported as a miss. There is no background sweeper.
//!
//! ## Performance Characteristics
//!
//! | Operation | Time | Locking |
//! |-----------|------|---------|
//! | `set`     | O(1) | exclusive |
//! | `get`     | O(1) | exclusive |
//! | `len`     | O(1) | exclusive |
//! | `keys`    | O(n) | exclusive |
//!
//! ## Deterministic expiry in tests
//!
//! ```rust
//! use lru_ttl::clock::ManualClock;
//! use lru_ttl::config::CacheConfig;
//! use lru_ttl::Cache;
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let config = CacheConfig::default().with_ttl(Duration::from_secs(30));
//! let cache = Cache::with_clock(config, clock.clone());
//!
//! cache.set("session", 7);
//! clock.advance(Duration::from_secs(31));
//! assert_eq!(cache.get(&"session"), None);
//! ```
//!
//! ## Modules
//!
//! - [`cache`]: the thread-safe [`Cache`]
//! - [`config`]: [`CacheConfig`] and the lenient [`CacheOption`] setters
//! - [`entry`]: the stored [`Entry`] record
//! - [`clock`]: time sources

/// Thread-safe cache front end.
///
/// Wraps the LRU segment in a single exclusive lock and supplies the time
/// source.
pub mod cache;

/// Time sources.
pub mod clock;

/// Cache configuration.
///
/// Provides [`CacheConfig`], the [`CacheOption`] sequence form and the strict
/// [`ConfigError`](config::ConfigError) validation path.
pub mod config;

/// Cache entry record.
pub mod entry;

/// Arena-backed doubly linked list.
///
/// Internal infrastructure for the recency order. Nodes are addressed by
/// index handles, so no raw pointers are involved.
pub(crate) mod list;

/// Unsynchronized LRU segment with lazy expiry.
pub(crate) mod lru;

pub use cache::Cache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CacheConfig, CacheOption, ConfigError, DEFAULT_CAPACITY};
pub use entry::Entry;
