//! Thread-safe LRU cache with lazy TTL expiry.
//!
//! [`Cache`] wraps one `LruSegment` in a single
//! `parking_lot::Mutex`. Every operation takes the lock for its whole critical
//! section, so operations are linearizable and the key index and recency list
//! are never observed half-updated.
//!
//! ## Why one Mutex and not an RwLock?
//!
//! A read is a write here: `get` moves the entry it finds to the front of the
//! recency list (and removes it if it has expired). Splitting readers from
//! writers would buy nothing, so all operations share one exclusive lock.
//! Critical sections are O(1) (one map operation and one list splice), and
//! no I/O or waiting ever happens under the lock.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                        Cache                         │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │                     Mutex                      │  │
//! │  │  ┌──────────────┐        ┌──────────────────┐  │  │
//! │  │  │  key index   │ ─────▶ │   recency list   │  │  │
//! │  │  │ K -> NodeId  │        │ MRU ◀──────▶ LRU │  │  │
//! │  │  └──────────────┘        └──────────────────┘  │  │
//! │  └────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use std::time::Duration;

use parking_lot::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::config::{CacheConfig, CacheOption};
use crate::lru::{DefaultHashBuilder, Lookup, LruSegment};

/// A thread-safe, capacity-bounded LRU cache with optional per-entry TTL.
///
/// Values are copied out on [`get`](Cache::get), so `V` must be `Clone`; use
/// [`get_with`](Cache::get_with) to borrow a value under the lock instead.
///
/// Absent, expired and evicted keys all read back as `None`. When a read finds
/// an expired entry, the entry is removed right away and its slot is free for
/// the next insert.
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq + Clone`.
/// - `V`: Value type.
/// - `C`: Time source. Defaults to [`SystemClock`].
/// - `S`: Hash builder for the key index. Defaults to `DefaultHashBuilder`.
///
/// # Examples
///
/// ```
/// use lru_ttl::config::CacheOption;
/// use lru_ttl::Cache;
/// use std::time::Duration;
///
/// let cache = Cache::with_options([
///     CacheOption::Capacity(2),
///     CacheOption::Ttl(Duration::from_secs(60)),
/// ]);
///
/// cache.set("apple", 1);
/// cache.set("banana", 2);
/// assert_eq!(cache.get(&"apple"), Some(1)); // "apple" is now most recent
///
/// cache.set("cherry", 3); // evicts "banana"
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.len(), 2);
/// ```
pub struct Cache<K, V, C = SystemClock, S = DefaultHashBuilder> {
    segment: Mutex<LruSegment<K, V, S>>,
    clock: C,
}

impl<K, V> Cache<K, V, SystemClock, DefaultHashBuilder>
where
    K: Hash + Eq + Clone,
{
    /// Creates a cache from `config`, using the system clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Creates a cache by applying `options`, in order, over the default config.
    ///
    /// Invalid options and `None` items are skipped; construction never fails.
    /// See [`CacheConfig::from_options`].
    pub fn with_options<I, O>(options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<Option<CacheOption>>,
    {
        Self::new(CacheConfig::from_options(options))
    }
}

impl<K, V, C> Cache<K, V, C, DefaultHashBuilder>
where
    K: Hash + Eq + Clone,
    C: Clock,
{
    /// Creates a cache that reads time from `clock`.
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        Self::with_clock_and_hasher(config, clock, DefaultHashBuilder::default())
    }
}

impl<K, V, C, S> Cache<K, V, C, S>
where
    K: Hash + Eq + Clone,
    C: Clock,
    S: BuildHasher,
{
    /// Creates a cache with a custom clock and hash builder.
    pub fn with_clock_and_hasher(config: CacheConfig, clock: C, hash_builder: S) -> Self {
        tracing::debug!(
            capacity = config.capacity.get(),
            ttl = ?config.ttl,
            "creating lru cache"
        );
        Self {
            segment: Mutex::new(LruSegment::with_hasher(config, hash_builder)),
            clock,
        }
    }

    /// Stores `value` under `key`.
    ///
    /// An existing entry for `key` is replaced (new value, new expiry) and
    /// becomes the most recently used. A new key inserted into a full cache
    /// first evicts the least recently used entry.
    pub fn set(&self, key: K, value: V) {
        let now = self.clock.now();
        let mut segment = self.segment.lock();
        segment.put(key, value, now);
    }

    /// Returns a copy of the value stored under `key`.
    ///
    /// A hit becomes the most recently used entry. Returns `None` if the key
    /// was never set, was evicted or has expired.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.get_with(key, V::clone)
    }

    /// Runs `f` on the value stored under `key` while holding the lock.
    ///
    /// Recency and expiry behave exactly as for [`get`](Cache::get). Keep `f`
    /// short: every other caller waits for it.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        let mut segment = self.segment.lock();
        let now = self.clock.now();
        match segment.get(key, now)? {
            Lookup::Hit(value) => Some(f(value)),
            Lookup::Expired => None,
        }
    }

    /// Returns the number of stored entries.
    ///
    /// Expired entries that have not been read since they expired still count.
    pub fn len(&self) -> usize {
        self.segment.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.segment.lock().is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> NonZeroUsize {
        self.segment.lock().cap()
    }

    /// Returns the entry TTL, or `None` if entries never expire.
    pub fn ttl(&self) -> Option<Duration> {
        let ttl = self.segment.lock().ttl();
        (!ttl.is_zero()).then_some(ttl)
    }

    /// Returns the configuration the cache was built with.
    pub fn config(&self) -> CacheConfig {
        self.segment.lock().config()
    }

    /// Returns the stored keys, most recently used first.
    ///
    /// Taking the snapshot does not count as a use of any key.
    pub fn keys(&self) -> Vec<K> {
        self.segment.lock().keys()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.segment.lock().clear();
    }
}

impl<K, V, C, S> fmt::Debug for Cache<K, V, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("segment", &*self.segment.lock())
            .finish_non_exhaustive()
    }
}
