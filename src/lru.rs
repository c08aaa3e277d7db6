//! Least Recently Used (LRU) segment with lazy TTL expiry.
//!
//! This is the unsynchronized core behind [`Cache`](crate::Cache). It owns a
//! key index and a recency list and keeps the two in lockstep: every key in
//! the index names exactly one node in the list, and every node's entry
//! carries the key that indexes it.
//!
//! # Algorithm
//!
//! - `put` on a present key swaps in a new entry (new value, new expiry) and
//!   moves the node to the front.
//! - `put` on an absent key evicts the back of the list first when the
//!   segment is full, then pushes the new entry at the front.
//! - `get` moves a fresh hit to the front. A hit whose expiry has passed is
//!   removed on the spot and reported as a miss.
//!
//! Nothing runs in the background. An entry that expires and is never read
//! again stays until capacity pressure pushes it out the back.
//!
//! Time is passed in by the caller so the segment has no clock of its own.
//!
//! # Performance Characteristics
//!
//! - Get: O(1)
//! - Put: O(1)
//! - Keys snapshot: O(n)

use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use std::time::{Duration, Instant};

use crate::config::CacheConfig;
use crate::entry::Entry;
use crate::list::{List, NodeId};

#[cfg(feature = "hashbrown")]
pub(crate) use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
pub(crate) use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Outcome of a lookup that found its key.
pub(crate) enum Lookup<'a, V> {
    /// Fresh entry; its node was moved to the front.
    Hit(&'a V),
    /// Entry had expired and was removed.
    Expired,
}

pub(crate) struct LruSegment<K, V, S = DefaultHashBuilder> {
    config: CacheConfig,
    list: List<Entry<K, V>>,
    map: HashMap<K, NodeId, S>,
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruSegment<K, V, S> {
    pub(crate) fn with_hasher(config: CacheConfig, hash_builder: S) -> Self {
        let cap = config.capacity;
        LruSegment {
            config,
            list: List::new(cap),
            map: HashMap::with_capacity_and_hasher(cap.get().min(1024), hash_builder),
        }
    }

    #[inline]
    pub(crate) fn cap(&self) -> NonZeroUsize {
        self.list.cap()
    }

    #[inline]
    pub(crate) fn ttl(&self) -> Duration {
        self.config.ttl
    }

    #[inline]
    pub(crate) fn config(&self) -> CacheConfig {
        self.config
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Looks up `key` as of `now`.
    ///
    /// Returns `None` if the key is absent.
    pub(crate) fn get<Q>(&mut self, key: &Q, now: Instant) -> Option<Lookup<'_, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.get(key).copied()?;

        let expired = self
            .list
            .get_value(node)
            .is_some_and(|entry| entry.is_expired(now));
        if expired {
            self.map.remove(key);
            self.list.remove(node);
            tracing::trace!(len = self.map.len(), "removed expired cache entry");
            return Some(Lookup::Expired);
        }

        self.list.move_to_front(node);
        self.list
            .get_value(node)
            .map(|entry| Lookup::Hit(&entry.value))
    }

    /// Stores `value` under `key` with an expiry of `now + ttl`.
    ///
    /// Returns the entry evicted to make room, if any.
    pub(crate) fn put(&mut self, key: K, value: V, now: Instant) -> Option<(K, V)> {
        let entry = Entry::new(key, value, now, self.config.ttl);

        if let Some(&node) = self.map.get(&entry.key) {
            self.list.move_to_front(node);
            self.list.update(node, entry);
            return None;
        }

        let mut evicted = None;
        if self.map.len() >= self.cap().get() {
            if let Some(old) = self.list.remove_last() {
                self.map.remove(&old.key);
                tracing::trace!(
                    capacity = self.cap().get(),
                    "evicted least recently used cache entry"
                );
                evicted = Some((old.key, old.value));
            }
        }

        let key = entry.key.clone();
        if let Some(node) = self.list.add(entry) {
            self.map.insert(key, node);
        }

        evicted
    }

    /// Keys from most to least recently used.
    pub(crate) fn keys(&self) -> Vec<K> {
        self.list.iter().map(|entry| entry.key.clone()).collect()
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }

    /// Panics if the index and the recency list have drifted apart.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.map.len(), self.list.len());
        assert!(self.list.len() <= self.cap().get());
        for (key, &node) in self.map.iter() {
            let entry = self
                .list
                .get_value(node)
                .expect("index points at a vacant node");
            assert!(entry.key == *key, "node key differs from index key");
        }
        for entry in self.list.iter() {
            assert!(self.map.contains_key(&entry.key), "orphaned list node");
        }
    }
}

impl<K, V, S> core::fmt::Debug for LruSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruSegment")
            .field("capacity", &self.config.capacity)
            .field("ttl", &self.config.ttl)
            .field("len", &self.list.len())
            .finish()
    }
}
