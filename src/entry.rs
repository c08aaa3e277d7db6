//! Cache entry type.
//!
//! An [`Entry`] is what the recency list stores: the key, the value and the
//! instant after which the value stops being served. Entries are never edited
//! in place; `set` on an existing key builds a fresh entry and swaps it in.

use std::fmt;
use std::time::{Duration, Instant};

/// A cached value together with its key and expiry.
///
/// # Examples
///
/// ```
/// use lru_ttl::entry::Entry;
/// use std::time::{Duration, Instant};
///
/// let now = Instant::now();
/// let entry = Entry::new("key", 42, now, Duration::from_secs(1));
/// assert!(!entry.is_expired(now));
/// assert!(entry.is_expired(now + Duration::from_secs(2)));
///
/// // A zero TTL means the entry never expires.
/// let entry = Entry::new("key", 42, now, Duration::ZERO);
/// assert_eq!(entry.expires_at, None);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    /// The cached key
    pub key: K,
    /// The cached value
    pub value: V,
    /// Instant after which the entry is stale. `None` never expires.
    pub expires_at: Option<Instant>,
}

impl<K, V> Entry<K, V> {
    /// Creates an entry that expires `ttl` after `now`.
    ///
    /// A zero `ttl` yields an entry that never expires, as does a `ttl` so
    /// large that `now + ttl` is not representable.
    pub fn new(key: K, value: V, now: Instant, ttl: Duration) -> Self {
        let expires_at = if ttl.is_zero() {
            None
        } else {
            now.checked_add(ttl)
        };
        Self {
            key,
            value,
            expires_at,
        }
    }

    /// Returns true if the entry's expiry is strictly before `now`.
    #[inline]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at < now)
    }
}

impl<K, V> fmt::Debug for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}
