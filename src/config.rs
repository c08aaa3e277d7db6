//! Cache Configuration Module
//!
//! [`CacheConfig`] holds the two knobs the cache has: how many entries it
//! keeps and how long each entry stays fresh. It is resolved once, before the
//! cache is built, and never changes afterwards.
//!
//! # Lenient setters
//!
//! Every way of setting a value (builder methods, [`CacheOption`] sequences and,
//! with the `serde` feature, deserialization) **ignores invalid input and keeps
//! the previous value**. A zero or negative capacity leaves the capacity at
//! whatever it was (the default is [`DEFAULT_CAPACITY`]); a negative or
//! non-finite TTL leaves TTL where it was (the default is disabled). Building a
//! cache from configuration therefore never fails. Ignored values are reported
//! as `tracing` debug events.
//!
//! Callers that would rather reject bad input use [`CacheConfig::try_new`].
//!
//! # Examples
//!
//! ```
//! use lru_ttl::config::{CacheConfig, CacheOption};
//! use std::time::Duration;
//!
//! let config = CacheConfig::default()
//!     .with_capacity(1_000)
//!     .with_ttl(Duration::from_secs(30));
//! assert_eq!(config.capacity.get(), 1_000);
//!
//! // Same thing from an option list; the invalid capacity is skipped.
//! let config = CacheConfig::from_options([
//!     CacheOption::Capacity(1_000),
//!     CacheOption::Capacity(-5),
//!     CacheOption::Ttl(Duration::from_secs(30)),
//! ]);
//! assert_eq!(config.capacity.get(), 1_000);
//! assert_eq!(config.ttl, Duration::from_secs(30));
//! ```

use std::fmt;
use std::num::NonZeroUsize;
use std::time::Duration;

use thiserror::Error;

/// Capacity used when no valid capacity was configured.
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(128) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

/// Configuration for a [`Cache`](crate::Cache).
///
/// # Fields
///
/// - `capacity`: Maximum number of entries. Inserting a new key into a full
///   cache evicts the least recently used entry first.
/// - `ttl`: How long an entry stays valid after it was last set.
///   `Duration::ZERO` disables expiry entirely.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "RawCacheConfig", into = "RawCacheConfig")
)]
pub struct CacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
    /// Time-to-live applied to every entry. Zero means entries never expire.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl: Duration::ZERO,
        }
    }
}

impl CacheConfig {
    /// Builds a config, rejecting values the lenient setters would skip.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if `capacity` is not positive
    /// (or does not fit in `usize`), and [`ConfigError::InvalidTtl`] if
    /// `ttl_secs` is negative, NaN or too large for a [`Duration`].
    pub fn try_new(capacity: i64, ttl_secs: f64) -> Result<Self, ConfigError> {
        let capacity = usize::try_from(capacity)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or(ConfigError::InvalidCapacity(capacity))?;
        let ttl = Duration::try_from_secs_f64(ttl_secs)
            .map_err(|_| ConfigError::InvalidTtl(ttl_secs))?;
        Ok(Self { capacity, ttl })
    }

    /// Folds a sequence of options over the default config, in order.
    ///
    /// Items may be plain [`CacheOption`]s or `Option<CacheOption>`; `None`
    /// items are skipped.
    pub fn from_options<I, O>(options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<Option<CacheOption>>,
    {
        options
            .into_iter()
            .filter_map(Into::<Option<CacheOption>>::into)
            .fold(Self::default(), |config, option| option.apply(config))
    }

    /// Sets the capacity. Zero, negative and out-of-range values are ignored.
    #[must_use]
    pub fn with_capacity<N: TryInto<usize>>(mut self, capacity: N) -> Self {
        match capacity.try_into().ok().and_then(NonZeroUsize::new) {
            Some(capacity) => self.capacity = capacity,
            None => tracing::debug!(
                kept = self.capacity.get(),
                "ignoring non-positive cache capacity"
            ),
        }
        self
    }

    /// Sets the TTL. `Duration::ZERO` disables expiry.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the TTL from fractional seconds.
    ///
    /// Negative, NaN and overflowing values are ignored; `0.0` disables expiry.
    #[must_use]
    pub fn with_ttl_secs_f64(mut self, secs: f64) -> Self {
        match Duration::try_from_secs_f64(secs) {
            Ok(ttl) => self.ttl = ttl,
            Err(_) => tracing::debug!(
                ttl_secs = secs,
                kept = ?self.ttl,
                "ignoring invalid cache ttl"
            ),
        }
        self
    }

    /// Returns the TTL, or `None` when expiry is disabled.
    #[inline]
    pub fn ttl(&self) -> Option<Duration> {
        (!self.ttl.is_zero()).then_some(self.ttl)
    }
}

impl fmt::Debug for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConfig")
            .field("capacity", &self.capacity)
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// A single named configuration setting.
///
/// Options are applied in order by [`CacheConfig::from_options`] and
/// [`Cache::with_options`](crate::Cache::with_options). Each one validates its
/// own value and becomes a no-op when the value is invalid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CacheOption {
    /// Entry capacity. Ignored unless positive.
    Capacity(i64),
    /// Time-to-live. `Duration::ZERO` disables expiry.
    Ttl(Duration),
    /// Time-to-live in fractional seconds. Ignored if negative or not finite.
    TtlSecs(f64),
}

impl CacheOption {
    /// Applies this option to `config`.
    #[must_use]
    pub fn apply(self, config: CacheConfig) -> CacheConfig {
        match self {
            CacheOption::Capacity(capacity) => config.with_capacity(capacity),
            CacheOption::Ttl(ttl) => config.with_ttl(ttl),
            CacheOption::TtlSecs(secs) => config.with_ttl_secs_f64(secs),
        }
    }
}

/// Error returned by [`CacheConfig::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// Capacity was zero, negative or larger than `usize::MAX`.
    #[error("cache capacity must be positive, got {0}")]
    InvalidCapacity(i64),
    /// TTL seconds were negative, NaN or too large.
    #[error("cache ttl must be a non-negative finite number of seconds, got {0}")]
    InvalidTtl(f64),
}

/// Wire shape of [`CacheConfig`]: both fields optional, unchecked.
#[cfg(feature = "serde")]
#[derive(Default, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawCacheConfig {
    capacity: Option<i64>,
    ttl_secs: Option<f64>,
}

#[cfg(feature = "serde")]
impl From<RawCacheConfig> for CacheConfig {
    fn from(raw: RawCacheConfig) -> Self {
        CacheConfig::from_options([
            raw.capacity.map(CacheOption::Capacity),
            raw.ttl_secs.map(CacheOption::TtlSecs),
        ])
    }
}

#[cfg(feature = "serde")]
impl From<CacheConfig> for RawCacheConfig {
    fn from(config: CacheConfig) -> Self {
        Self {
            capacity: Some(i64::try_from(config.capacity.get()).unwrap_or(i64::MAX)),
            ttl_secs: Some(config.ttl.as_secs_f64()),
        }
    }
}
