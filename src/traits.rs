//! # Cache Traits
//!
//! Two small traits describe what a get-or-create cache offers to generic
//! code. They are split by borrow: inspection needs only `&self`, while
//! loading may run the factory and reorder slots, so it needs `&mut self`.
//!
//! ```text
//!   ┌─────────────────────────────────────┐
//!   │         ReadOnlyCache<K>            │
//!   │                                     │
//!   │  contains(&, &K) → bool             │
//!   │  len(&) → usize                     │
//!   │  is_empty(&) → bool                 │
//!   │  capacity(&) → usize                │
//!   └──────────────────┬──────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────┐
//!   │        LoadingCache<K, V>           │
//!   │                                     │
//!   │  type Error                         │
//!   │  try_get(&mut, &K) → Result<&V, E>  │
//!   │  peek(&, &K) → Option<&V>           │
//!   └─────────────────────────────────────┘
//! ```
//!
//! There is no `insert` or `remove`: entries only enter through the factory
//! and only leave through eviction or `clear`.
//!
//! ## Example
//!
//! ```
//! use lazycache::cache::LazyCache;
//! use lazycache::traits::{LoadingCache, ReadOnlyCache};
//!
//! fn warm<C: LoadingCache<u64, u64>>(cache: &mut C, keys: &[u64]) -> Result<(), C::Error> {
//!     for key in keys {
//!         cache.try_get(key)?;
//!     }
//!     Ok(())
//! }
//!
//! let mut cache = LazyCache::with_capacity(|k: &u64| k * k, 16);
//! warm(&mut cache, &[1, 2, 3]).unwrap();
//! assert_eq!(ReadOnlyCache::len(&cache), 3);
//! assert_eq!(cache.peek(&3), Some(&9));
//! ```

/// Inspection operations that never invoke a factory or change ordering.
pub trait ReadOnlyCache<K> {
    /// Returns `true` if `key` is resident.
    fn contains(&self, key: &K) -> bool;

    /// Number of resident entries.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident entries.
    fn capacity(&self) -> usize;
}

/// Get-or-create access backed by a value factory.
pub trait LoadingCache<K, V>: ReadOnlyCache<K> {
    /// Failure type of the underlying factory.
    type Error;

    /// Returns the value for `key`, computing and caching it on a miss.
    ///
    /// On failure the cache is left exactly as it was before the call.
    fn try_get(&mut self, key: &K) -> Result<&V, Self::Error>;

    /// Returns the resident value for `key` without counting a hit.
    fn peek(&self, key: &K) -> Option<&V>;
}
