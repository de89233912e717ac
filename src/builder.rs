//! Builder for [`LazyCache`] instances.
//!
//! Collects configuration first and takes the factory last, so the same
//! builder value can stamp out several caches with different factories.
//!
//! ## Example
//!
//! ```rust
//! use lazycache::builder::LazyCacheBuilder;
//!
//! let mut cache = LazyCacheBuilder::new().minimum_capacity(100).build(|k: &u64| k * 2);
//! assert_eq!(cache.capacity(), 256);
//! assert_eq!(*cache.get(&21), 42);
//! ```

use std::hash::Hash;

use crate::cache::LazyCache;
use crate::capacity::DEFAULT_MINIMUM_CAPACITY;
use crate::error::ConfigError;
use crate::factory::{FromFn, ValueFactory, from_fn};

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LazyCacheBuilder {
    minimum_capacity: usize,
}

impl Default for LazyCacheBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LazyCacheBuilder {
    /// Creates a builder with the default minimum capacity of 64.
    pub fn new() -> Self {
        Self {
            minimum_capacity: DEFAULT_MINIMUM_CAPACITY,
        }
    }

    /// Sets the requested minimum capacity; the realized capacity is rounded
    /// up per [`capacity::plan`](crate::capacity::plan).
    pub fn minimum_capacity(mut self, minimum_capacity: usize) -> Self {
        self.minimum_capacity = minimum_capacity;
        self
    }

    /// Builds a cache around an infallible closure.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid. See [`try_build`](Self::try_build).
    pub fn build<K, V, F>(self, factory: F) -> LazyCache<K, V, FromFn<F>>
    where
        K: Clone + Eq + Hash,
        F: FnMut(&K) -> V,
    {
        match self.try_build(factory) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds a cache around an infallible closure, returning an error on
    /// invalid configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the minimum capacity is zero or too large.
    pub fn try_build<K, V, F>(self, factory: F) -> Result<LazyCache<K, V, FromFn<F>>, ConfigError>
    where
        K: Clone + Eq + Hash,
        F: FnMut(&K) -> V,
    {
        self.try_build_with(from_fn(factory))
    }

    /// Builds a cache around any [`ValueFactory`], including fallible ones.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lazycache::builder::LazyCacheBuilder;
    /// use lazycache::factory::try_from_fn;
    ///
    /// let mut cache = LazyCacheBuilder::new()
    ///     .minimum_capacity(4)
    ///     .try_build_with(try_from_fn(|k: &i64| u64::try_from(*k)))
    ///     .unwrap();
    ///
    /// assert_eq!(cache.try_get(&7), Ok(&7));
    /// assert!(cache.try_get(&-1).is_err());
    /// ```
    pub fn try_build_with<K, V, F>(self, factory: F) -> Result<LazyCache<K, V, F>, ConfigError>
    where
        K: Clone + Eq + Hash,
        F: ValueFactory<K, V>,
    {
        LazyCache::with_factory(factory, self.minimum_capacity)
    }
}
