//! Value factories: how a [`LazyCache`](crate::cache::LazyCache) produces a value on a miss.
//!
//! The cache only ever talks to a [`ValueFactory`]. Plain closures are adapted
//! with [`from_fn`] (infallible, `Error = Infallible`) or [`try_from_fn`]
//! (closures returning `Result`). A factory may be called again for the same
//! key after that key has been evicted, so it should not rely on being
//! invoked once per key.
//!
//! ```
//! use lazycache::cache::LazyCache;
//! use lazycache::factory::try_from_fn;
//!
//! let mut cache = LazyCache::with_factory(
//!     try_from_fn(|path: &String| {
//!         if path.is_empty() { Err("empty path") } else { Ok(path.len()) }
//!     }),
//!     16,
//! )
//! .unwrap();
//!
//! assert_eq!(cache.try_get(&"abc".to_string()), Ok(&3));
//! assert_eq!(cache.try_get(&String::new()), Err("empty path"));
//! assert_eq!(cache.len(), 1);
//! ```

use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

/// Produces the value for a key that is not resident.
pub trait ValueFactory<K, V> {
    /// Failure type handed back unchanged by [`LazyCache::try_get`](crate::cache::LazyCache::try_get).
    type Error;

    /// Computes the value for `key`.
    fn create(&mut self, key: &K) -> Result<V, Self::Error>;
}

/// Adapter for closures that always succeed.
#[derive(Clone, Copy)]
pub struct FromFn<F>(F);

/// Wraps an infallible `FnMut(&K) -> V` closure.
#[inline]
pub fn from_fn<F>(f: F) -> FromFn<F> {
    FromFn(f)
}

impl<K, V, F> ValueFactory<K, V> for FromFn<F>
where
    F: FnMut(&K) -> V,
{
    type Error = Infallible;

    #[inline]
    fn create(&mut self, key: &K) -> Result<V, Infallible> {
        Ok((self.0)(key))
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FromFn(..)")
    }
}

/// Adapter for closures returning `Result`.
pub struct TryFromFn<F, E> {
    f: F,
    _error: PhantomData<fn() -> E>,
}

/// Wraps a fallible `FnMut(&K) -> Result<V, E>` closure.
#[inline]
pub fn try_from_fn<F, E>(f: F) -> TryFromFn<F, E> {
    TryFromFn {
        f,
        _error: PhantomData,
    }
}

impl<K, V, E, F> ValueFactory<K, V> for TryFromFn<F, E>
where
    F: FnMut(&K) -> Result<V, E>,
{
    type Error = E;

    #[inline]
    fn create(&mut self, key: &K) -> Result<V, E> {
        (self.f)(key)
    }
}

impl<F: Clone, E> Clone for TryFromFn<F, E> {
    fn clone(&self) -> Self {
        try_from_fn(self.f.clone())
    }
}

impl<F, E> fmt::Debug for TryFromFn<F, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TryFromFn(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_always_succeeds() {
        let mut factory = from_fn(|k: &u32| k * 3);
        assert_eq!(ValueFactory::<u32, u32>::create(&mut factory, &7), Ok(21));
    }

    #[test]
    fn try_from_fn_passes_errors_through() {
        let mut factory = try_from_fn(|k: &i32| if *k < 0 { Err(*k) } else { Ok(*k as u32) });
        assert_eq!(factory.create(&4), Ok(4u32));
        assert_eq!(factory.create(&-2), Err(-2));
    }

    #[test]
    fn stateful_closures_are_allowed() {
        let mut calls = 0;
        let mut factory = from_fn(|k: &u8| {
            calls += 1;
            u16::from(*k)
        });
        let _ = factory.create(&1);
        let _ = factory.create(&1);
        drop(factory);
        assert_eq!(calls, 2);
    }
}
