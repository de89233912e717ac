//! Error types for the lazycache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a cache cannot be constructed from the
//!   requested parameters (zero minimum capacity, a capacity plan that does
//!   not fit in `usize`).
//! - [`InvariantError`]: Returned by the debug-only `check_invariants`
//!   methods when the slot table and its key index disagree.
//!
//! Factory failures are not represented here: [`LazyCache::try_get`] hands the
//! factory's own error type back to the caller untouched.
//!
//! [`LazyCache::try_get`]: crate::cache::LazyCache::try_get
//!
//! ## Example Usage
//!
//! ```
//! use lazycache::cache::LazyCache;
//! use lazycache::error::ConfigError;
//!
//! let cache = LazyCache::try_with_capacity(|k: &u32| k * 2, 100);
//! assert!(cache.is_ok());
//!
//! let bad: Result<_, ConfigError> = LazyCache::try_with_capacity(|k: &u32| k * 2, 0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// A requested minimum capacity that no power-of-four slot array can honor.
///
/// Two cases exist: a minimum of zero, and a minimum so large that the
/// rounded-up capacity no longer fits in `usize`. Both are reported before
/// any slot is allocated, by [`capacity::plan`](crate::capacity::plan) and
/// everything built on it ([`LazyCache::with_factory`](crate::cache::LazyCache::with_factory),
/// the `try_*` constructors, [`LazyCacheBuilder`](crate::builder::LazyCacheBuilder)).
///
/// # Example
///
/// ```
/// use lazycache::capacity;
///
/// let zero = capacity::plan(0).unwrap_err();
/// assert_eq!(zero.message(), "minimum capacity must be greater than zero");
///
/// // the next power of four above usize::MAX / 2 does not fit
/// let huge = capacity::plan(usize::MAX / 2 + 1).unwrap_err();
/// assert!(huge.message().contains("exceeds the largest supported capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// The slot array and its key index disagree, or the head no longer
/// squares to the capacity. Seeing one is a bug in this crate.
///
/// Only debug builds can produce it, through [`SlotTable::check_invariants`](crate::ds::SlotTable::check_invariants)
/// and [`LazyCache::check_invariants`](crate::cache::LazyCache::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("minimum capacity must be greater than zero");
        assert_eq!(err.to_string(), "minimum capacity must be greater than zero");
    }

    #[test]
    fn config_message_accessor() {
        let err = ConfigError::new("overflow");
        assert_eq!(err.message(), "overflow");
    }

    #[test]
    fn overflowing_minimum_names_the_request() {
        let minimum = usize::MAX / 2 + 1;
        let err = crate::capacity::plan(minimum).unwrap_err();
        assert_eq!(
            err.message(),
            format!("minimum capacity {} exceeds the largest supported capacity", minimum)
        );
        assert!(crate::cache::LazyCache::try_with_capacity(|k: &u8| *k, minimum).is_err());
    }

    #[test]
    fn invariant_display_and_debug() {
        let err = InvariantError::new("index points at slot 7 past len 4");
        assert_eq!(err.to_string(), "index points at slot 7 past len 4");
        assert!(format!("{:?}", err).contains("slot 7"));
    }

    #[test]
    fn both_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ConfigError>();
        assert_error::<InvariantError>();
    }
}
