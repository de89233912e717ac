//! Fixed-capacity memoizing cache with approximate frequency ranking.
//!
//! `LazyCache` turns a key → value factory into a bounded memo table. Values
//! are computed on first request, kept in a fixed array of slots, and
//! reordered a little on every hit so that frequently requested keys drift
//! toward slot 0. When the cache is full, a new key overwrites the slot at the
//! cold end of the array.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                       LazyCache<K, V, F> Layout                             │
//! │                                                                             │
//! │   ┌─────────────────────────────────────────────────────────────────────┐   │
//! │   │  SlotTable: index FxHashMap<K, usize> + slots Vec<(K, V, hits)>     │   │
//! │   │                                                                     │   │
//! │   │        head (hot)                      tail (cold)                  │   │
//! │   │   ┌─────┬─────┬─────┬─────┐┌─────┬─────┬─────┬─── ... ───┬─────┐   │   │
//! │   │   │  0  │  1  │  2  │  3  ││  4  │  5  │  6  │           │ n-1 │   │   │
//! │   │   └─────┴─────┴─────┴─────┘└─────┴─────┴─────┴─── ... ───┴─────┘   │   │
//! │   │   ◄─── head_capacity ────►                                 victim  │   │
//! │   └─────────────────────────────────────────────────────────────────────┘   │
//! │                                                                             │
//! │   factory: F   (ValueFactory<K, V>, called once per miss)                   │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `capacity` is the smallest power of four covering the requested minimum and
//! `head_capacity` its square root (see [`capacity::plan`](crate::capacity::plan)).
//!
//! ## Algorithm
//!
//! ```text
//! GET(key):
//!   hit at slot i:
//!     hits = ++slot[i].hits
//!     in_head = i < head_capacity
//!     rival   = in_head ? i - 1 : head_capacity - 1
//!     if i > 0 and hits > slot[rival].hits:  swap(i, rival)     // promotion
//!     elif not in_head:                      swap(i, i - 1)     // bubble
//!     return value
//!
//!   miss:
//!     value = factory(key)            // on error: return it, touch nothing
//!     if len < capacity: slot = len   // fill
//!     else:              slot = capacity - 1, evict its key
//!     slot[slot] = (key, value, 0)
//!     return value
//! ```
//!
//! Promotion into the head must beat the weakest head entry, which keeps the
//! head stable against one-off hits. Inside the tail an entry still moves one
//! slot per hit, so a key that keeps getting hit escapes the victim slot even
//! before it can enter the head. Comparisons are strict: equal hit counts
//! never swap.
//!
//! ## Performance Characteristics
//!
//! | Operation  | Time | Notes                                   |
//! |------------|------|-----------------------------------------|
//! | `get` hit  | O(1) | Hash lookup + at most one slot swap     |
//! | `get` miss | O(1) | Factory call + push or in-place replace |
//! | `contains` | O(1) | Hash lookup only                        |
//! | `peek`     | O(1) | No hit counted, no reordering           |
//! | `iter`     | O(n) | Slot order, hottest first               |
//!
//! ## Example Usage
//!
//! ```
//! use lazycache::cache::LazyCache;
//!
//! let mut squares = LazyCache::with_capacity(|n: &u64| n * n, 4);
//! assert_eq!(squares.capacity(), 4);
//! assert_eq!(squares.head_capacity(), 2);
//!
//! assert_eq!(*squares.get(&3), 9);
//! assert!(squares.contains(&3));
//! assert_eq!(squares.len(), 1);
//! ```
//!
//! ## Thread Safety
//!
//! Not synchronized. Every lookup takes `&mut self`, so sharing a cache
//! between threads requires an external lock held across each call
//! (including the factory invocation on a miss).

use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

use crate::capacity::{self, CapacityPlan, DEFAULT_MINIMUM_CAPACITY};
use crate::ds::slot_table::{self, SlotTable};
use crate::error::ConfigError;
use crate::factory::{FromFn, ValueFactory, from_fn};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LazyCacheMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LazyCacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LazyCacheMetricsReadRecorder, LazyCacheMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
use crate::traits::{LoadingCache, ReadOnlyCache};

pub use crate::ds::slot_table::{IntoIter, Iter};

/// Bounded get-or-create cache with approximate frequency-ranked eviction.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Clone + Eq + Hash`
/// - `V`: Value type
/// - `F`: Value factory, see [`ValueFactory`]
///
/// # Example
///
/// ```
/// use lazycache::cache::LazyCache;
///
/// let mut lengths = LazyCache::new(|s: &String| s.len());
/// assert_eq!(lengths.capacity(), 64);
///
/// assert_eq!(*lengths.get(&"hello".to_string()), 5);
/// assert_eq!(lengths.hits(&"hello".to_string()), Some(0));
///
/// lengths.get(&"hello".to_string());
/// assert_eq!(lengths.hits(&"hello".to_string()), Some(1));
/// ```
pub struct LazyCache<K, V, F> {
    slots: SlotTable<K, V>,
    head_capacity: usize,
    factory: F,
    #[cfg(feature = "metrics")]
    metrics: LazyCacheMetrics,
}

impl<K, V, F> LazyCache<K, V, FromFn<F>>
where
    K: Clone + Eq + Hash,
    F: FnMut(&K) -> V,
{
    /// Creates a cache around an infallible closure with the default minimum
    /// capacity of 64 slots.
    #[inline]
    pub fn new(factory: F) -> Self {
        Self::with_capacity(factory, DEFAULT_MINIMUM_CAPACITY)
    }

    /// Creates a cache around an infallible closure, rounding
    /// `minimum_capacity` up per [`capacity::plan`].
    ///
    /// # Panics
    ///
    /// Panics if `minimum_capacity` is invalid. See
    /// [`try_with_capacity`](Self::try_with_capacity).
    pub fn with_capacity(factory: F, minimum_capacity: usize) -> Self {
        match Self::try_with_capacity(factory, minimum_capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache around an infallible closure, returning an error on
    /// invalid capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `minimum_capacity` is zero or its plan does
    /// not fit in `usize`.
    ///
    /// # Example
    ///
    /// ```
    /// use lazycache::cache::LazyCache;
    ///
    /// let cache = LazyCache::try_with_capacity(|k: &u32| *k, 100).unwrap();
    /// assert_eq!(cache.capacity(), 256);
    /// assert_eq!(cache.head_capacity(), 16);
    /// ```
    #[inline]
    pub fn try_with_capacity(factory: F, minimum_capacity: usize) -> Result<Self, ConfigError> {
        Self::with_factory(from_fn(factory), minimum_capacity)
    }
}

impl<K, V, F> LazyCache<K, V, F>
where
    K: Clone + Eq + Hash,
    F: ValueFactory<K, V>,
{
    /// Creates a cache around any [`ValueFactory`], including fallible ones.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `minimum_capacity` is zero or its plan does
    /// not fit in `usize`.
    pub fn with_factory(factory: F, minimum_capacity: usize) -> Result<Self, ConfigError> {
        let plan = match capacity::plan(minimum_capacity) {
            Ok(plan) => plan,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(minimum_capacity, error = %err, "rejected cache configuration");
                return Err(err);
            },
        };
        Ok(Self::from_plan(factory, plan))
    }

    fn from_plan(factory: F, plan: CapacityPlan) -> Self {
        Self {
            slots: SlotTable::with_capacity(plan.capacity),
            head_capacity: plan.head_capacity,
            factory,
            #[cfg(feature = "metrics")]
            metrics: LazyCacheMetrics::default(),
        }
    }

    /// Returns the value for `key`, computing it with the factory on a miss.
    ///
    /// A hit bumps the key's hit count and may move it one step toward the
    /// head. A miss calls the factory exactly once; if that call fails the
    /// error is returned and the cache is left exactly as it was.
    ///
    /// # Example
    ///
    /// ```
    /// use lazycache::cache::LazyCache;
    /// use lazycache::factory::try_from_fn;
    ///
    /// let mut parsed = LazyCache::with_factory(
    ///     try_from_fn(|s: &&str| s.parse::<i32>()),
    ///     4,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(parsed.try_get(&"42"), Ok(&42));
    /// assert!(parsed.try_get(&"forty-two").is_err());
    /// assert_eq!(parsed.len(), 1);
    /// ```
    pub fn try_get(&mut self, key: &K) -> Result<&V, F::Error> {
        let pos = match self.slots.position(key) {
            Some(pos) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();
                self.touch(pos)
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                self.load(key)?
            },
        };
        Ok(self.slots.value(pos).expect("slot table out of sync"))
    }

    /// Computes the value for a missing key and stores it, evicting if full.
    fn load(&mut self, key: &K) -> Result<usize, F::Error> {
        let value = match self.factory.create(key) {
            Ok(value) => value,
            Err(err) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_factory_failure();
                #[cfg(feature = "tracing")]
                tracing::debug!(len = self.slots.len(), "value factory failed; cache unchanged");
                return Err(err);
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if !self.slots.is_full() {
            return Ok(self.slots.push(key.clone(), value));
        }

        let victim = self.slots.capacity() - 1;
        let _evicted = self.slots.replace(victim, key.clone(), value);
        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
        #[cfg(feature = "tracing")]
        tracing::trace!(slot = victim, "evicted coldest entry");
        Ok(victim)
    }
}

impl<K, V, F> LazyCache<K, V, F>
where
    K: Clone + Eq + Hash,
    F: ValueFactory<K, V, Error = Infallible>,
{
    /// Returns the value for `key`, computing it on a miss.
    ///
    /// Available when the factory cannot fail.
    ///
    /// # Example
    ///
    /// ```
    /// use lazycache::cache::LazyCache;
    ///
    /// let mut cache = LazyCache::with_capacity(|k: &char| k.to_ascii_uppercase(), 4);
    /// assert_eq!(*cache.get(&'a'), 'A');
    /// assert_eq!(*cache.get(&'a'), 'A');
    /// assert_eq!(cache.len(), 1);
    /// ```
    #[inline]
    pub fn get(&mut self, key: &K) -> &V {
        match self.try_get(key) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}

impl<K, V, F> LazyCache<K, V, F>
where
    K: Clone + Eq + Hash,
{
    /// Number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if nothing is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` once every slot is occupied; further misses evict.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    /// Total number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of slots in the hot head.
    #[inline]
    pub fn head_capacity(&self) -> usize {
        self.head_capacity
    }

    /// Returns `true` if `key` is resident.
    ///
    /// Never invokes the factory and does not count as a hit.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_contains_call();
        self.slots.contains(key)
    }

    /// Returns the resident value for `key` without counting a hit or
    /// reordering.
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();
        let value = self.slots.value(self.slots.position(key)?)?;
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_found();
        Some(value)
    }

    /// Current hit count of a resident key.
    #[inline]
    pub fn hits(&self, key: &K) -> Option<u64> {
        self.slots.hits(self.slots.position(key)?)
    }

    /// Current slot of a resident key; lower is hotter.
    #[inline]
    pub fn rank(&self, key: &K) -> Option<usize> {
        self.slots.position(key)
    }

    /// Iterates resident `(key, value)` pairs in slot order, hottest first.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.slots.iter()
    }

    /// Iterates resident keys in slot order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.slots.iter(),
        }
    }

    /// Iterates resident values in slot order.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.slots.iter(),
        }
    }

    /// Drops every resident entry. Capacity and the factory are kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    /// Returns a reference to the value factory.
    #[inline]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Reordering step after a hit at `pos`; returns the key's new slot.
    fn touch(&mut self, pos: usize) -> usize {
        let hits = self.slots.record_hit(pos);
        if pos == 0 {
            return pos;
        }

        let in_head = pos < self.head_capacity;
        let rival = if in_head {
            pos - 1
        } else {
            self.head_capacity - 1
        };

        if hits > self.slots.hits(rival).expect("rival slot missing") {
            self.slots.swap(pos, rival);
            #[cfg(feature = "metrics")]
            self.metrics.record_head_promotion();
            rival
        } else if !in_head {
            self.slots.swap(pos, pos - 1);
            #[cfg(feature = "metrics")]
            self.metrics.record_tail_bubble();
            pos - 1
        } else {
            pos
        }
    }

    /// Validates internal invariants (debug-only).
    #[cfg(debug_assertions)]
    pub fn check_invariants(&self) -> Result<(), crate::error::InvariantError>
    where
        K: fmt::Debug,
    {
        use crate::error::InvariantError;

        let capacity = self.slots.capacity();
        if self.head_capacity == 0 || self.head_capacity > capacity {
            return Err(InvariantError::new(format!(
                "head capacity {} outside 1..={}",
                self.head_capacity, capacity
            )));
        }
        if self.head_capacity.checked_mul(self.head_capacity) != Some(capacity) {
            return Err(InvariantError::new(format!(
                "head capacity {} squared != capacity {}",
                self.head_capacity, capacity
            )));
        }
        self.slots.check_invariants()
    }
}

#[cfg(feature = "metrics")]
impl<K, V, F> LazyCache<K, V, F>
where
    K: Clone + Eq + Hash,
{
    /// Captures the current counters together with size gauges.
    pub fn metrics_snapshot(&self) -> LazyCacheMetricsSnapshot {
        LazyCacheMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_new: self.metrics.insert_new,
            evicted_entries: self.metrics.evicted_entries,
            factory_failures: self.metrics.factory_failures,
            head_promotions: self.metrics.head_promotions,
            tail_bubbles: self.metrics.tail_bubbles,
            clears: self.metrics.clears,
            contains_calls: self.metrics.contains_calls.get(),
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            cache_len: self.slots.len(),
            capacity: self.slots.capacity(),
            head_capacity: self.head_capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V, F> MetricsSnapshotProvider<LazyCacheMetricsSnapshot> for LazyCache<K, V, F>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> LazyCacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V, F> MetricsReset for LazyCache<K, V, F> {
    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

impl<K, V, F> ReadOnlyCache<K> for LazyCache<K, V, F>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn contains(&self, key: &K) -> bool {
        LazyCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LazyCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        LazyCache::capacity(self)
    }
}

impl<K, V, F> LoadingCache<K, V> for LazyCache<K, V, F>
where
    K: Clone + Eq + Hash,
    F: ValueFactory<K, V>,
{
    type Error = F::Error;

    #[inline]
    fn try_get(&mut self, key: &K) -> Result<&V, F::Error> {
        LazyCache::try_get(self, key)
    }

    #[inline]
    fn peek(&self, key: &K) -> Option<&V> {
        LazyCache::peek(self, key)
    }
}

impl<K, V, F> fmt::Debug for LazyCache<K, V, F>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyCache")
            .field("capacity", &self.slots.capacity())
            .field("head_capacity", &self.head_capacity)
            .field("len", &self.slots.len())
            .finish_non_exhaustive()
    }
}

impl<'a, K, V, F> IntoIterator for &'a LazyCache<K, V, F>
where
    K: Clone + Eq + Hash,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, F> IntoIterator for LazyCache<K, V, F> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}

/// Iterator over resident keys in slot order.
pub struct Keys<'a, K, V> {
    inner: slot_table::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over resident values in slot order.
pub struct Values<'a, K, V> {
    inner: slot_table::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}
