//! Fixed-capacity slot array with a mirrored key index.
//!
//! `SlotTable` owns both halves of the cache's storage: the positional slot
//! array (key, value, hit counter) and the key → position index. Every
//! mutation touches both together, so callers can only observe a table where
//! `index[slots[i].key] == i` for every occupied slot `i`.
//!
//! ```text
//!   index: FxHashMap<K, usize>
//!     "a" ─► 0   "c" ─► 1   "b" ─► 2
//!
//!   slots: Vec<Slot<K, V>>        (dense prefix, len ≤ capacity)
//!     [0]        [1]        [2]        [3]
//!   ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐
//!   │ a  h=5 │ │ c  h=2 │ │ b  h=0 │ │  free  │
//!   └────────┘ └────────┘ └────────┘ └────────┘
//! ```
//!
//! Occupied slots are always the prefix `0..len`: new keys are pushed at `len`
//! until the table is full, after which a caller-chosen slot is overwritten in
//! place with [`SlotTable::replace`].

use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

use rustc_hash::FxHashMap;

#[derive(Clone)]
struct Slot<K, V> {
    key: K,
    value: V,
    hits: u64,
}

/// Positional slot storage plus key index, kept consistent as one unit.
#[derive(Clone)]
pub struct SlotTable<K, V> {
    slots: Vec<Slot<K, V>>,
    index: FxHashMap<K, usize>,
    capacity: usize,
}

impl<K, V> SlotTable<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty table with room for `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
        }
    }

    /// Number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the slot currently holding `key`.
    #[inline]
    pub fn position(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    pub fn key(&self, pos: usize) -> Option<&K> {
        self.slots.get(pos).map(|slot| &slot.key)
    }

    #[inline]
    pub fn value(&self, pos: usize) -> Option<&V> {
        self.slots.get(pos).map(|slot| &slot.value)
    }

    #[inline]
    pub fn hits(&self, pos: usize) -> Option<u64> {
        self.slots.get(pos).map(|slot| slot.hits)
    }

    /// Bumps the hit counter of an occupied slot and returns the new count.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not an occupied slot.
    #[inline]
    pub fn record_hit(&mut self, pos: usize) -> u64 {
        let slot = &mut self.slots[pos];
        slot.hits = slot.hits.saturating_add(1);
        slot.hits
    }

    /// Exchanges the contents of two occupied slots and repoints both index entries.
    ///
    /// # Panics
    ///
    /// Panics if either position is not an occupied slot.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.slots.swap(a, b);
        if let Some(pos) = self.index.get_mut(&self.slots[a].key) {
            *pos = a;
        }
        if let Some(pos) = self.index.get_mut(&self.slots[b].key) {
            *pos = b;
        }
    }

    /// Fills the next free slot and returns its position.
    ///
    /// The caller must ensure the table is not full and `key` is not resident.
    pub fn push(&mut self, key: K, value: V) -> usize {
        debug_assert!(!self.is_full(), "push into a full slot table");
        debug_assert!(!self.contains(&key), "push of a resident key");

        let pos = self.slots.len();
        self.index.insert(key.clone(), pos);
        self.slots.push(Slot {
            key,
            value,
            hits: 0,
        });
        pos
    }

    /// Overwrites an occupied slot with a fresh entry, returning the evicted pair.
    ///
    /// The new entry starts with a hit count of zero. The caller must ensure
    /// `key` is not resident.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not an occupied slot.
    pub fn replace(&mut self, pos: usize, key: K, value: V) -> (K, V) {
        debug_assert!(!self.contains(&key), "replace with a resident key");

        let fresh = Slot {
            key: key.clone(),
            value,
            hits: 0,
        };
        let old = std::mem::replace(&mut self.slots[pos], fresh);
        self.index.remove(&old.key);
        self.index.insert(key, pos);
        (old.key, old.value)
    }

    /// Drops every resident entry; capacity is unchanged.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }

    /// Iterates resident entries in slot order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.slots.iter(),
        }
    }

    /// Validates the slot/index mirror (debug-only).
    #[cfg(debug_assertions)]
    pub fn check_invariants(&self) -> Result<(), crate::error::InvariantError>
    where
        K: fmt::Debug,
    {
        use crate::error::InvariantError;

        if self.slots.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "occupied slots {} > capacity {}",
                self.slots.len(),
                self.capacity
            )));
        }
        if self.index.len() != self.slots.len() {
            return Err(InvariantError::new(format!(
                "index size {} != occupied slots {}",
                self.index.len(),
                self.slots.len()
            )));
        }
        for (pos, slot) in self.slots.iter().enumerate() {
            match self.index.get(&slot.key) {
                Some(&indexed) if indexed == pos => {},
                Some(&indexed) => {
                    return Err(InvariantError::new(format!(
                        "key {:?} lives in slot {} but index points at {}",
                        slot.key, pos, indexed
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "key {:?} in slot {} is missing from the index",
                        slot.key, pos
                    )));
                },
            }
        }
        Ok(())
    }
}

impl<K, V> IntoIterator for SlotTable<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.slots.into_iter(),
        }
    }
}

impl<K, V> fmt::Debug for SlotTable<K, V>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotTable")
            .field("capacity", &self.capacity)
            .field("len", &self.slots.len())
            .field(
                "slots",
                &self
                    .slots
                    .iter()
                    .map(|slot| (&slot.key, slot.hits))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Borrowing iterator over resident `(key, value)` pairs in slot order.
pub struct Iter<'a, K, V> {
    inner: std::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|slot| (&slot.key, &slot.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|slot| (&slot.key, &slot.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Owning iterator over resident `(key, value)` pairs in slot order.
pub struct IntoIter<K, V> {
    inner: std::vec::IntoIter<Slot<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|slot| (slot.key, slot.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|slot| (slot.key, slot.value))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}
