use std::cell::Cell;

/// Counter that can be bumped through a shared reference.
///
/// Used for the read-only paths of the cache (`contains` and `peek`),
/// which only borrow the cache immutably. `Cell` keeps the owning cache
/// `!Sync`, matching its single-writer contract.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get().saturating_add(1));
    }

    #[inline]
    pub fn reset(&self) {
        self.0.set(0);
    }
}
