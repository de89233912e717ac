//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are separate responsibilities, each
//! behind a small trait, so the cache's hot path only ever depends on the
//! recorder side.
//!
//! ```text
//!                ┌─────────────────────────────┐
//!                │     CoreMetricsRecorder     │
//!                │  get_hit / get_miss         │
//!                │  insert_new / evicted_entry │
//!                │  clear                      │
//!                └──────────────┬──────────────┘
//!                               │
//!                               ▼
//!                ┌─────────────────────────────┐      ┌──────────────────────────────┐
//!                │  LazyCacheMetricsRecorder   │      │ LazyCacheMetricsReadRecorder │
//!                │  factory_failure            │      │ (&self: contains/peek/hits)  │
//!                │  head_promotion             │      └──────────────────────────────┘
//!                │  tail_bubble                │
//!                └─────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters shared by any get-or-create cache.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_new(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Counters specific to the frequency-ranked slot layout.
pub trait LazyCacheMetricsRecorder: CoreMetricsRecorder {
    /// A miss whose factory call failed; the cache was left untouched.
    fn record_factory_failure(&mut self);
    /// A hit that won the admission test and swapped with its rival.
    fn record_head_promotion(&mut self);
    /// A hit outside the head that lost the admission test and moved one slot.
    fn record_tail_bubble(&mut self);
}

/// Read-path counters for `&self` methods (interior mutability).
pub trait LazyCacheMetricsReadRecorder {
    fn record_contains_call(&self);
    fn record_peek_call(&self);
    fn record_peek_found(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
