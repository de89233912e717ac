//! Operation counters for [`LazyCache`](crate::cache::LazyCache) (`metrics` feature).
//!
//! Recording, snapshotting and export are split the same way as the cache
//! traits: the cache writes through [`traits::LazyCacheMetricsRecorder`],
//! tests and benches read a [`snapshot::LazyCacheMetricsSnapshot`], and
//! production code publishes snapshots through an
//! [`exporter::PrometheusTextExporter`].

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
