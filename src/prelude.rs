pub use crate::builder::LazyCacheBuilder;
pub use crate::cache::LazyCache;
pub use crate::capacity::{CapacityPlan, DEFAULT_MINIMUM_CAPACITY};
pub use crate::error::ConfigError;
pub use crate::factory::{FromFn, TryFromFn, ValueFactory, from_fn, try_from_fn};
pub use crate::traits::{LoadingCache, ReadOnlyCache};

#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LazyCacheMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsReset, MetricsSnapshotProvider};
