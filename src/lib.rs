//! lazycache: a bounded get-or-create cache with approximate frequency
//! ranking.
//!
//! Values are produced on demand by a [`factory::ValueFactory`], stored in a
//! fixed number of slots, and nudged toward the front of the slot array on
//! every hit. When all slots are taken, a new key overwrites the last slot.
//!
//! ```
//! use lazycache::prelude::*;
//!
//! let mut cache = LazyCacheBuilder::new()
//!     .minimum_capacity(16)
//!     .build(|word: &&str| word.len());
//!
//! assert_eq!(*cache.get(&"cache"), 5);
//! assert!(cache.contains(&"cache"));
//! assert_eq!(cache.len(), 1);
//! ```
//!
//! Module map:
//!
//! - [`cache`]: [`LazyCache`](cache::LazyCache) and its iterators
//! - [`capacity`]: the power-of-four capacity planner
//! - [`ds`]: the slot table backing every cache
//! - [`factory`]: value factory trait and closure adapters
//! - [`builder`]: [`LazyCacheBuilder`](builder::LazyCacheBuilder)
//! - `metrics` (feature `metrics`): counters, snapshots and Prometheus export

pub mod builder;
pub mod cache;
pub mod capacity;
pub mod ds;
pub mod error;
pub mod factory;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
