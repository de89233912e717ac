//! Capacity planning for the two-region slot layout.
//!
//! A [`LazyCache`](crate::cache::LazyCache) splits its slots into a hot head of
//! `head_capacity` slots followed by a cold tail. The head is sized as the
//! square root of the total so that entering it is a real admission test
//! (beat the weakest head entry) while movement inside the tail stays a single
//! step per hit.
//!
//! ```text
//!   requested minimum m ──► capacity = smallest 4^k ≥ m
//!                           head_capacity = 2^k
//!
//!   plan(1)   = (1, 1)
//!   plan(64)  = (64, 8)
//!   plan(100) = (256, 16)
//! ```

use crate::error::ConfigError;

/// Minimum capacity used when the caller does not request one.
pub const DEFAULT_MINIMUM_CAPACITY: usize = 64;

/// Realized slot layout for a requested minimum capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapacityPlan {
    /// Total number of slots.
    pub capacity: usize,
    /// Number of slots in the hot head; `head_capacity * head_capacity == capacity`.
    pub head_capacity: usize,
}

impl CapacityPlan {
    /// Number of slots in the cold tail.
    #[inline]
    pub fn tail_capacity(&self) -> usize {
        self.capacity - self.head_capacity
    }
}

/// Computes the smallest perfect-square power-of-four capacity covering `minimum`.
///
/// # Errors
///
/// Returns [`ConfigError`] if `minimum` is zero or if the plan would not fit in
/// `usize`.
///
/// # Example
///
/// ```
/// use lazycache::capacity::plan;
///
/// let p = plan(100).unwrap();
/// assert_eq!((p.capacity, p.head_capacity), (256, 16));
/// ```
pub fn plan(minimum: usize) -> Result<CapacityPlan, ConfigError> {
    if minimum == 0 {
        return Err(ConfigError::new("minimum capacity must be greater than zero"));
    }

    let overflow = || {
        ConfigError::new(format!(
            "minimum capacity {} exceeds the largest supported capacity",
            minimum
        ))
    };

    let mut head_capacity: usize = 1;
    loop {
        let capacity = head_capacity.checked_mul(head_capacity).ok_or_else(overflow)?;
        if capacity >= minimum {
            return Ok(CapacityPlan {
                capacity,
                head_capacity,
            });
        }
        head_capacity = head_capacity.checked_mul(2).ok_or_else(overflow)?;
    }
}
