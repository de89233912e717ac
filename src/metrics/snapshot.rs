#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LazyCacheMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_new: u64,
    pub evicted_entries: u64,
    pub factory_failures: u64, // misses whose factory call returned an error

    pub head_promotions: u64, // admission-test wins (swap with rival)
    pub tail_bubbles: u64,    // single-step moves outside the head

    pub clears: u64,
    pub contains_calls: u64,
    pub peek_calls: u64,
    pub peek_found: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
    pub head_capacity: usize,
}

impl LazyCacheMetricsSnapshot {
    /// Fraction of `get` calls served without invoking the factory.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

impl std::fmt::Display for LazyCacheMetricsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LazyCacheMetrics {{ hits: {}, misses: {}, hit_rate: {:.2}%, evictions: {}, \
             factory_failures: {}, head_promotions: {}, tail_bubbles: {}, len: {}/{} }}",
            self.get_hits,
            self.get_misses,
            self.hit_rate() * 100.0,
            self.evicted_entries,
            self.factory_failures,
            self.head_promotions,
            self.tail_bubbles,
            self.cache_len,
            self.capacity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_handles_zero_calls() {
        let snap = LazyCacheMetricsSnapshot::default();
        assert_eq!(snap.hit_rate(), 0.0);
    }

    #[test]
    fn display_reports_hit_rate() {
        let snap = LazyCacheMetricsSnapshot {
            get_calls: 4,
            get_hits: 3,
            get_misses: 1,
            cache_len: 1,
            capacity: 4,
            ..Default::default()
        };
        let text = snap.to_string();
        assert!(text.contains("hit_rate: 75.00%"));
        assert!(text.contains("len: 1/4"));
    }
}
