use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{
    CoreMetricsRecorder, LazyCacheMetricsReadRecorder, LazyCacheMetricsRecorder,
};

#[derive(Debug, Default)]
pub struct LazyCacheMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub factory_failures: u64,
    pub head_promotions: u64,
    pub tail_bubbles: u64,
    pub clears: u64,
    pub contains_calls: MetricsCell,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
}

impl LazyCacheMetrics {
    pub fn new() -> LazyCacheMetrics {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl CoreMetricsRecorder for LazyCacheMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl LazyCacheMetricsRecorder for LazyCacheMetrics {
    fn record_factory_failure(&mut self) {
        self.factory_failures += 1;
    }

    fn record_head_promotion(&mut self) {
        self.head_promotions += 1;
    }

    fn record_tail_bubble(&mut self) {
        self.tail_bubbles += 1;
    }
}

impl LazyCacheMetricsReadRecorder for &LazyCacheMetrics {
    fn record_contains_call(&self) {
        self.contains_calls.incr();
    }

    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_peek_found(&self) {
        self.peek_found.incr();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_and_miss_both_count_as_get_calls() {
        let mut m = LazyCacheMetrics::new();
        m.record_get_hit();
        m.record_get_miss();
        m.record_get_miss();
        assert_eq!(m.get_calls, 3);
        assert_eq!(m.get_hits, 1);
        assert_eq!(m.get_misses, 2);
    }

    #[test]
    fn read_recorder_works_through_shared_ref() {
        let m = LazyCacheMetrics::new();
        (&m).record_contains_call();
        (&m).record_peek_call();
        assert_eq!(m.contains_calls.get(), 1);
        assert_eq!(m.peek_calls.get(), 1);
        assert_eq!(m.peek_found.get(), 0);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut m = LazyCacheMetrics::new();
        m.record_head_promotion();
        m.record_factory_failure();
        (&m).record_contains_call();
        m.reset();
        assert_eq!(m.head_promotions, 0);
        assert_eq!(m.factory_failures, 0);
        assert_eq!(m.contains_calls.get(), 0);
    }
}
