// ==============================================
// GET-OR-CREATE SCENARIOS (integration)
// ==============================================
//
// End-to-end behavior of LazyCache through the public API only: the
// memoization contract, frequency convergence, eviction, and factory
// failure isolation.

use std::cell::RefCell;
use std::rc::Rc;

use lazycache::builder::LazyCacheBuilder;
use lazycache::cache::LazyCache;
use lazycache::capacity;
use lazycache::factory::try_from_fn;
use rustc_hash::FxHashMap;

type Calls = Rc<RefCell<FxHashMap<&'static str, usize>>>;

fn recording_factory(calls: &Calls) -> impl FnMut(&&'static str) -> String + use<> {
    let calls = Rc::clone(calls);
    move |key: &&'static str| {
        *calls.borrow_mut().entry(*key).or_default() += 1;
        key.to_uppercase()
    }
}

fn call_count(calls: &Calls, key: &'static str) -> usize {
    calls.borrow().get(key).copied().unwrap_or(0)
}

// ==============================================
// Memoization contract
// ==============================================

mod memoization {
    use super::*;

    #[test]
    fn second_get_returns_identical_value_without_factory_call() {
        let calls = Calls::default();
        let mut cache = LazyCache::with_capacity(recording_factory(&calls), 16);

        let first = cache.get(&"alpha").clone();
        let second = cache.get(&"alpha").clone();

        assert_eq!(first, "ALPHA");
        assert_eq!(first, second);
        assert_eq!(call_count(&calls, "alpha"), 1);
        assert!(cache.contains(&"alpha"));
    }

    #[test]
    fn distinct_keys_each_cost_one_call() {
        let calls = Calls::default();
        let mut cache = LazyCache::with_capacity(recording_factory(&calls), 16);
        for key in ["a", "b", "c", "a", "b", "a"] {
            cache.get(&key);
        }
        assert_eq!(call_count(&calls, "a"), 1);
        assert_eq!(call_count(&calls, "b"), 1);
        assert_eq!(call_count(&calls, "c"), 1);
        assert_eq!(cache.len(), 3);
    }
}

// ==============================================
// Frequency ranking
// ==============================================

mod frequency {
    use super::*;

    #[test]
    fn most_hit_key_converges_to_slot_zero() {
        let calls = Calls::default();
        let mut cache = LazyCache::with_capacity(recording_factory(&calls), 4);
        assert_eq!((cache.capacity(), cache.head_capacity()), (4, 2));

        for key in ["A", "B", "C", "D"] {
            cache.get(&key);
        }
        for _ in 0..3 {
            cache.get(&"A");
        }
        cache.get(&"B");

        assert_eq!(cache.keys().next(), Some(&"A"));
        cache.get(&"A");
        assert_eq!(call_count(&calls, "A"), 1);
    }

    #[test]
    fn iteration_reflects_ranking_not_insertion() {
        let mut cache = LazyCache::with_capacity(|k: &u32| k * 100, 16);
        for k in 0..8 {
            cache.get(&k);
        }
        for _ in 0..4 {
            cache.get(&7);
        }

        let order: Vec<u32> = cache.keys().copied().collect();
        assert_eq!(order[0], 7);
        assert_eq!(order.len(), 8);
        let values: Vec<u32> = cache.values().copied().collect();
        assert_eq!(values[0], 700);
    }
}

// ==============================================
// Eviction
// ==============================================

mod eviction {
    use super::*;

    #[test]
    fn full_cache_evicts_exactly_one_key_per_new_key() {
        let calls = Calls::default();
        let mut cache = LazyCache::with_capacity(recording_factory(&calls), 4);
        let resident = ["A", "B", "C", "D"];
        for key in resident {
            cache.get(&key);
        }
        assert!(cache.is_full());

        cache.get(&"E");

        let survivors = resident.iter().filter(|k| cache.contains(k)).count();
        assert_eq!(survivors, resident.len() - 1);
        assert_eq!(cache.len(), cache.capacity());
        assert!(cache.contains(&"E"));

        cache.get(&"E");
        assert_eq!(call_count(&calls, "E"), 1);
    }

    #[test]
    fn len_never_exceeds_capacity_under_scan() {
        let mut cache = LazyCacheBuilder::new()
            .minimum_capacity(10)
            .build(|k: &u64| k.wrapping_mul(31));
        assert_eq!(cache.capacity(), 16);

        for k in 0..10_000u64 {
            cache.get(&k);
            assert!(cache.len() <= cache.capacity());
        }
        assert_eq!(cache.len(), 16);
        #[cfg(debug_assertions)]
        cache.check_invariants().unwrap();
    }

    #[test]
    fn frequently_hit_key_survives_a_scan() {
        let mut cache = LazyCache::with_capacity(|k: &u64| *k, 64);
        for k in 0..64u64 {
            cache.get(&k);
        }
        for round in 0..1_000u64 {
            cache.get(&5);
            cache.get(&(10_000 + round));
        }
        assert!(cache.contains(&5));
        assert_eq!(cache.rank(&5), Some(0));
    }
}

// ==============================================
// Factory failure isolation
// ==============================================

mod factory_failure {
    use super::*;

    fn snapshot<F>(cache: &LazyCache<u32, String, F>) -> Vec<(u32, String, Option<u64>)> {
        cache
            .iter()
            .map(|(k, v)| (*k, v.clone(), cache.hits(k)))
            .collect()
    }

    #[test]
    fn failed_miss_leaves_cache_untouched_and_usable() {
        let mut cache = LazyCache::with_factory(
            try_from_fn(|k: &u32| {
                if *k >= 1_000 {
                    Err(std::io::Error::other(format!("no value for {}", k)))
                } else {
                    Ok(format!("v{}", k))
                }
            }),
            4,
        )
        .unwrap();

        for k in [1, 2, 3, 4, 2, 4, 4] {
            cache.try_get(&k).unwrap();
        }
        let before = snapshot(&cache);

        let err = cache.try_get(&5_000).unwrap_err();
        assert_eq!(err.to_string(), "no value for 5000");
        assert_eq!(snapshot(&cache), before);
        assert!(!cache.contains(&5_000));

        assert_eq!(cache.try_get(&9).map(String::as_str).ok(), Some("v9"));
        assert_eq!(cache.len(), 4);
        #[cfg(debug_assertions)]
        cache.check_invariants().unwrap();
    }
}

// ==============================================
// Capacity law
// ==============================================

#[test]
fn realized_capacity_obeys_square_law() {
    for minimum in [1usize, 2, 3, 4, 5, 15, 16, 17, 63, 64, 65, 100, 255, 256, 257, 5_000] {
        let cache = LazyCache::with_capacity(|k: &u8| *k, minimum);
        let plan = capacity::plan(minimum).unwrap();
        assert_eq!(cache.capacity(), plan.capacity);
        assert_eq!(cache.head_capacity() * cache.head_capacity(), cache.capacity());
        assert!(cache.capacity() >= minimum);
    }
}
