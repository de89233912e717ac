#![no_main]

use libfuzzer_sys::fuzz_target;
use lazycache::cache::LazyCache;
use lazycache::factory::try_from_fn;

// Fuzz arbitrary operation sequences on LazyCache
//
// The first byte picks the minimum capacity. Remaining bytes are (op, key)
// pairs over get, failing get, contains, peek, iteration and clear. Keys
// >= 240 make the factory fail.
fuzz_target!(|data: &[u8]| {
    let Some((&min, ops)) = data.split_first() else {
        return;
    };

    let minimum = usize::from(min % 64) + 1;
    let mut cache = match LazyCache::with_factory(
        try_from_fn(|k: &u8| if *k >= 240 { Err(*k) } else { Ok(u32::from(*k) * 3) }),
        minimum,
    ) {
        Ok(cache) => cache,
        Err(_) => return,
    };
    let capacity = cache.capacity();
    assert!(capacity >= minimum);
    assert_eq!(cache.head_capacity() * cache.head_capacity(), capacity);

    for pair in ops.chunks_exact(2) {
        let op = pair[0] % 6;
        let key = pair[1];

        match op {
            0 | 1 => {
                // get or create
                let before: Vec<(u8, u32)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
                let was_resident = cache.contains(&key);
                let old_len = cache.len();

                match cache.try_get(&key) {
                    Ok(value) => {
                        assert_eq!(*value, u32::from(key) * 3);
                        assert!(cache.contains(&key));
                        if was_resident {
                            assert_eq!(cache.len(), old_len);
                        } else if old_len < capacity {
                            assert_eq!(cache.len(), old_len + 1);
                        } else {
                            assert_eq!(cache.len(), capacity);
                            assert_eq!(cache.rank(&key), Some(capacity - 1));
                        }
                    },
                    Err(failed) => {
                        // failure leaves every slot untouched
                        assert_eq!(failed, key);
                        let after: Vec<(u8, u32)> =
                            cache.iter().map(|(k, v)| (*k, *v)).collect();
                        assert_eq!(before, after);
                    },
                }
            },
            2 => {
                // contains agrees with peek
                assert_eq!(cache.contains(&key), cache.peek(&key).is_some());
            },
            3 => {
                // peek does not reorder
                let rank = cache.rank(&key);
                let hits = cache.hits(&key);
                let _ = cache.peek(&key);
                assert_eq!(cache.rank(&key), rank);
                assert_eq!(cache.hits(&key), hits);
            },
            4 => {
                // iteration covers exactly the resident keys
                assert_eq!(cache.iter().count(), cache.len());
                for (pos, k) in cache.keys().enumerate() {
                    assert_eq!(cache.rank(k), Some(pos));
                }
            },
            5 => {
                if key == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                    assert_eq!(cache.capacity(), capacity);
                }
            },
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        #[cfg(debug_assertions)]
        assert!(cache.check_invariants().is_ok());
    }
});
