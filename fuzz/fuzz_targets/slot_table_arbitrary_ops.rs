#![no_main]

use libfuzzer_sys::fuzz_target;
use lazycache::ds::SlotTable;

// Fuzz arbitrary operation sequences on SlotTable
//
// Tests random sequences of push, replace, swap, record_hit and clear while
// checking that the index always mirrors the slot array.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };

    let capacity = usize::from(cap % 32) + 1;
    let mut table: SlotTable<u8, u16> = SlotTable::with_capacity(capacity);

    for chunk in ops.chunks_exact(3) {
        let op = chunk[0] % 5;
        let a = chunk[1];
        let b = chunk[2];

        match op {
            0 => {
                // push
                if !table.is_full() && !table.contains(&a) {
                    let pos = table.push(a, u16::from(b));
                    assert_eq!(table.position(&a), Some(pos));
                    assert_eq!(table.hits(pos), Some(0));
                }
            },
            1 => {
                // replace
                if !table.is_empty() && !table.contains(&a) {
                    let pos = usize::from(b) % table.len();
                    let old_key = *table.key(pos).unwrap();
                    let old_len = table.len();
                    let (evicted, _) = table.replace(pos, a, u16::from(b));

                    assert_eq!(evicted, old_key);
                    assert!(!table.contains(&old_key));
                    assert_eq!(table.position(&a), Some(pos));
                    assert_eq!(table.len(), old_len);
                }
            },
            2 => {
                // swap
                if !table.is_empty() {
                    let len = table.len();
                    let (i, j) = (usize::from(a) % len, usize::from(b) % len);
                    let (ki, kj) = (*table.key(i).unwrap(), *table.key(j).unwrap());
                    table.swap(i, j);
                    assert_eq!(table.position(&ki), Some(j));
                    assert_eq!(table.position(&kj), Some(i));
                }
            },
            3 => {
                // record_hit
                if !table.is_empty() {
                    let pos = usize::from(a) % table.len();
                    let before = table.hits(pos).unwrap();
                    assert_eq!(table.record_hit(pos), before + 1);
                }
            },
            4 => {
                if a == 0 {
                    table.clear();
                    assert!(table.is_empty());
                }
            },
            _ => unreachable!(),
        }

        assert!(table.len() <= capacity);
        assert_eq!(table.iter().count(), table.len());
        #[cfg(debug_assertions)]
        assert!(table.check_invariants().is_ok());
    }
});
