use lazycache::cache::LazyCache;

fn main() {
    let mut cache = LazyCache::with_capacity(
        |name: &&str| {
            println!("computing {}", name);
            name.to_uppercase()
        },
        4,
    );

    for name in ["a", "b", "c", "d"] {
        cache.get(&name);
    }
    cache.get(&"a");
    cache.get(&"e");

    println!("contains a? {}", cache.contains(&"a"));
    println!("contains d? {}", cache.contains(&"d"));
    println!("order: {:?}", cache.keys().collect::<Vec<_>>());
}

// Expected output:
// computing a
// computing b
// computing c
// computing d
// computing e
// contains a? true
// contains d? false
// order: ["a", "b", "c", "e"]
//
// Explanation: capacity=4; the second "a" is a hit and runs no factory call.
// "e" arrives with every slot taken, so it overwrites the last slot ("d").
