//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check key independence and expiry over arbitrary inputs.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{ManualClock, ResponseCache, CACHE_TTL};

// == Strategies ==
/// Generates resource keys in the shape the service uses
fn resource_key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("applications".to_string()),
        "metrics-[a-z0-9]{1,4}".prop_map(|s| s),
    ]
}

#[derive(Debug, Clone)]
enum CacheOp {
    Insert { key: String, value: u32 },
    Remove { key: String },
    Advance { secs: u64 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (resource_key_strategy(), any::<u32>()).prop_map(|(key, value)| CacheOp::Insert { key, value }),
        resource_key_strategy().prop_map(|key| CacheOp::Remove { key }),
        (0u64..120).prop_map(|secs| CacheOp::Advance { secs }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Removing one key never disturbs any other fresh key.
    #[test]
    fn prop_remove_is_key_local(
        keys in prop::collection::hash_set(resource_key_strategy(), 1..10),
        victim_index in any::<prop::sample::Index>(),
    ) {
        let clock = ManualClock::new(0);
        let mut store = ResponseCache::with_clock(Arc::new(clock));
        let keys: Vec<String> = keys.into_iter().collect();

        for (i, key) in keys.iter().enumerate() {
            store.insert(key.clone(), i);
        }

        let victim = victim_index.get(&keys).clone();
        prop_assert!(store.remove(&victim));

        for (i, key) in keys.iter().enumerate() {
            if *key == victim {
                prop_assert!(store.get(key).is_none());
            } else {
                prop_assert_eq!(store.get(key), Some(i));
            }
        }
    }

    // A lookup hits iff the key's latest insert is younger than the TTL and
    // it has not been removed since.
    #[test]
    fn prop_matches_reference_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let clock = ManualClock::new(0);
        let mut store = ResponseCache::with_clock(Arc::new(clock.clone()));
        let mut model: std::collections::HashMap<String, (u32, u64)> = Default::default();
        let mut now = 0u64;

        for op in ops {
            match op {
                CacheOp::Insert { key, value } => {
                    store.insert(key.clone(), value);
                    model.insert(key, (value, now));
                }
                CacheOp::Remove { key } => {
                    store.remove(&key);
                    model.remove(&key);
                }
                CacheOp::Advance { secs } => {
                    clock.advance(Duration::from_secs(secs));
                    now += secs * 1000;
                }
            }
        }

        let keys: HashSet<String> = model.keys().cloned().collect();
        for key in keys {
            let (value, inserted_at) = model[&key];
            let expected = (now - inserted_at < CACHE_TTL.as_millis() as u64).then_some(value);
            prop_assert_eq!(store.get(&key), expected, "key {}", key);
        }
    }

    // Hits and misses add up to the number of lookups.
    #[test]
    fn prop_statistics_accuracy(lookups in prop::collection::vec(resource_key_strategy(), 1..40)) {
        let mut store = ResponseCache::with_clock(Arc::new(ManualClock::new(0)));
        store.insert("applications", 1u8);

        let mut expected_hits = 0u64;
        for key in &lookups {
            if store.get(key).is_some() {
                expected_hits += 1;
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.hits + stats.misses, lookups.len() as u64);
    }
}
