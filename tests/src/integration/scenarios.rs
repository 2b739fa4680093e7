//! # Filter Scenarios
//!
//! Whole-filter behaviour checked from the public API only:
//!
//! 1. **80% load**: 204 integer keys into a 256-key filter, then query the
//!    whole key range. Every inserted key must be found.
//! 2. **Past capacity**: keep inserting until `Full`, then verify that no
//!    accepted key went missing and the filter still behaves.
//! 3. **Determinism**: same seed and sequence, same image.

#[cfg(test)]
mod tests {
    use cuckoo_filter::{CuckooError, CuckooFilter};

    use crate::int_key;
    use crate::logging::init_test_tracing;

    // =============================================================================
    // 80% LOAD
    // =============================================================================

    #[test]
    fn test_eighty_percent_load_has_no_false_negatives() {
        init_test_tracing();
        let mut filter = CuckooFilter::create(256, 500, 0).unwrap();

        for i in 0..204u32 {
            filter
                .insert(&int_key(i))
                .unwrap_or_else(|e| panic!("insert {} failed: {}", i, e));
        }
        assert!(!filter.has_victim());
        assert_eq!(filter.occupied_nests(), 204);

        let mut false_negatives = 0;
        let mut false_positives = 0;
        for i in 0..256u32 {
            let found = filter.contains(&int_key(i));
            match (i < 204, found) {
                (true, false) => false_negatives += 1,
                (false, true) => false_positives += 1,
                _ => {}
            }
        }

        assert_eq!(false_negatives, 0);
        // 52 absent keys; a tenth of them colliding would already be suspicious.
        assert!(
            false_positives < 26,
            "too many false positives: {}",
            false_positives
        );
    }

    #[test]
    fn test_remove_all_returns_to_empty() {
        init_test_tracing();
        let mut filter = CuckooFilter::create(256, 500, 0).unwrap();

        for i in 0..204u32 {
            filter.insert(&int_key(i)).unwrap();
        }
        for i in 0..204u32 {
            filter
                .remove(&int_key(i))
                .unwrap_or_else(|e| panic!("remove {} failed: {}", i, e));
        }

        assert!(filter.is_empty());
        assert_eq!(filter.load_factor(), 0.0);
    }

    // =============================================================================
    // PAST CAPACITY
    // =============================================================================

    #[test]
    fn test_fill_until_full_keeps_accepted_keys() {
        init_test_tracing();
        let mut filter = CuckooFilter::create(64, 100, 3).unwrap();
        let nests = filter.bucket_count() as u32 * filter.nests_per_bucket();

        let mut accepted = Vec::new();
        let mut full_at = None;
        for i in 0..nests * 2 {
            match filter.insert(&int_key(i)) {
                Ok(()) => accepted.push(i),
                Err(CuckooError::Full { attempts }) => {
                    assert_eq!(attempts, 100);
                    full_at = Some(i);
                    break;
                }
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        let full_at = full_at.expect("filter never reported Full");
        assert!(filter.has_victim());
        for i in &accepted {
            assert!(filter.contains(&int_key(*i)), "lost key {}", i);
        }
        // The key whose insert reported Full is still resident somewhere.
        assert!(filter.contains(&int_key(full_at)));

        // With the victim parked, keys either land in a free nest or are
        // refused without an eviction walk.
        let mut late = Vec::new();
        for i in 1_000_000..1_000_200u32 {
            match filter.insert(&int_key(i)) {
                Ok(()) => late.push(i),
                Err(CuckooError::Full { attempts }) => assert_eq!(attempts, 0),
                Err(e) => panic!("unexpected error: {}", e),
            }
        }
        assert!(filter.has_victim());
        for i in accepted.iter().chain(&late) {
            assert!(filter.contains(&int_key(*i)), "lost key {}", i);
        }
    }

    #[test]
    fn test_removal_after_full_makes_room() {
        init_test_tracing();
        let mut filter = CuckooFilter::create(64, 50, 11).unwrap();

        let mut accepted = Vec::new();
        let mut i = 0u32;
        loop {
            match filter.insert(&int_key(i)) {
                Ok(()) => accepted.push(i),
                Err(_) => break,
            }
            i += 1;
        }
        let full_key = i;
        assert!(filter.has_victim());

        // Free a nest; the parked fingerprint moves back into the buckets
        // or stays parked, but nothing already resident disappears.
        filter.remove(&int_key(accepted[0])).unwrap();
        for key in accepted.iter().skip(1) {
            assert!(filter.contains(&int_key(*key)), "lost key {}", key);
        }
        assert!(filter.contains(&int_key(full_key)));
    }

    #[test]
    fn test_single_bucket_filter() {
        let mut filter = CuckooFilter::create(3, 10, 0).unwrap();
        assert_eq!(filter.bucket_count(), 1);

        for i in 0..4u32 {
            filter.insert(&int_key(i)).unwrap();
        }
        assert!(matches!(
            filter.insert(&int_key(4)),
            Err(CuckooError::Full { attempts: 10 })
        ));
        for i in 0..5u32 {
            assert!(filter.contains(&int_key(i)));
        }
    }

    // =============================================================================
    // DETERMINISM
    // =============================================================================

    #[test]
    fn test_same_seed_same_image() {
        let build = || {
            let mut filter = CuckooFilter::create(128, 500, 21).unwrap();
            for i in 0..120u32 {
                let _ = filter.insert(&int_key(i.wrapping_mul(2_654_435_761)));
            }
            filter.hex_dump("image")
        };

        assert_eq!(build(), build());
    }

    #[test]
    fn test_different_seeds_spread_differently() {
        let occupancy = |seed: u32| {
            let mut filter = CuckooFilter::create(1024, 500, seed).unwrap();
            for i in 0..200u32 {
                filter.insert(&int_key(i)).unwrap();
            }
            filter.hex_dump("image")
        };

        assert_ne!(occupancy(1), occupancy(2));
    }
}
