//! # Service Flow
//!
//! Drives `CuckooFilterService` through its port trait against the
//! in-memory and file-backed image stores and checks the recorded metrics.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cuckoo_filter::{
        CuckooConfig, CuckooConfigBuilder, CuckooError, CuckooFilterApi, CuckooFilterService,
        FileImageStore, InMemoryImageStore, Metrics,
    };
    use tempfile::TempDir;

    use crate::int_key;
    use crate::logging::init_test_tracing;

    /// Exercise any implementation of the driving port the same way.
    fn exercise<A: CuckooFilterApi>(api: &mut A) {
        for i in 0..100u32 {
            api.insert(&int_key(i)).unwrap();
        }
        for i in 0..100u32 {
            assert!(api.contains(&int_key(i)));
        }
        for i in 0..50u32 {
            api.remove(&int_key(i)).unwrap();
        }
        for i in 50..100u32 {
            let result = api.lookup(&int_key(i));
            assert!(result.found);
            assert_ne!(result.fingerprint, 0);
        }
    }

    #[test]
    fn test_filter_and_service_share_port() {
        init_test_tracing();
        let config = CuckooConfig::default();

        let mut filter = cuckoo_filter::CuckooFilter::from_config(&config).unwrap();
        exercise(&mut filter);

        let mut service = CuckooFilterService::new(&config, InMemoryImageStore::new()).unwrap();
        exercise(&mut service);

        assert_eq!(filter.hex_dump("f"), service.filter().hex_dump("f"));
    }

    #[test]
    fn test_service_checkpoint_to_file() {
        init_test_tracing();
        let dir = TempDir::new().unwrap();
        let store = FileImageStore::new(dir.path().join("service.cuckoo"));
        let metrics = Arc::new(Metrics::new());
        let config = CuckooConfigBuilder::new()
            .capacity(2048)
            .seed(99)
            .build()
            .unwrap();

        let mut service = CuckooFilterService::with_metrics(&config, store, metrics.clone()).unwrap();
        for i in 0..1500u32 {
            service.insert(&int_key(i)).unwrap();
        }

        service.checkpoint().unwrap();
        assert!(service.filter().is_empty());
        assert!(!service.contains(&int_key(0)));

        service.restore().unwrap();
        for i in 0..1500u32 {
            assert!(service.contains(&int_key(i)));
        }

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.keys_inserted, 1500);
        assert_eq!(snapshot.checkpoints, 1);
        assert_eq!(snapshot.restores, 1);
        assert_eq!(snapshot.lookups_performed, 1501);
        assert_eq!(snapshot.lookups_positive, 1500);
    }

    #[test]
    fn test_service_restore_from_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = FileImageStore::new(dir.path().join("never-written.cuckoo"));
        let mut service = CuckooFilterService::new(&CuckooConfig::default(), store).unwrap();

        assert!(matches!(
            service.restore(),
            Err(CuckooError::ImageNotFound { .. })
        ));
    }

    #[test]
    fn test_service_reports_full() {
        init_test_tracing();
        let metrics = Arc::new(Metrics::new());
        let config = CuckooConfig::new(16, 20, 4).unwrap();
        let mut service =
            CuckooFilterService::with_metrics(&config, InMemoryImageStore::new(), metrics.clone())
                .unwrap();

        let mut saw_full = false;
        for i in 0..200u32 {
            if let Err(CuckooError::Full { .. }) = service.insert(&int_key(i)) {
                saw_full = true;
            }
        }

        assert!(saw_full);
        let snapshot = metrics.snapshot();
        assert!(snapshot.insert_failures > 0);
        assert_eq!(snapshot.keys_inserted + snapshot.insert_failures, 200);
    }
}
