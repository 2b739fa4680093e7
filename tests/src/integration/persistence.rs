//! # Persistence Through Files
//!
//! Checkpoint a populated filter to disk, keep using the cleared filter,
//! then restore the checkpoint and verify the two images diverged exactly
//! as expected.

#[cfg(test)]
mod tests {
    use std::fs;

    use cuckoo_filter::{CuckooError, CuckooFilter, FileImageStore, ImageStore};
    use tempfile::TempDir;

    use crate::int_key;
    use crate::logging::init_test_tracing;

    fn populated(count: u32, seed: u32) -> CuckooFilter {
        let mut filter = CuckooFilter::create(1024, 500, seed).unwrap();
        for i in 0..count {
            filter.insert(&int_key(i)).unwrap();
        }
        filter
    }

    #[test]
    fn test_store_and_clear_then_load() {
        init_test_tracing();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cf_0.cuckoo");
        let mut filter = populated(700, 5);

        filter.store_and_clear(&path).unwrap();
        assert!(filter.is_empty());
        assert_eq!(fs::metadata(&path).unwrap().len(), filter.mem_size() as u64);

        let restored = CuckooFilter::load(&path).unwrap();
        assert_eq!(restored.mem_size(), filter.mem_size());
        assert_eq!(restored.bucket_count(), 512);
        assert_eq!(restored.occupied_nests(), 700);
        for i in 0..700u32 {
            assert!(restored.contains(&int_key(i)), "lost key {}", i);
        }
    }

    #[test]
    fn test_cleared_filter_is_reusable() {
        init_test_tracing();
        let dir = TempDir::new().unwrap();
        let mut filter = populated(300, 9);

        filter.store_and_clear(dir.path().join("a.cuckoo")).unwrap();
        for i in 1000..1100u32 {
            filter.insert(&int_key(i)).unwrap();
        }
        filter.store_and_clear(dir.path().join("b.cuckoo")).unwrap();

        let a = CuckooFilter::load(dir.path().join("a.cuckoo")).unwrap();
        let b = CuckooFilter::load(dir.path().join("b.cuckoo")).unwrap();
        assert_eq!(a.occupied_nests(), 300);
        assert_eq!(b.occupied_nests(), 100);
        for i in 1000..1100u32 {
            assert!(b.contains(&int_key(i)));
        }
    }

    #[test]
    fn test_restored_filter_continues_deterministically() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cf.cuckoo");

        let mut source = populated(400, 13);
        source.store_and_clear(&path).unwrap();

        // Both restores start from the same image and the same generator state.
        let mut first = CuckooFilter::load(&path).unwrap();
        let mut second = CuckooFilter::load(&path).unwrap();
        for i in 400..800u32 {
            let _ = first.insert(&int_key(i));
            let _ = second.insert(&int_key(i));
        }

        assert_eq!(first.hex_dump("x"), second.hex_dump("x"));
    }

    #[test]
    fn test_parked_victim_survives_checkpoint() {
        init_test_tracing();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("full.cuckoo");
        let mut filter = CuckooFilter::create(64, 50, 3).unwrap();

        let mut accepted = Vec::new();
        let mut i = 0u32;
        while filter.insert(&int_key(i)).is_ok() {
            accepted.push(i);
            i += 1;
        }
        let full_key = i;
        assert!(filter.has_victim());

        filter.store_and_clear(&path).unwrap();

        // The checkpointed filter is empty and usable again.
        assert!(!filter.has_victim());
        assert!(filter.is_empty());
        filter.insert(&int_key(5_000_000)).unwrap();
        assert!(filter.contains(&int_key(5_000_000)));

        let restored = CuckooFilter::load(&path).unwrap();
        assert!(restored.has_victim());
        assert!(restored.contains(&int_key(full_key)));
        for key in &accepted {
            assert!(restored.contains(&int_key(*key)), "lost key {}", key);
        }
    }

    #[test]
    fn test_store_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("cf.cuckoo");
        let mut filter = populated(10, 0);

        filter.store_and_clear(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_truncated_file_is_corrupt() {
        init_test_tracing();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cf.cuckoo");
        let mut filter = populated(50, 0);
        filter.store_and_clear(&path).unwrap();

        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() - 2]).unwrap();

        assert!(matches!(
            CuckooFilter::load(&path),
            Err(CuckooError::CorruptImage(_))
        ));
    }

    #[test]
    fn test_missing_file_reports_location() {
        let dir = TempDir::new().unwrap();
        let store = FileImageStore::new(dir.path().join("absent.cuckoo"));

        match CuckooFilter::load_from(&store) {
            Err(CuckooError::ImageNotFound { location }) => {
                assert_eq!(location, store.location());
            }
            other => panic!("expected ImageNotFound, got {:?}", other.map(|f| f.mem_size())),
        }
    }
}
