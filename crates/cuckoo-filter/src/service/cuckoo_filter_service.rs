//! Cuckoo Filter Service
//!
//! Orchestrates the domain filter, the image store (driven port) and the
//! metrics recorder.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::domain::{CuckooConfig, CuckooFilter, LookupResult};
use crate::error::CuckooError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::{CuckooFilterApi, ImageStore};

/// Cuckoo Filter Service implementation
///
/// Implements the `CuckooFilterApi` port on top of an owned filter and an
/// injected image store.
pub struct CuckooFilterService<S: ImageStore> {
    filter: CuckooFilter,
    store: S,
    metrics: Arc<dyn MetricsRecorder>,
}

impl<S: ImageStore> CuckooFilterService<S> {
    /// Create a service with metrics disabled
    pub fn new(config: &CuckooConfig, store: S) -> Result<Self, CuckooError> {
        Self::with_metrics(config, store, Arc::new(NoOpMetrics))
    }

    /// Create a service reporting to `metrics`
    pub fn with_metrics(
        config: &CuckooConfig,
        store: S,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Result<Self, CuckooError> {
        let filter = CuckooFilter::from_config(config)?;
        metrics.record_filter_created(filter.mem_size());

        info!(
            "[cuckoo] 🪺 Filter created: {} buckets, {} bytes, store {}",
            filter.bucket_count(),
            filter.mem_size(),
            store.location()
        );

        Ok(Self {
            filter,
            store,
            metrics,
        })
    }

    /// Write the filter image to the store and clear the buckets.
    pub fn checkpoint(&mut self) -> Result<(), CuckooError> {
        let occupied = self.filter.occupied_nests();
        self.filter.store_and_clear_into(&mut self.store)?;
        self.metrics.record_checkpoint();

        info!(
            "[cuckoo] 💾 Checkpoint: {} fingerprints written to {}",
            occupied,
            self.store.location()
        );
        Ok(())
    }

    /// Replace the current filter with the image held by the store.
    ///
    /// On error the current filter is left untouched.
    pub fn restore(&mut self) -> Result<(), CuckooError> {
        let restored = CuckooFilter::load_from(&self.store)?;
        let freed = self.filter.mem_size();
        let loaded = restored.mem_size();
        self.filter = restored;
        self.metrics.record_restore(freed, loaded);

        info!(
            "[cuckoo] 📂 Restored {} fingerprints from {}",
            self.filter.occupied_nests(),
            self.store.location()
        );
        Ok(())
    }

    /// The wrapped filter
    pub fn filter(&self) -> &CuckooFilter {
        &self.filter
    }

    /// The image store
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ImageStore> CuckooFilterApi for CuckooFilterService<S> {
    fn insert(&mut self, key: &[u8]) -> Result<(), CuckooError> {
        let start = Instant::now();
        let result = self.filter.insert(key);
        self.metrics.record_insert(start.elapsed(), result.is_ok());

        match &result {
            Err(CuckooError::Full { attempts: 0 }) => warn!(
                "[cuckoo] ⚠️ Filter full: victim slot occupied, no eviction attempted (load {:.3})",
                self.filter.load_factor()
            ),
            Err(CuckooError::Full { attempts }) => warn!(
                "[cuckoo] ⚠️ Filter full after {} kick attempts (load {:.3})",
                attempts,
                self.filter.load_factor()
            ),
            _ => {}
        }
        result
    }

    fn contains(&self, key: &[u8]) -> bool {
        self.lookup(key).found
    }

    fn lookup(&self, key: &[u8]) -> LookupResult {
        let start = Instant::now();
        let result = self.filter.lookup(key);
        self.metrics.record_lookup(start.elapsed(), result.found);
        result
    }

    fn remove(&mut self, key: &[u8]) -> Result<(), CuckooError> {
        let result = self.filter.remove(key);
        self.metrics.record_remove(result.is_ok());

        if result.is_err() {
            debug!("[cuckoo] remove: key not present");
        }
        result
    }

    fn mem_size(&self) -> usize {
        self.filter.mem_size()
    }
}

impl<S: ImageStore> Drop for CuckooFilterService<S> {
    fn drop(&mut self) {
        self.metrics.record_filter_freed(self.filter.mem_size());
    }
}
