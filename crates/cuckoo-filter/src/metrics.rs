//! Metrics and tracing hooks for cuckoo filter operations
//!
//! Provides instrumentation points for monitoring filter occupancy,
//! resource usage, and operation latencies.
//!
//! ## Usage
//!
//! ```
//! use cuckoo_filter::metrics::Metrics;
//! use std::time::Duration;
//!
//! let metrics = Metrics::new();
//! metrics.record_filter_created(1080);
//! metrics.record_insert(Duration::from_nanos(120), true);
//! metrics.record_lookup(Duration::from_nanos(40), true);
//!
//! assert_eq!(metrics.snapshot().keys_inserted, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for cuckoo filter operations
///
/// Thread-safe counters so one collector can be shared by several filters.
#[derive(Default)]
pub struct Metrics {
    /// Total filters created (restores are counted in `restores`)
    pub filters_created: AtomicU64,
    /// Successful insertions
    pub keys_inserted: AtomicU64,
    /// Insertions rejected with `Full`
    pub insert_failures: AtomicU64,
    /// Total lookups performed
    pub lookups_performed: AtomicU64,
    /// Total positive lookups (matches)
    pub lookups_positive: AtomicU64,
    /// Successful removals
    pub keys_removed: AtomicU64,
    /// Removals that found nothing
    pub removal_misses: AtomicU64,
    /// Images written by store-and-clear
    pub checkpoints: AtomicU64,
    /// Images restored by load
    pub restores: AtomicU64,
    /// Total bytes held by filter images
    pub bytes_allocated: AtomicU64,
    /// Cumulative lookup time in nanoseconds
    pub lookup_time_ns: AtomicU64,
    /// Cumulative insert time in nanoseconds
    pub insert_time_ns: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record filter creation
    ///
    /// # Arguments
    /// * `mem_size` - Image size in bytes
    pub fn record_filter_created(&self, mem_size: usize) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
        self.bytes_allocated.fetch_add(mem_size as u64, Ordering::Relaxed);
    }

    /// Record an insertion attempt
    ///
    /// # Arguments
    /// * `duration` - Time taken for insertion
    /// * `placed` - Whether the insertion succeeded
    pub fn record_insert(&self, duration: Duration, placed: bool) {
        if placed {
            self.keys_inserted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.insert_failures.fetch_add(1, Ordering::Relaxed);
        }
        self.insert_time_ns.fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record lookup operation
    ///
    /// # Arguments
    /// * `duration` - Time taken for lookup
    /// * `found` - Whether the key was found (possibly false positive)
    pub fn record_lookup(&self, duration: Duration, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        self.lookup_time_ns.fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a removal attempt
    pub fn record_remove(&self, removed: bool) {
        if removed {
            self.keys_removed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.removal_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a store-and-clear checkpoint
    pub fn record_checkpoint(&self) {
        self.checkpoints.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a restore that replaced a filter image of `freed` bytes with one of `loaded` bytes
    pub fn record_restore(&self, freed: usize, loaded: usize) {
        self.restores.fetch_add(1, Ordering::Relaxed);
        self.bytes_allocated.fetch_sub(freed as u64, Ordering::Relaxed);
        self.bytes_allocated.fetch_add(loaded as u64, Ordering::Relaxed);
    }

    /// Record filter deallocation
    pub fn record_filter_freed(&self, mem_size: usize) {
        self.bytes_allocated.fetch_sub(mem_size as u64, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            keys_inserted: self.keys_inserted.load(Ordering::Relaxed),
            insert_failures: self.insert_failures.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            keys_removed: self.keys_removed.load(Ordering::Relaxed),
            removal_misses: self.removal_misses.load(Ordering::Relaxed),
            checkpoints: self.checkpoints.load(Ordering::Relaxed),
            restores: self.restores.load(Ordering::Relaxed),
            bytes_allocated: self.bytes_allocated.load(Ordering::Relaxed),
            avg_lookup_ns: self.avg_lookup_time_ns(),
            avg_insert_ns: self.avg_insert_time_ns(),
        }
    }

    /// Calculate average lookup time in nanoseconds
    pub fn avg_lookup_time_ns(&self) -> u64 {
        let total = self.lookup_time_ns.load(Ordering::Relaxed);
        let count = self.lookups_performed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Calculate average insert time in nanoseconds, failures included
    pub fn avg_insert_time_ns(&self) -> u64 {
        let total = self.insert_time_ns.load(Ordering::Relaxed);
        let count = self.keys_inserted.load(Ordering::Relaxed)
            + self.insert_failures.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Ratio of positive lookups to total lookups.
    ///
    /// Includes both true positives and false positives.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        for counter in [
            &self.filters_created,
            &self.keys_inserted,
            &self.insert_failures,
            &self.lookups_performed,
            &self.lookups_positive,
            &self.keys_removed,
            &self.removal_misses,
            &self.checkpoints,
            &self.restores,
            &self.bytes_allocated,
            &self.lookup_time_ns,
            &self.insert_time_ns,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub keys_inserted: u64,
    pub insert_failures: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub keys_removed: u64,
    pub removal_misses: u64,
    pub checkpoints: u64,
    pub restores: u64,
    pub bytes_allocated: u64,
    pub avg_lookup_ns: u64,
    pub avg_insert_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to integrate with external metrics systems
/// like Prometheus, StatsD, or OpenTelemetry.
pub trait MetricsRecorder: Send + Sync {
    fn record_filter_created(&self, mem_size: usize);
    fn record_insert(&self, duration: Duration, placed: bool);
    fn record_lookup(&self, duration: Duration, found: bool);
    fn record_remove(&self, removed: bool);
    fn record_checkpoint(&self);
    fn record_restore(&self, freed: usize, loaded: usize);
    fn record_filter_freed(&self, mem_size: usize);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: usize) {}
    fn record_insert(&self, _: Duration, _: bool) {}
    fn record_lookup(&self, _: Duration, _: bool) {}
    fn record_remove(&self, _: bool) {}
    fn record_checkpoint(&self) {}
    fn record_restore(&self, _: usize, _: usize) {}
    fn record_filter_freed(&self, _: usize) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, mem_size: usize) {
        Metrics::record_filter_created(self, mem_size);
    }

    fn record_insert(&self, duration: Duration, placed: bool) {
        Metrics::record_insert(self, duration, placed);
    }

    fn record_lookup(&self, duration: Duration, found: bool) {
        Metrics::record_lookup(self, duration, found);
    }

    fn record_remove(&self, removed: bool) {
        Metrics::record_remove(self, removed);
    }

    fn record_checkpoint(&self) {
        Metrics::record_checkpoint(self);
    }

    fn record_restore(&self, freed: usize, loaded: usize) {
        Metrics::record_restore(self, freed, loaded);
    }

    fn record_filter_freed(&self, mem_size: usize) {
        Metrics::record_filter_freed(self, mem_size);
    }
}
