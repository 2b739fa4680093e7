//! Inbound Ports (Driving Ports)
//!
//! These traits define the API that external callers use to interact
//! with a filter, whether directly or through the instrumented service.

use crate::domain::{CuckooFilter, LookupResult};
use crate::error::CuckooError;

/// Primary cuckoo filter API (Driving Port)
pub trait CuckooFilterApi {
    /// Insert a key
    ///
    /// # Errors
    /// `Full` when the eviction walk runs out of attempts or the victim
    /// slot is already occupied.
    fn insert(&mut self, key: &[u8]) -> Result<(), CuckooError>;

    /// Test if a key might be in the filter
    ///
    /// Returns:
    /// - `true` if the key might be in the set (could be false positive)
    /// - `false` if the key is definitely NOT in the set
    fn contains(&self, key: &[u8]) -> bool;

    /// Membership query with the fingerprint and candidate buckets used
    fn lookup(&self, key: &[u8]) -> LookupResult;

    /// Remove one copy of a key
    ///
    /// # Errors
    /// `NotFound` when neither candidate bucket nor the victim slot holds
    /// the key's fingerprint.
    fn remove(&mut self, key: &[u8]) -> Result<(), CuckooError>;

    /// Total size of the filter image in bytes
    fn mem_size(&self) -> usize;
}

impl CuckooFilterApi for CuckooFilter {
    fn insert(&mut self, key: &[u8]) -> Result<(), CuckooError> {
        CuckooFilter::insert(self, key)
    }

    fn contains(&self, key: &[u8]) -> bool {
        CuckooFilter::contains(self, key)
    }

    fn lookup(&self, key: &[u8]) -> LookupResult {
        CuckooFilter::lookup(self, key)
    }

    fn remove(&mut self, key: &[u8]) -> Result<(), CuckooError> {
        CuckooFilter::remove(self, key)
    }

    fn mem_size(&self) -> usize {
        CuckooFilter::mem_size(self)
    }
}
