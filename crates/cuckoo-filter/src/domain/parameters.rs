//! Cuckoo filter sizing
//!
//! Formulas:
//! - buckets = next_pow2(capacity / b), doubled once if capacity / (buckets * b) > alpha
//! - fpr ~= 2b / 2^f  (two candidate buckets of b nests, f-bit fingerprints)
//!
//! with b = nests per bucket and alpha = target maximum load factor.

use super::layout::{FINGERPRINT_BITS, NESTS_PER_BUCKET};

/// Target maximum load factor for the sizing rule.
pub const MAX_LOAD_FACTOR: f64 = 0.96;

/// Largest capacity hint accepted; keeps the bucket count within a `u32`.
pub const MAX_CAPACITY: usize = u32::MAX as usize;

/// Sizing derived from a capacity hint
#[derive(Clone, Debug, PartialEq)]
pub struct CuckooFilterParams {
    /// Number of buckets (power of two)
    pub bucket_count: u32,
    /// Total number of nests
    pub nest_count: usize,
    /// Load factor the capacity hint would reach
    pub expected_load: f64,
    /// Upper-bound false positive rate at full occupancy
    pub expected_fpr: f64,
}

/// Compute the bucket count for a capacity hint.
///
/// Returns `None` if the result does not fit the `u32` header field.
pub fn bucket_count_for(capacity: usize) -> Option<u32> {
    let mut bucket_count = (capacity / NESTS_PER_BUCKET).checked_next_power_of_two()?;

    let load = capacity as f64 / bucket_count as f64 / NESTS_PER_BUCKET as f64;
    if load > MAX_LOAD_FACTOR {
        bucket_count = bucket_count.checked_mul(2)?;
    }

    u32::try_from(bucket_count).ok()
}

/// Calculate filter parameters for a capacity hint
pub fn calculate_parameters(capacity: usize) -> Option<CuckooFilterParams> {
    let bucket_count = bucket_count_for(capacity)?;
    let nest_count = bucket_count as usize * NESTS_PER_BUCKET;

    Some(CuckooFilterParams {
        bucket_count,
        nest_count,
        expected_load: capacity as f64 / nest_count as f64,
        expected_fpr: calculate_fpr(FINGERPRINT_BITS),
    })
}

/// Approximate false positive rate: `2b / 2^f`
pub fn calculate_fpr(fingerprint_bits: u32) -> f64 {
    (2 * NESTS_PER_BUCKET) as f64 / 2f64.powi(fingerprint_bits as i32)
}
