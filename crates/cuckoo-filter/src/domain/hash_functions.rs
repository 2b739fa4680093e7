//! Hash functions for the cuckoo filter
//!
//! Every index and fingerprint is derived from MurmurHash3 (x86, 32-bit)
//! through a single double-hashing family: `h(n) = h1 + n * h2 (mod size)`.
//! Different values of `n` select different members of the family, so the
//! primary index, the fingerprint and the alternate-index offset are
//! independent-looking values computed from the same two digests.

use std::io::Cursor;

use super::layout::Fingerprint;

/// Family member used for the primary bucket index.
pub const PRIMARY_INDEX_TWEAK: u32 = 0;

/// Family member used for the alternate-index offset of a fingerprint.
pub const ALT_INDEX_TWEAK: u32 = 900;

/// Family member used for fingerprints.
pub const FINGERPRINT_TWEAK: u32 = 1000;

/// Hash a byte key with MurmurHash3 (x86, 32-bit) under `seed`.
pub fn murmur_hash(key: &[u8], seed: u32) -> u32 {
    let mut cursor = Cursor::new(key);

    // Reading from an in-memory cursor cannot fail
    murmur3::murmur3_32(&mut cursor, seed).unwrap_or(0)
}

/// Member `n` of the double-hashing family, reduced modulo `size`.
///
/// `h1 = murmur(key, seed)`, `h2 = murmur(key, h1)`, result is
/// `(h1 + n * h2) mod size` with wrapping 32-bit arithmetic.
/// `size` must be non-zero.
pub fn combined_hash(key: &[u8], size: u32, n: u32, seed: u32) -> u32 {
    let h1 = murmur_hash(key, seed);
    let h2 = murmur_hash(key, h1);

    h1.wrapping_add(n.wrapping_mul(h2)) % size
}

/// Index and fingerprint derivation bound to one filter's geometry.
///
/// Pure and side-effect free. `bucket_count` is never zero: the filter
/// constructor and the image loader both reject that geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashEngine {
    bucket_count: u32,
    mask: u32,
    seed: u32,
}

impl HashEngine {
    /// Create a hash engine for a filter geometry.
    pub fn new(bucket_count: u32, mask: u32, seed: u32) -> Self {
        debug_assert!(bucket_count > 0, "bucket_count must be non-zero");
        Self {
            bucket_count,
            mask,
            seed,
        }
    }

    /// Fingerprint of a key, never zero.
    pub fn fingerprint(&self, key: &[u8]) -> Fingerprint {
        let h = combined_hash(key, self.bucket_count, FINGERPRINT_TWEAK, self.seed) & self.mask;

        // Zero marks an empty nest, so it is remapped
        (h + u32::from(h == 0)) as Fingerprint
    }

    /// Primary bucket index of a key.
    pub fn primary_index(&self, key: &[u8]) -> u32 {
        combined_hash(key, self.bucket_count, PRIMARY_INDEX_TWEAK, self.seed)
    }

    /// Alternate bucket of a fingerprint currently held (or candidate) in bucket `h`.
    ///
    /// XOR with a fingerprint-only offset makes this an involution:
    /// `alternate_index(alternate_index(h, fp), fp) == h`.
    pub fn alternate_index(&self, h: u32, fp: Fingerprint) -> u32 {
        let fp_bytes = u32::from(fp).to_ne_bytes();
        let offset = combined_hash(&fp_bytes, self.bucket_count, ALT_INDEX_TWEAK, self.seed);

        (h ^ offset) % self.bucket_count
    }

    /// Both candidate buckets and the fingerprint of a key.
    pub fn candidates(&self, key: &[u8]) -> (Fingerprint, u32, u32) {
        let fp = self.fingerprint(key);
        let h1 = self.primary_index(key);
        let h2 = self.alternate_index(h1, fp);
        (fp, h1, h2)
    }

    pub fn bucket_count(&self) -> u32 {
        self.bucket_count
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}
