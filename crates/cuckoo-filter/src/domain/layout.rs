//! Byte layout of a filter image
//!
//! A filter lives in one contiguous buffer: a fixed header followed by
//! `bucket_count * NESTS_PER_BUCKET` packed nests. All fields use native
//! byte order.
//!
//! ```text
//! offset  width           field
//! 0       u32             bucket_count
//! 4       u32             nests_per_bucket
//! 8       u32             fingerprint mask
//! 12      u32             max_kick_attempts
//! 16      u32             seed
//! 20      u32             reserved (zero)
//! 24      u64             mem_size        (total image bytes)
//! 32      u64             array_mem_size  (nest bytes)
//! 40      u32 x 4         victim { fingerprint, h1, h2, used }
//! 56      u16 x N         nests
//! ```

/// Fingerprint stored in each nest. Zero marks an empty nest.
pub type Fingerprint = u16;

/// Nests in every bucket.
pub const NESTS_PER_BUCKET: usize = 4;

/// Width of one nest in bytes.
pub const NEST_BYTES: usize = std::mem::size_of::<Fingerprint>();

/// Fingerprint size in bits.
pub const FINGERPRINT_BITS: u32 = Fingerprint::BITS;

/// Mask applied to raw fingerprint hashes.
pub const FINGERPRINT_MASK: u32 = (1u32 << FINGERPRINT_BITS) - 1;

/// Empty nest sentinel.
pub const EMPTY_NEST: Fingerprint = 0;

pub const BUCKET_COUNT_OFFSET: usize = 0;
pub const NESTS_PER_BUCKET_OFFSET: usize = 4;
pub const MASK_OFFSET: usize = 8;
pub const MAX_KICKS_OFFSET: usize = 12;
pub const SEED_OFFSET: usize = 16;
pub const RESERVED_OFFSET: usize = 20;
pub const MEM_SIZE_OFFSET: usize = 24;
pub const ARRAY_MEM_SIZE_OFFSET: usize = 32;
pub const VICTIM_FINGERPRINT_OFFSET: usize = 40;
pub const VICTIM_H1_OFFSET: usize = 44;
pub const VICTIM_H2_OFFSET: usize = 48;
pub const VICTIM_USED_OFFSET: usize = 52;

/// Header size; the nest array starts here.
pub const HEADER_BYTES: usize = 56;

/// A fingerprint parked outside the bucket array after an eviction walk
/// ran out of attempts, together with its two candidate buckets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VictimRecord {
    pub fingerprint: Fingerprint,
    pub h1: u32,
    pub h2: u32,
    pub used: bool,
}

impl VictimRecord {
    /// Whether this record holds `fp` for a key whose candidates are `h1`/`h2`.
    pub fn matches(&self, fp: Fingerprint, h1: u32, h2: u32) -> bool {
        self.used && self.fingerprint == fp && (self.h1 == h1 || self.h1 == h2)
    }
}
