//! Owned filter image: header fields plus the nested bucket array
//!
//! The whole filter state is one `Vec<u8>` laid out as described in
//! [`super::layout`]. Header fields and nests are read and written through
//! offset arithmetic, so the buffer can be persisted and restored verbatim.

use std::fmt::Write as _;

use super::layout::*;
use crate::error::{CuckooError, Result};

/// One contiguous, exclusively owned filter image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterImage {
    bytes: Vec<u8>,
}

impl FilterImage {
    /// Allocate a zero-filled image for `bucket_count` buckets and write its header.
    pub fn allocate(bucket_count: u32, max_kick_attempts: u32, seed: u32) -> Result<Self> {
        let array_bytes = (bucket_count as usize)
            .checked_mul(NESTS_PER_BUCKET * NEST_BYTES)
            .ok_or(CuckooError::AllocationFailed { bytes: usize::MAX })?;
        let total_bytes = array_bytes
            .checked_add(HEADER_BYTES)
            .ok_or(CuckooError::AllocationFailed { bytes: usize::MAX })?;

        let mut bytes = Self::reserve(total_bytes)?;
        bytes.resize(total_bytes, 0);

        let mut image = Self { bytes };
        image.write_u32(BUCKET_COUNT_OFFSET, bucket_count);
        image.write_u32(NESTS_PER_BUCKET_OFFSET, NESTS_PER_BUCKET as u32);
        image.write_u32(MASK_OFFSET, FINGERPRINT_MASK);
        image.write_u32(MAX_KICKS_OFFSET, max_kick_attempts);
        image.write_u32(SEED_OFFSET, seed);
        image.write_u64(MEM_SIZE_OFFSET, total_bytes as u64);
        image.write_u64(ARRAY_MEM_SIZE_OFFSET, array_bytes as u64);
        Ok(image)
    }

    /// Adopt bytes read from storage, copying them into a buffer of exactly
    /// their length, and check that they describe a self-consistent image.
    pub fn from_bytes(source: &[u8]) -> Result<Self> {
        let mut bytes = Self::reserve(source.len())?;
        bytes.extend_from_slice(source);

        let image = Self { bytes };
        image.validate()?;
        Ok(image)
    }

    fn reserve(len: usize) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(len)
            .map_err(|_| CuckooError::AllocationFailed { bytes: len })?;
        Ok(bytes)
    }

    fn validate(&self) -> Result<()> {
        let len = self.bytes.len();
        if len < HEADER_BYTES {
            return Err(CuckooError::CorruptImage(format!(
                "image is {} bytes, header alone needs {}",
                len, HEADER_BYTES
            )));
        }

        let bucket_count = self.bucket_count();
        if bucket_count == 0 || !bucket_count.is_power_of_two() {
            return Err(CuckooError::CorruptImage(format!(
                "bucket count {} is not a non-zero power of two",
                bucket_count
            )));
        }
        if self.nests_per_bucket() as usize != NESTS_PER_BUCKET {
            return Err(CuckooError::CorruptImage(format!(
                "nests per bucket is {}, expected {}",
                self.nests_per_bucket(),
                NESTS_PER_BUCKET
            )));
        }
        if self.mask() != FINGERPRINT_MASK {
            return Err(CuckooError::CorruptImage(format!(
                "fingerprint mask is {:#x}, expected {:#x}",
                self.mask(),
                FINGERPRINT_MASK
            )));
        }

        let expected_array = bucket_count as u64 * (NESTS_PER_BUCKET * NEST_BYTES) as u64;
        if self.array_mem_size() as u64 != expected_array
            || self.mem_size() as u64 != len as u64
            || len as u64 != HEADER_BYTES as u64 + expected_array
        {
            return Err(CuckooError::CorruptImage(format!(
                "size fields (mem {}, array {}) disagree with image length {}",
                self.mem_size(),
                self.array_mem_size(),
                len
            )));
        }

        let victim = self.victim();
        if victim.used && (victim.h1 >= bucket_count || victim.h2 >= bucket_count) {
            return Err(CuckooError::CorruptImage(
                "victim record points outside the bucket array".to_string(),
            ));
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Raw field access
    // ---------------------------------------------------------------------

    fn read_u32(&self, offset: usize) -> u32 {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.bytes[offset..offset + 4]);
        u32::from_ne_bytes(raw)
    }

    fn write_u32(&mut self, offset: usize, value: u32) {
        self.bytes[offset..offset + 4].copy_from_slice(&value.to_ne_bytes());
    }

    fn read_u64(&self, offset: usize) -> u64 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&self.bytes[offset..offset + 8]);
        u64::from_ne_bytes(raw)
    }

    fn write_u64(&mut self, offset: usize, value: u64) {
        self.bytes[offset..offset + 8].copy_from_slice(&value.to_ne_bytes());
    }

    // ---------------------------------------------------------------------
    // Header
    // ---------------------------------------------------------------------

    pub fn bucket_count(&self) -> u32 {
        self.read_u32(BUCKET_COUNT_OFFSET)
    }

    pub fn nests_per_bucket(&self) -> u32 {
        self.read_u32(NESTS_PER_BUCKET_OFFSET)
    }

    pub fn mask(&self) -> u32 {
        self.read_u32(MASK_OFFSET)
    }

    pub fn max_kick_attempts(&self) -> u32 {
        self.read_u32(MAX_KICKS_OFFSET)
    }

    pub fn seed(&self) -> u32 {
        self.read_u32(SEED_OFFSET)
    }

    /// Total image size in bytes.
    pub fn mem_size(&self) -> usize {
        self.read_u64(MEM_SIZE_OFFSET) as usize
    }

    /// Size of the nest array in bytes.
    pub fn array_mem_size(&self) -> usize {
        self.read_u64(ARRAY_MEM_SIZE_OFFSET) as usize
    }

    pub fn victim(&self) -> VictimRecord {
        VictimRecord {
            fingerprint: self.read_u32(VICTIM_FINGERPRINT_OFFSET) as Fingerprint,
            h1: self.read_u32(VICTIM_H1_OFFSET),
            h2: self.read_u32(VICTIM_H2_OFFSET),
            used: self.read_u32(VICTIM_USED_OFFSET) != 0,
        }
    }

    pub fn set_victim(&mut self, victim: VictimRecord) {
        self.write_u32(VICTIM_FINGERPRINT_OFFSET, u32::from(victim.fingerprint));
        self.write_u32(VICTIM_H1_OFFSET, victim.h1);
        self.write_u32(VICTIM_H2_OFFSET, victim.h2);
        self.write_u32(VICTIM_USED_OFFSET, u32::from(victim.used));
    }

    pub fn clear_victim(&mut self) {
        self.set_victim(VictimRecord::default());
    }

    // ---------------------------------------------------------------------
    // Nested bucket array
    // ---------------------------------------------------------------------

    fn nest_offset(bucket: u32, nest: usize) -> usize {
        HEADER_BYTES + ((bucket as usize * NESTS_PER_BUCKET) + nest) * NEST_BYTES
    }

    /// Fingerprint held by one nest.
    pub fn nest(&self, bucket: u32, nest: usize) -> Fingerprint {
        let offset = Self::nest_offset(bucket, nest);
        Fingerprint::from_ne_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }

    pub fn set_nest(&mut self, bucket: u32, nest: usize, fp: Fingerprint) {
        let offset = Self::nest_offset(bucket, nest);
        self.bytes[offset..offset + NEST_BYTES].copy_from_slice(&fp.to_ne_bytes());
    }

    /// Place `fp` in the first empty nest of `bucket`.
    pub fn try_place(&mut self, bucket: u32, fp: Fingerprint) -> bool {
        match (0..NESTS_PER_BUCKET).find(|&n| self.nest(bucket, n) == EMPTY_NEST) {
            Some(n) => {
                self.set_nest(bucket, n, fp);
                true
            }
            None => false,
        }
    }

    pub fn bucket_contains(&self, bucket: u32, fp: Fingerprint) -> bool {
        (0..NESTS_PER_BUCKET).any(|n| self.nest(bucket, n) == fp)
    }

    /// Clear the first nest of `bucket` holding `fp`.
    pub fn clear_first(&mut self, bucket: u32, fp: Fingerprint) -> bool {
        match (0..NESTS_PER_BUCKET).find(|&n| self.nest(bucket, n) == fp) {
            Some(n) => {
                self.set_nest(bucket, n, EMPTY_NEST);
                true
            }
            None => false,
        }
    }

    /// Put `fp` into a nest and return the previous occupant.
    pub fn swap_nest(&mut self, bucket: u32, nest: usize, fp: Fingerprint) -> Fingerprint {
        let previous = self.nest(bucket, nest);
        self.set_nest(bucket, nest, fp);
        previous
    }

    /// Number of non-empty nests.
    pub fn occupied_nests(&self) -> usize {
        self.bytes[HEADER_BYTES..]
            .chunks_exact(NEST_BYTES)
            .filter(|raw| raw.iter().any(|&b| b != 0))
            .count()
    }

    /// Zero the nest array only; header fields are left intact.
    pub fn zero_buckets(&mut self) {
        self.bytes[HEADER_BYTES..].fill(0);
    }

    pub fn bucket_bytes(&self) -> &[u8] {
        &self.bytes[HEADER_BYTES..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Render the image as 16-byte rows: offset, hex bytes, printable ASCII.
    pub fn hex_dump(&self, label: &str) -> String {
        let mut out = String::new();
        if !label.is_empty() {
            let _ = writeln!(out, "{}:", label);
        }
        if self.bytes.is_empty() {
            out.push_str("  ZERO LENGTH\n");
            return out;
        }

        for (row, chunk) in self.bytes.chunks(16).enumerate() {
            let hex_bytes: Vec<String> = chunk.iter().map(|b| hex::encode([*b])).collect();
            let ascii: String = chunk
                .iter()
                .map(|&b| if (0x20..=0x7e).contains(&b) { b as char } else { '.' })
                .collect();
            let _ = writeln!(
                out,
                "  {:04x}  {:<47}  {}",
                row * 16,
                hex_bytes.join(" "),
                ascii
            );
        }
        out
    }
}
