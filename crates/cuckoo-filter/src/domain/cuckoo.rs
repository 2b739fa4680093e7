//! # Cuckoo Filter
//!
//! Space-efficient probabilistic set membership supporting deletion.
//!
//! Each key is reduced to a 16-bit fingerprint that may live in one of two
//! candidate buckets of four nests. The second bucket is derived from the
//! first and the fingerprint alone (`h2 = h1 ^ H(fp)`), so a resident
//! fingerprint can always be moved to its sibling bucket without knowing the
//! key it came from.
//!
//! ## Insertion
//!
//! 1. Place the fingerprint in `h1`, else in `h2`.
//! 2. Otherwise pick `h1` or `h2` at random and start an eviction walk: swap
//!    the fingerprint into a random nest, move the displaced fingerprint to
//!    its alternate bucket, repeat until something lands in an empty nest or
//!    `max_kick_attempts` is spent.
//! 3. A walk that runs out parks the fingerprint still in hand in the victim
//!    slot and reports [`CuckooError::Full`]. Lookups and removals consult the
//!    victim slot, so no resident key is lost. Until a removal makes room and
//!    the victim is re-homed, inserts still fill free nests in their candidate
//!    buckets but fail fast instead of starting another walk.
//!
//! The walk is driven by a generator owned by the filter and seeded from the
//! filter seed, so identical operation sequences produce identical images.
//!
//! ## Invariants
//!
//! - Bucket count is a non-zero power of two.
//! - Fingerprint 0 never represents a key.
//! - A resident key occupies one nest in one of its two candidate buckets
//!   (or the victim slot). Duplicate inserts store separate copies.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use super::config::CuckooConfig;
use super::hash_functions::HashEngine;
use super::image::FilterImage;
use super::layout::{Fingerprint, VictimRecord, NESTS_PER_BUCKET};
use super::parameters::bucket_count_for;
use crate::error::{CuckooError, Result};

/// Outcome of a membership query, with the values computed for the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LookupResult {
    pub found: bool,
    pub fingerprint: Fingerprint,
    pub h1: u32,
    pub h2: u32,
}

/// Cuckoo filter over byte keys.
///
/// All state, including the victim slot, lives in one owned [`FilterImage`];
/// dropping the filter releases it.
#[derive(Clone, Debug)]
pub struct CuckooFilter {
    image: FilterImage,
    hasher: HashEngine,
    rng: StdRng,
}

impl CuckooFilter {
    /// Create an empty filter sized for `capacity` keys.
    ///
    /// Fails with [`CuckooError::AllocationFailed`] if the bucket array cannot
    /// be reserved or its geometry does not fit the image header.
    pub fn create(capacity: usize, max_kick_attempts: u32, seed: u32) -> Result<Self> {
        let bucket_count =
            bucket_count_for(capacity).ok_or(CuckooError::AllocationFailed { bytes: usize::MAX })?;
        let image = FilterImage::allocate(bucket_count, max_kick_attempts, seed)?;
        Ok(Self::from_image(image))
    }

    /// Create a filter from a validated configuration.
    pub fn from_config(config: &CuckooConfig) -> Result<Self> {
        config.validate()?;
        Self::create(config.capacity, config.max_kick_attempts, config.seed)
    }

    pub(crate) fn from_image(image: FilterImage) -> Self {
        let hasher = HashEngine::new(image.bucket_count(), image.mask(), image.seed());
        let rng = StdRng::seed_from_u64(u64::from(image.seed()));
        Self { image, hasher, rng }
    }

    /// Insert a key.
    ///
    /// Duplicates are not detected; inserting a key twice stores two copies.
    ///
    /// While the victim slot is occupied, a key that fits directly in one of
    /// its candidate buckets is still accepted; a key that would need an
    /// eviction walk fails with [`CuckooError::Full`] and zero attempts.
    pub fn insert(&mut self, key: &[u8]) -> Result<()> {
        let fp = self.hasher.fingerprint(key);
        let h1 = self.hasher.primary_index(key);

        if !self.image.victim().used {
            return self.place(fp, h1);
        }

        let h2 = self.hasher.alternate_index(h1, fp);
        if self.image.try_place(h1, fp) || self.image.try_place(h2, fp) {
            return Ok(());
        }

        Err(CuckooError::Full { attempts: 0 })
    }

    /// Place a fingerprint whose candidate buckets are `h1` and its alternate.
    fn place(&mut self, fp: Fingerprint, h1: u32) -> Result<()> {
        if self.image.try_place(h1, fp) {
            return Ok(());
        }

        let h2 = self.hasher.alternate_index(h1, fp);
        if self.image.try_place(h2, fp) {
            return Ok(());
        }

        let start = if self.rng.gen_bool(0.5) { h1 } else { h2 };
        self.relocate(fp, start)
    }

    /// Bounded eviction walk starting at a full bucket.
    fn relocate(&mut self, mut fp: Fingerprint, mut bucket: u32) -> Result<()> {
        let max_kicks = self.image.max_kick_attempts();

        for kick in 0..max_kicks {
            let nest = self.rng.gen_range(0..NESTS_PER_BUCKET);
            fp = self.image.swap_nest(bucket, nest, fp);
            bucket = self.hasher.alternate_index(bucket, fp);

            if self.image.try_place(bucket, fp) {
                trace!(kicks = kick + 1, bucket, "eviction walk placed fingerprint");
                return Ok(());
            }
        }

        let victim = VictimRecord {
            fingerprint: fp,
            h1: bucket,
            h2: self.hasher.alternate_index(bucket, fp),
            used: true,
        };
        self.image.set_victim(victim);
        trace!(
            kicks = max_kicks,
            fingerprint = fp,
            bucket,
            "eviction walk exhausted, fingerprint parked in victim slot"
        );

        Err(CuckooError::Full {
            attempts: max_kicks,
        })
    }

    /// Query a key, returning the fingerprint and candidate buckets used.
    pub fn lookup(&self, key: &[u8]) -> LookupResult {
        let (fp, h1, h2) = self.hasher.candidates(key);

        let found = self.image.bucket_contains(h1, fp)
            || self.image.bucket_contains(h2, fp)
            || self.image.victim().matches(fp, h1, h2);

        LookupResult {
            found,
            fingerprint: fp,
            h1,
            h2,
        }
    }

    /// Check if a key might be in the filter.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.lookup(key).found
    }

    /// Remove one copy of a key's fingerprint.
    ///
    /// Another key sharing the fingerprint and buckets may lose its copy
    /// instead; the filter cannot tell them apart.
    pub fn remove(&mut self, key: &[u8]) -> Result<()> {
        let fp = self.hasher.fingerprint(key);
        let h1 = self.hasher.primary_index(key);

        if self.image.clear_first(h1, fp) {
            self.rehome_victim();
            return Ok(());
        }

        let h2 = self.hasher.alternate_index(h1, fp);
        if self.image.clear_first(h2, fp) {
            self.rehome_victim();
            return Ok(());
        }

        if self.image.victim().matches(fp, h1, h2) {
            self.image.clear_victim();
            return Ok(());
        }

        Err(CuckooError::NotFound)
    }

    /// Try to move a parked victim back into the bucket array.
    fn rehome_victim(&mut self) {
        let victim = self.image.victim();
        if !victim.used {
            return;
        }

        self.image.clear_victim();
        let rehomed = self.place(victim.fingerprint, victim.h1).is_ok();
        trace!(rehomed, fingerprint = victim.fingerprint, "victim re-home attempted");
    }

    /// Zero every nest and the victim slot, keeping the geometry.
    pub fn clear(&mut self) {
        self.image.zero_buckets();
        self.image.clear_victim();
    }

    /// Total size of the owned image in bytes.
    pub fn mem_size(&self) -> usize {
        self.image.mem_size()
    }

    /// Size of the nest array in bytes.
    pub fn array_mem_size(&self) -> usize {
        self.image.array_mem_size()
    }

    pub fn bucket_count(&self) -> u32 {
        self.image.bucket_count()
    }

    pub fn nests_per_bucket(&self) -> u32 {
        self.image.nests_per_bucket()
    }

    pub fn mask(&self) -> u32 {
        self.image.mask()
    }

    pub fn max_kick_attempts(&self) -> u32 {
        self.image.max_kick_attempts()
    }

    pub fn seed(&self) -> u32 {
        self.image.seed()
    }

    /// Whether an eviction walk has parked a fingerprint outside the buckets.
    pub fn has_victim(&self) -> bool {
        self.image.victim().used
    }

    /// Number of occupied nests (victim slot excluded).
    pub fn occupied_nests(&self) -> usize {
        self.image.occupied_nests()
    }

    /// Get load factor.
    pub fn load_factor(&self) -> f64 {
        self.occupied_nests() as f64 / (self.bucket_count() as usize * NESTS_PER_BUCKET) as f64
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_nests() == 0 && !self.has_victim()
    }

    /// Hex dump of the whole image.
    pub fn hex_dump(&self, label: &str) -> String {
        self.image.hex_dump(label)
    }

    pub(crate) fn image(&self) -> &FilterImage {
        &self.image
    }

    pub(crate) fn image_mut(&mut self) -> &mut FilterImage {
        &mut self.image
    }
}
