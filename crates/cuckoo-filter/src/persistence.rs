//! Checkpoint and restore of whole filter images
//!
//! The persisted form is the filter's memory image byte for byte: header
//! fields followed by the nest array, native byte order, no magic number,
//! version tag or checksum. Readers and writers must agree on the layout in
//! [`crate::domain::layout`].

use std::path::Path;

use tracing::debug;

use crate::adapters::FileImageStore;
use crate::domain::{CuckooFilter, FilterImage};
use crate::error::Result;
use crate::ports::ImageStore;

impl CuckooFilter {
    /// Write the full image to `store`, then empty the filter in place.
    ///
    /// The stored image keeps the victim record. In memory the nest array is
    /// zeroed and the victim slot released; the other header fields stay, so
    /// the filter keeps its geometry without reallocating.
    pub fn store_and_clear_into<S: ImageStore + ?Sized>(&mut self, store: &mut S) -> Result<()> {
        store.write_image(self.image().as_bytes())?;
        self.clear();

        debug!(
            location = %store.location(),
            bytes = self.mem_size(),
            "filter image stored, buckets cleared"
        );
        Ok(())
    }

    /// Restore a filter from the image held by `store`.
    ///
    /// # Errors
    /// - `ImageNotFound` if the store holds nothing
    /// - `AllocationFailed` if the image cannot be reserved
    /// - `CorruptImage` if the bytes are not a self-consistent image
    pub fn load_from<S: ImageStore + ?Sized>(store: &S) -> Result<Self> {
        let bytes = store.read_image()?;
        let image = FilterImage::from_bytes(&bytes)?;

        debug!(
            location = %store.location(),
            bytes = image.mem_size(),
            bucket_count = image.bucket_count(),
            "filter image loaded"
        );
        Ok(Self::from_image(image))
    }

    /// [`store_and_clear_into`](Self::store_and_clear_into) a file at `path`.
    pub fn store_and_clear<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.store_and_clear_into(&mut FileImageStore::new(path))
    }

    /// [`load_from`](Self::load_from) a file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_from(&FileImageStore::new(path))
    }
}
