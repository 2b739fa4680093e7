//! Outbound Ports (Driven Ports)
//!
//! Dependencies required to persist and restore filter images.
//!
//! Production: `FileImageStore` (adapters/file_store.rs)
//! Testing: `InMemoryImageStore` (below)

use crate::error::CuckooError;

/// Abstract interface for storing one raw filter image.
///
/// Implementations store bytes verbatim; they never interpret the layout.
pub trait ImageStore {
    /// Replace the stored image with `image`.
    fn write_image(&mut self, image: &[u8]) -> Result<(), CuckooError>;

    /// Read the stored image.
    ///
    /// # Errors
    /// `ImageNotFound` if nothing has been stored.
    fn read_image(&self) -> Result<Vec<u8>, CuckooError>;

    /// Human-readable location used in logs and errors.
    fn location(&self) -> String;
}

/// In-memory image store for testing
#[derive(Debug, Default, Clone)]
pub struct InMemoryImageStore {
    image: Option<Vec<u8>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored bytes, if any.
    pub fn stored(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }
}

impl ImageStore for InMemoryImageStore {
    fn write_image(&mut self, image: &[u8]) -> Result<(), CuckooError> {
        self.image = Some(image.to_vec());
        Ok(())
    }

    fn read_image(&self) -> Result<Vec<u8>, CuckooError> {
        self.image.clone().ok_or_else(|| CuckooError::ImageNotFound {
            location: self.location(),
        })
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
