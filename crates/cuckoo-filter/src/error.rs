//! Error types for the cuckoo filter

use thiserror::Error;

/// Errors that can occur while building, mutating or persisting a filter
#[derive(Debug, Error)]
pub enum CuckooError {
    #[error("Key not found")]
    NotFound,

    #[error("Filter image not found: {location}")]
    ImageNotFound { location: String },

    #[error("Filter is full: eviction gave up after {attempts} kick attempts")]
    Full { attempts: u32 },

    #[error("Allocation failed: could not reserve {bytes} bytes")]
    AllocationFailed { bytes: usize },

    #[error("Corrupt filter image: {0}")]
    CorruptImage(String),

    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, CuckooError>;
