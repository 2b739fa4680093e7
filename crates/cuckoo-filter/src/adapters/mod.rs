//! Adapters Layer (Driven Adapters)
//!
//! Contains implementations of driven ports that connect to
//! external systems.
//!
//! ## Adapters
//!
//! - `FileImageStore` - Persists filter images to a file on disk

pub mod file_store;

pub use file_store::FileImageStore;
