//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Hash functions (index and fingerprint derivation)
//! - Image layout and the owned filter image (header + nested bucket array)
//! - Sizing parameters
//! - Configuration
//! - The cuckoo filter itself (insert, lookup, remove, victim slot)
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod config;
pub mod cuckoo;
pub mod hash_functions;
pub mod image;
pub mod layout;
pub mod parameters;

pub use config::{CuckooConfig, CuckooConfigBuilder};
pub use cuckoo::{CuckooFilter, LookupResult};
pub use hash_functions::{combined_hash, murmur_hash, HashEngine};
pub use image::FilterImage;
pub use layout::{Fingerprint, VictimRecord, FINGERPRINT_BITS, HEADER_BYTES, NESTS_PER_BUCKET};
pub use parameters::{bucket_count_for, calculate_parameters, CuckooFilterParams, MAX_CAPACITY};
