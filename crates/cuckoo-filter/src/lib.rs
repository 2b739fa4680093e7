//! # Cuckoo Filter
//!
//! Approximate set membership with deletion, stored as a single
//! relocatable memory image that can be checkpointed to disk and restored.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure filter logic, no I/O
//!   - `CuckooFilter`: Buckets of four 16-bit nests, eviction walk, victim slot
//!   - `FilterImage`: Owned header + bucket array, the unit of persistence
//!   - `HashEngine`: Seeded MurmurHash3 index and fingerprint derivation
//!   - `CuckooConfig` / `CuckooConfigBuilder`: Configuration with validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `CuckooFilterApi`: Driving port (inbound API)
//!   - `ImageStore`: Driven port (where images are written and read)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `CuckooFilterService`: Implements `CuckooFilterApi` with metrics and logging
//!
//! - **Adapters Layer** (`adapters/`): External connections
//!   - `FileImageStore`: Persists images to the filesystem
//!
//! ## Invariants
//!
//! - **No false negatives**: a key whose insert returned `Ok` (and was not
//!   removed since) is always reported present.
//! - **Deterministic**: the same seed and operation sequence yield the same
//!   image, byte for byte.
//! - Fingerprint 0 marks an empty nest and never represents a key.
//!
//! ## Usage Example
//!
//! ```
//! use cuckoo_filter::CuckooFilter;
//!
//! let mut filter = CuckooFilter::create(1024, 500, 0)?;
//! filter.insert(b"alice")?;
//!
//! assert!(filter.contains(b"alice"));
//! filter.remove(b"alice")?;
//! assert!(!filter.contains(b"alice"));
//! # Ok::<(), cuckoo_filter::CuckooError>(())
//! ```
//!
//! ## Checkpointing
//!
//! ```no_run
//! use cuckoo_filter::CuckooFilter;
//!
//! let mut filter = CuckooFilter::create(10_000, 500, 42)?;
//! filter.insert(b"bob")?;
//!
//! // Writes the whole image, then empties the buckets in place
//! filter.store_and_clear("/var/lib/app/cf_0.cuckoo")?;
//!
//! let restored = CuckooFilter::load("/var/lib/app/cf_0.cuckoo")?;
//! assert!(restored.contains(b"bob"));
//! # Ok::<(), cuckoo_filter::CuckooError>(())
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod persistence;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::FileImageStore;
pub use domain::{CuckooConfig, CuckooConfigBuilder, CuckooFilter, FilterImage, LookupResult};
pub use error::{CuckooError, Result};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{CuckooFilterApi, ImageStore, InMemoryImageStore};
pub use service::CuckooFilterService;
