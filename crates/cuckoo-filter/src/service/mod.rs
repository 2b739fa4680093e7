//! Service Layer
//!
//! Wraps a filter with its image store and a metrics recorder, so callers
//! get instrumented operations and checkpoint/restore through one handle.

pub mod cuckoo_filter_service;

pub use cuckoo_filter_service::CuckooFilterService;
