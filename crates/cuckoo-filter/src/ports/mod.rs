//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for external callers
//! - Driven Ports (outbound) - Storage for persisted filter images

pub mod inbound;
pub mod outbound;

pub use inbound::CuckooFilterApi;
pub use outbound::{ImageStore, InMemoryImageStore};
