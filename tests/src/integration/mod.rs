//! # Integration Scenarios
//!
//! - `scenarios`: load/lookup behaviour at 80% load and past capacity
//! - `persistence`: checkpoint and restore through real files
//! - `service_flow`: the instrumented service over both image stores

pub mod persistence;
pub mod scenarios;
pub mod service_flow;
