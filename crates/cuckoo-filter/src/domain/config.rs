//! Cuckoo filter configuration and validation
//!
//! # Example
//!
//! ```
//! use cuckoo_filter::domain::CuckooConfigBuilder;
//!
//! let config = CuckooConfigBuilder::new()
//!     .capacity(10_000)
//!     .max_kick_attempts(500)
//!     .seed(7)
//!     .build()
//!     .expect("Valid config");
//! assert_eq!(config.capacity, 10_000);
//! ```

use std::env;

use serde::{Deserialize, Serialize};

use super::parameters::MAX_CAPACITY;
use crate::error::CuckooError;

/// Cuckoo filter configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuckooConfig {
    /// Expected number of keys (drives bucket count)
    pub capacity: usize,
    /// Eviction walk bound per insertion
    pub max_kick_attempts: u32,
    /// Seed for hashing and for the eviction generator
    pub seed: u32,
}

impl Default for CuckooConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            max_kick_attempts: 500,
            seed: 0,
        }
    }
}

impl CuckooConfig {
    /// Create a new configuration with validation
    pub fn new(capacity: usize, max_kick_attempts: u32, seed: u32) -> Result<Self, CuckooError> {
        let config = Self {
            capacity,
            max_kick_attempts,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CUCKOO_CAPACITY`: expected key count (default: 1024)
    /// - `CUCKOO_MAX_KICKS`: eviction attempts per insert (default: 500)
    /// - `CUCKOO_SEED`: hash and eviction seed (default: 0)
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            capacity: env::var("CUCKOO_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.capacity),

            max_kick_attempts: env::var("CUCKOO_MAX_KICKS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_kick_attempts),

            seed: env::var("CUCKOO_SEED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.seed),
        }
    }

    /// Validate configuration bounds
    pub fn validate(&self) -> Result<(), CuckooError> {
        if self.capacity == 0 {
            return Err(CuckooError::InvalidParameters(
                "capacity cannot be 0".to_string(),
            ));
        }

        if self.capacity > MAX_CAPACITY {
            return Err(CuckooError::InvalidParameters(format!(
                "capacity {} exceeds maximum {}",
                self.capacity, MAX_CAPACITY
            )));
        }

        if self.max_kick_attempts == 0 {
            return Err(CuckooError::InvalidParameters(
                "max_kick_attempts cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder-style method to set capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builder-style method to set the seed
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}

/// Builder for CuckooConfig with validation
#[derive(Default)]
pub struct CuckooConfigBuilder {
    capacity: Option<usize>,
    max_kick_attempts: Option<u32>,
    seed: Option<u32>,
}

impl CuckooConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expected number of keys
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set the eviction walk bound
    pub fn max_kick_attempts(mut self, attempts: u32) -> Self {
        self.max_kick_attempts = Some(attempts);
        self
    }

    /// Set the hash and eviction seed
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the CuckooConfig, validating all parameters
    pub fn build(self) -> Result<CuckooConfig, CuckooError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation (for internal use only)
    pub fn build_unchecked(self) -> CuckooConfig {
        let defaults = CuckooConfig::default();

        CuckooConfig {
            capacity: self.capacity.unwrap_or(defaults.capacity),
            max_kick_attempts: self.max_kick_attempts.unwrap_or(defaults.max_kick_attempts),
            seed: self.seed.unwrap_or(defaults.seed),
        }
    }
}
