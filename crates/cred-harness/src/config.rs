//! Harness configuration from environment variables.

use crate::domain::seed::CANONICAL_ENCODED_LEN;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Largest accepted scratch encode buffer (1 MiB).
pub const MAX_ENCODE_CAPACITY: usize = 1 << 20;

/// Default scratch encode buffer capacity.
pub const DEFAULT_ENCODE_CAPACITY: usize = 4096;

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Scratch buffer capacity outside the accepted range
    #[error("encode capacity {capacity} outside [{min}, {max}]")]
    InvalidEncodeCapacity {
        /// Configured capacity
        capacity: usize,
        /// Smallest accepted capacity
        min: usize,
        /// Largest accepted capacity
        max: usize,
    },

    /// Log filter directive rejected by `EnvFilter`
    #[error("invalid log filter {filter:?}: {reason}")]
    InvalidLogFilter {
        /// Configured filter
        filter: String,
        /// Parser message
        reason: String,
    },
}

/// Harness configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Capacity of the scratch buffer the mutator re-encodes into
    pub encode_capacity: usize,

    /// Drop parameter sets whose authenticator data the credential object
    /// rejects
    pub gate_authdata: bool,

    /// Initialize the credential library with debug logging
    pub debug: bool,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            encode_capacity: DEFAULT_ENCODE_CAPACITY,
            gate_authdata: false,
            debug: false,
            log_level: "warn".to_string(),
            json_logs: false,
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| v.to_lowercase() == "true" || v == "1")
}

impl HarnessConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CRED_FUZZ_ENCODE_CAPACITY`: scratch buffer capacity (default: 4096)
    /// - `CRED_FUZZ_GATE_AUTHDATA`: enable the authenticator-data gate (default: false)
    /// - `CRED_FUZZ_DEBUG`: library debug logging (default: false)
    /// - `CRED_FUZZ_LOG_LEVEL` or `RUST_LOG`: log level (default: warn)
    /// - `CRED_FUZZ_JSON_LOGS`: JSON logs (default: false)
    ///
    /// Unparseable values fall back to the default; range checks are left
    /// to [`HarnessConfig::validate`].
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            encode_capacity: env::var("CRED_FUZZ_ENCODE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.encode_capacity),

            gate_authdata: env_flag("CRED_FUZZ_GATE_AUTHDATA").unwrap_or(defaults.gate_authdata),

            debug: env_flag("CRED_FUZZ_DEBUG").unwrap_or(defaults.debug),

            log_level: env::var("CRED_FUZZ_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: env_flag("CRED_FUZZ_JSON_LOGS").unwrap_or(defaults.json_logs),
        }
    }

    /// Validate ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The fallback seed must always fit in the scratch buffer.
        if !(CANONICAL_ENCODED_LEN..=MAX_ENCODE_CAPACITY).contains(&self.encode_capacity) {
            return Err(ConfigError::InvalidEncodeCapacity {
                capacity: self.encode_capacity,
                min: CANONICAL_ENCODED_LEN,
                max: MAX_ENCODE_CAPACITY,
            });
        }
        Ok(())
    }

    /// Builder-style method to set the scratch buffer capacity
    pub fn with_encode_capacity(mut self, capacity: usize) -> Self {
        self.encode_capacity = capacity;
        self
    }

    /// Builder-style method to toggle the authenticator-data gate
    pub fn with_gate_authdata(mut self, gate: bool) -> Self {
        self.gate_authdata = gate;
        self
    }

    /// Builder-style method to toggle library debug logging
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Builder-style method to set the log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Builder-style method to toggle JSON logs
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.encode_capacity, 4096);
        assert!(!config.gate_authdata);
        assert!(!config.debug);
        assert_eq!(config.log_level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_capacity_bounds() {
        let at_min = HarnessConfig::default().with_encode_capacity(CANONICAL_ENCODED_LEN);
        assert!(at_min.validate().is_ok());

        let below = HarnessConfig::default().with_encode_capacity(CANONICAL_ENCODED_LEN - 1);
        assert_eq!(
            below.validate(),
            Err(ConfigError::InvalidEncodeCapacity {
                capacity: CANONICAL_ENCODED_LEN - 1,
                min: CANONICAL_ENCODED_LEN,
                max: MAX_ENCODE_CAPACITY,
            })
        );

        let above = HarnessConfig::default().with_encode_capacity(MAX_ENCODE_CAPACITY + 1);
        assert!(above.validate().is_err());
    }

    #[test]
    fn test_builders() {
        let config = HarnessConfig::default()
            .with_gate_authdata(true)
            .with_debug(true)
            .with_log_level("trace")
            .with_json_logs(true);
        assert!(config.gate_authdata);
        assert!(config.debug);
        assert_eq!(config.log_level, "trace");
        assert!(config.json_logs);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = HarnessConfig::default().with_gate_authdata(true);
        let json = serde_json::to_string(&config).unwrap();
        let back: HarnessConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
