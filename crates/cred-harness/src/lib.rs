//! # cred-harness
//!
//! Structure-aware fuzzing harness for FIDO2 credential creation.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `BoundedBytes` / `BoundedText`: fixed-capacity field storage
//!   - `Reader` / `Writer`: TLV field codec
//!   - `ParamSet`: the eleven-field record and its codec
//!   - `seed::canonical`: hard-coded valid parameter set
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `HarnessApi`: Driving port (fuzzing engine entry points)
//!   - `CredentialBackend` / `CredentialObject`: Driven port (library under test)
//!   - `ByteMutator`: Driven port (leaf byte mutation)
//!
//! - **Service Layer** (`service.rs`, `mutator.rs`, `driver.rs`)
//!   - `HarnessService`: Implements `HarnessApi`
//!
//! - **Adapters Layer** (`adapters/`)
//!   - `FidoBackend`: drives `fido-cred`
//!   - `SeededMutator`: `rand`-backed byte mutator for offline use
//!
//! ## Wire Format
//!
//! Eleven fields in fixed order, each `tag(1)` then:
//!
//! | kind | body |
//! |------|------|
//! | bool | 1 byte, nonzero is true |
//! | int  | i32 little-endian |
//! | blob / text | u16 little-endian length, content |
//!
//! Bytes after the final field are ignored.
//!
//! ## Usage Example
//!
//! ```ignore
//! use cred_harness::{FidoHarness, HarnessApi, HarnessConfig, SeededMutator};
//!
//! let config = HarnessConfig::from_env();
//! cred_harness::telemetry::init_logging(&config)?;
//! let mut harness = FidoHarness::fido(config, SeededMutator::new(1))?;
//!
//! let mut buf = vec![0u8; 4096];
//! let n = harness.custom_mutate(&mut buf, 0, 4096, 7);
//! harness.test_one_input(&buf[..n]);
//! ```

#![warn(missing_docs)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod driver;
pub mod mutator;
pub mod ports;
pub mod service;
pub mod telemetry;

pub use adapters::{FidoBackend, SeededMutator};
pub use config::{ConfigError, HarnessConfig};
pub use domain::errors::CodecError;
pub use domain::params::{Algorithm, Format, ParamSet, CDH_LEN, MAX_BLOB, MAX_STR};
pub use driver::{drive, DriveReport};
pub use mutator::{mutate_fields, StructureMutator};
pub use ports::inbound::HarnessApi;
pub use ports::outbound::{ByteMutator, CredentialBackend, CredentialObject};
pub use service::{FidoHarness, HarnessService};
