//! # FIDO Cred - Credential Creation Verification
//!
//! Credential object for the FIDO2 `makeCredential` flow: collects the
//! parameters returned by an authenticator and verifies the attestation.
//!
//! ## Components
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `credential` | Setters, accessors and `verify` |
//! | `authdata` | CBOR authenticator data, COSE keys, extensions |
//! | `init` | Process-wide, idempotent initialization |
//!
//! ## Supported Attestation
//!
//! - **packed**: ECDSA P-256 signature over `authdata ‖ cdh`
//! - **fido-u2f**: ECDSA P-256 signature over the U2F registration message

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod authdata;
pub mod credential;
pub mod entities;
pub mod errors;
pub mod init;

// Re-exports
pub use authdata::{AttestedCredential, AuthData};
pub use credential::Credential;
pub use entities::{
    AttestationFormat, CoseAlgorithm, PublicKey, EXT_CRED_PROTECT, EXT_HMAC_SECRET, EXT_KNOWN,
    FLAG_AT, FLAG_ED, FLAG_UP, FLAG_UV,
};
pub use errors::CredError;
pub use init::{init, is_initialized, InitFlags};
