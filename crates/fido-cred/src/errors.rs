//! Credential error types.

use thiserror::Error;

/// Errors returned by the credential object.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredError {
    /// A required argument is missing or empty
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A structured parameter could not be parsed
    #[error("Invalid parameter: {0}")]
    InvalidParam(&'static str),

    /// COSE algorithm is not supported or does not match the credential type
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(i64),

    /// CBOR decoding failed
    #[error("CBOR decoding failed: {0}")]
    Cbor(String),

    /// Relying-party id hash in authenticator data does not match the rp id
    #[error("Relying party id hash mismatch")]
    RpIdMismatch,

    /// Authenticator flags do not satisfy the requested options
    #[error("Flags mismatch: flags={flags:#04x}")]
    FlagsMismatch {
        /// Flags byte from the authenticator data
        flags: u8,
    },

    /// Extensions reported by the authenticator differ from those requested
    #[error("Extensions mismatch: requested {requested:#x}, authenticator {reported:#x}")]
    ExtensionsMismatch {
        /// Extension bits set on the credential
        requested: i32,
        /// Extension bits found in authenticator data
        reported: i32,
    },

    /// Attestation certificate could not be parsed
    #[error("Invalid certificate: {0}")]
    InvalidCertificate(&'static str),

    /// Attestation signature did not verify
    #[error("Invalid signature")]
    InvalidSignature,
}

impl<T: std::fmt::Debug> From<ciborium::de::Error<T>> for CredError {
    fn from(e: ciborium::de::Error<T>) -> Self {
        CredError::Cbor(format!("{e:?}"))
    }
}
