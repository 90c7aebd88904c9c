//! # Outbound Ports (Driven Ports / SPI)
//!
//! Capabilities the harness consumes but does not implement.

use crate::domain::params::{Algorithm, Format};
use std::fmt::Display;

/// Leaf byte-level mutation primitive.
pub trait ByteMutator {
    /// Mutate `data[..size]` in place, possibly growing it up to `max_size`
    /// bytes, and return the new size. Callers pass `max_size <= data.len()`.
    fn mutate(&mut self, data: &mut [u8], size: usize, max_size: usize) -> usize;

    /// Reseed before a mutation pass. Engines that own their randomness
    /// ignore this.
    fn reseed(&mut self, _seed: u32) {}
}

impl<M: ByteMutator + ?Sized> ByteMutator for &mut M {
    fn mutate(&mut self, data: &mut [u8], size: usize, max_size: usize) -> usize {
        (**self).mutate(data, size, max_size)
    }

    fn reseed(&mut self, seed: u32) {
        (**self).reseed(seed)
    }
}

/// A credential object of the library under test.
///
/// Dropping the object releases it.
pub trait CredentialObject {
    /// Library error type
    type Error: Display;

    /// Set the credential algorithm.
    fn set_type(&mut self, alg: Algorithm) -> Result<(), Self::Error>;
    /// Set the attestation format.
    fn set_fmt(&mut self, fmt: Format) -> Result<(), Self::Error>;
    /// Set the client data hash.
    fn set_clientdata_hash(&mut self, cdh: &[u8]) -> Result<(), Self::Error>;
    /// Set relying party id and name.
    fn set_rp(&mut self, id: &[u8], name: &[u8]) -> Result<(), Self::Error>;
    /// Set CBOR-wrapped authenticator data.
    fn set_authdata(&mut self, authdata: &[u8]) -> Result<(), Self::Error>;
    /// Set the extension bitmask.
    fn set_extensions(&mut self, ext: i32) -> Result<(), Self::Error>;
    /// Set resident-key and user-verification options.
    fn set_options(&mut self, rk: bool, uv: bool) -> Result<(), Self::Error>;
    /// Set the attestation certificate.
    fn set_x509(&mut self, der: &[u8]) -> Result<(), Self::Error>;
    /// Set the attestation signature.
    fn set_sig(&mut self, sig: &[u8]) -> Result<(), Self::Error>;

    /// Verify the credential.
    fn verify(&self) -> Result<(), Self::Error>;

    /// Credential public key bytes.
    fn pubkey(&self) -> &[u8];
    /// Credential id bytes.
    fn id(&self) -> &[u8];
}

/// The library under test.
pub trait CredentialBackend {
    /// Credential object type
    type Credential: CredentialObject;

    /// Process-wide initialization. Must be idempotent.
    fn init(&self);

    /// Construct a new credential object.
    fn new_credential(&self) -> Self::Credential;
}
