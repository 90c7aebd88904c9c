//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports.

pub mod fido;
pub mod rng_mutator;

pub use fido::FidoBackend;
pub use rng_mutator::SeededMutator;
