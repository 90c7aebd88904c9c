//! # Domain Layer
//!
//! The TLV codec, the parameter set and the canonical seed. No I/O and no
//! dependency on the credential library.

pub mod bounded;
pub mod errors;
pub mod field;
pub mod params;
pub mod seed;
