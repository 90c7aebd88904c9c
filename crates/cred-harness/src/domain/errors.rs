//! # Codec Errors
//!
//! The two failure outcomes of the TLV codec. Decode failures are
//! deliberately indistinguishable: truncation, tag mismatch and bound
//! violations all mean "discard this input".

use thiserror::Error;

/// Errors produced by field and record encoding/decoding.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Input is truncated, carries an unexpected tag, or violates a field bound
    #[error("Malformed input")]
    MalformedInput,

    /// A field does not fit the destination buffer or its declared capacity
    #[error("Encode overflow")]
    EncodeOverflow,
}
