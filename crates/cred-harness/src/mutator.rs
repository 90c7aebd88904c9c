//! # Structure-Aware Mutator
//!
//! Decodes an input, mutates every field in its native representation and
//! re-encodes, so outputs stay well-formed TLV. Undecodable inputs are
//! replaced by the canonical seed.

use crate::domain::params::ParamSet;
use crate::domain::seed;
use crate::ports::outbound::ByteMutator;
use tracing::trace;

/// Owns the scratch buffer outputs are encoded into before being copied
/// back to the engine's buffer.
#[derive(Debug)]
pub struct StructureMutator {
    scratch: Box<[u8]>,
}

impl StructureMutator {
    /// Mutator with a scratch buffer of `capacity` bytes, raised to the
    /// encoded seed length if smaller.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(seed::CANONICAL_ENCODED_LEN);
        Self {
            scratch: vec![0u8; capacity].into_boxed_slice(),
        }
    }

    /// Scratch buffer capacity.
    pub fn capacity(&self) -> usize {
        self.scratch.len()
    }

    /// Mutate `data[..size]` in place and return the new length.
    ///
    /// `accept` filters parameter sets: a decoded input it refuses is treated
    /// as undecodable, and a refused mutation is dropped. Returns 0, leaving
    /// `data` untouched, when the mutation does not re-encode within
    /// `max_size` bytes. Never writes past `min(max_size, data.len())`.
    pub fn mutate<M, F>(
        &mut self,
        data: &mut [u8],
        size: usize,
        max_size: usize,
        bytes: &mut M,
        accept: F,
    ) -> usize
    where
        M: ByteMutator,
        F: Fn(&ParamSet) -> bool,
    {
        let max_size = max_size.min(data.len());
        let size = size.min(data.len());

        let mut params = match ParamSet::decode(&data[..size]) {
            Ok(p) if accept(&p) => p,
            Ok(_) => {
                trace!(size, "input refused, emitting seed");
                return self.emit_seed(data, max_size);
            }
            Err(e) => {
                trace!(size, error = %e, "undecodable input, emitting seed");
                return self.emit_seed(data, max_size);
            }
        };

        mutate_fields(&mut params, bytes);

        if !accept(&params) {
            trace!("mutation refused");
            return 0;
        }
        let n = match params.encode(&mut self.scratch) {
            Ok(n) => n,
            Err(e) => {
                trace!(error = %e, "mutation does not re-encode");
                return 0;
            }
        };
        if n > max_size {
            trace!(n, max_size, "mutation exceeds max_size");
            return 0;
        }
        data[..n].copy_from_slice(&self.scratch[..n]);
        n
    }

    /// Write the canonical seed, truncated to `max_size` if needed.
    fn emit_seed(&mut self, data: &mut [u8], max_size: usize) -> usize {
        let n = match seed::canonical().encode(&mut self.scratch) {
            Ok(n) => n,
            Err(_) => return 0,
        };
        let n = n.min(max_size);
        data[..n].copy_from_slice(&self.scratch[..n]);
        n
    }
}

/// Mutate every field of `params` once through `bytes`.
///
/// Order: algorithm selector, extensions, rk, uv, format selector,
/// authenticator data, client data hash, certificate, signature, rp id,
/// rp name.
pub fn mutate_fields<M: ByteMutator>(params: &mut ParamSet, bytes: &mut M) {
    mutate_bool(&mut params.es256, bytes);
    mutate_int(&mut params.ext, bytes);
    mutate_bool(&mut params.rk, bytes);
    mutate_bool(&mut params.uv, bytes);
    mutate_bool(&mut params.packed, bytes);

    params
        .authdata
        .mutate_with(|buf, len| bytes.mutate(buf, len, buf.len()));
    params
        .cdh
        .mutate_with(|buf, len| bytes.mutate(buf, len, buf.len()));
    params
        .x509
        .mutate_with(|buf, len| bytes.mutate(buf, len, buf.len()));
    params
        .sig
        .mutate_with(|buf, len| bytes.mutate(buf, len, buf.len()));

    params
        .rp_id
        .mutate_with(|buf, len| bytes.mutate(buf, len, buf.len()));
    params
        .rp_name
        .mutate_with(|buf, len| bytes.mutate(buf, len, buf.len()));
}

fn mutate_bool<M: ByteMutator>(value: &mut bool, bytes: &mut M) {
    let mut b = [u8::from(*value)];
    bytes.mutate(&mut b, 1, 1);
    *value = b[0] != 0;
}

fn mutate_int<M: ByteMutator>(value: &mut i32, bytes: &mut M) {
    let mut b = value.to_le_bytes();
    bytes.mutate(&mut b, 4, 4);
    *value = i32::from_le_bytes(b);
}
