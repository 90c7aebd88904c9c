//! Fuzz target for the parameter-set codec.
//!
//! Arbitrary parameter sets must survive encode then decode unchanged, and
//! decoding raw bytes must never panic.
//!
//! ## Running
//!
//! ```bash
//! cd crates/cred-harness
//! cargo +nightly fuzz run fuzz_param_codec
//! ```

#![no_main]

use cred_harness::domain::bounded::{BoundedBytes, BoundedText};
use cred_harness::ParamSet;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    es256: bool,
    cdh: Vec<u8>,
    rp_id: Vec<u8>,
    rp_name: Vec<u8>,
    authdata: Vec<u8>,
    ext: i32,
    rk: bool,
    uv: bool,
    x509: Vec<u8>,
    sig: Vec<u8>,
    packed: bool,
    raw: Vec<u8>,
}

fn bytes<const N: usize>(v: &[u8]) -> BoundedBytes<N> {
    BoundedBytes::from_slice(&v[..v.len().min(N)]).expect("truncated to capacity")
}

fn text<const N: usize>(v: &[u8]) -> BoundedText<N> {
    let end = v.iter().position(|&b| b == 0).unwrap_or(v.len()).min(N - 1);
    BoundedText::from_bytes(&v[..end]).expect("NUL-free and within capacity")
}

fuzz_target!(|input: FuzzInput| {
    let _ = ParamSet::decode(&input.raw);

    let params = ParamSet {
        es256: input.es256,
        cdh: bytes(&input.cdh),
        rp_id: text(&input.rp_id),
        rp_name: text(&input.rp_name),
        authdata: bytes(&input.authdata),
        ext: input.ext,
        rk: input.rk,
        uv: input.uv,
        x509: bytes(&input.x509),
        sig: bytes(&input.sig),
        packed: input.packed,
    };

    let encoded = params.to_vec().expect("sized by encoded_len");
    assert_eq!(encoded.len(), params.encoded_len());
    assert_eq!(ParamSet::decode(&encoded), Ok(params));
});
