//! Fuzz target for FIDO2 credential creation.
//!
//! Inputs are TLV-encoded parameter sets; the custom mutator keeps them
//! well-formed so the fuzzer spends its time inside the credential library
//! instead of the decoder.
//!
//! ## Running
//!
//! ```bash
//! cd crates/cred-harness
//! cargo run -p cred-corpus -- seed fuzz/corpus/fuzz_cred
//! cargo +nightly fuzz run fuzz_cred fuzz/corpus/fuzz_cred
//! ```
//!
//! `CRED_FUZZ_*` environment variables configure the harness.

#![no_main]

use cred_harness::{telemetry, ByteMutator, FidoHarness, HarnessApi, HarnessConfig};
use libfuzzer_sys::{fuzz_mutator, fuzz_target};
use std::cell::RefCell;

/// libFuzzer's own byte mutator. Its randomness is engine-owned, so the
/// seed is ignored.
struct LibFuzzerMutator;

impl ByteMutator for LibFuzzerMutator {
    fn mutate(&mut self, data: &mut [u8], size: usize, max_size: usize) -> usize {
        libfuzzer_sys::fuzzer_mutate(data, size, max_size)
    }
}

fn harness() -> FidoHarness<LibFuzzerMutator> {
    let config = HarnessConfig::from_env();
    let _ = telemetry::init_logging(&config);
    FidoHarness::fido(config, LibFuzzerMutator).expect("invalid CRED_FUZZ_* configuration")
}

thread_local! {
    static HARNESS: RefCell<FidoHarness<LibFuzzerMutator>> = RefCell::new(harness());
}

fuzz_target!(|data: &[u8]| {
    HARNESS.with(|h| h.borrow().test_one_input(data));
});

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    HARNESS.with(|h| h.borrow_mut().custom_mutate(data, size, max_size, seed))
});
