//! # Harness Service
//!
//! Implements [`HarnessApi`] over a credential backend and a byte mutator.

use crate::adapters::FidoBackend;
use crate::config::{ConfigError, HarnessConfig};
use crate::domain::params::ParamSet;
use crate::driver::{self, DriveReport};
use crate::mutator::StructureMutator;
use crate::ports::inbound::HarnessApi;
use crate::ports::outbound::{ByteMutator, CredentialBackend, CredentialObject};
use tracing::{debug, trace};

/// Fuzzing harness.
#[derive(Debug)]
pub struct HarnessService<B: CredentialBackend, M: ByteMutator> {
    config: HarnessConfig,
    backend: B,
    bytes: M,
    mutator: StructureMutator,
}

/// Harness over the `fido-cred` library.
pub type FidoHarness<M> = HarnessService<FidoBackend, M>;

impl<B: CredentialBackend, M: ByteMutator> HarnessService<B, M> {
    /// Create a harness after validating `config`.
    pub fn new(config: HarnessConfig, backend: B, bytes: M) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            encode_capacity = config.encode_capacity,
            gate_authdata = config.gate_authdata,
            "harness configured"
        );
        let mutator = StructureMutator::new(config.encode_capacity);
        Ok(Self {
            config,
            backend,
            bytes,
            mutator,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Credential backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Decode `data` and drive it, returning what the drive observed.
    /// `None` when `data` does not decode.
    pub fn run(&self, data: &[u8]) -> Option<DriveReport> {
        match ParamSet::decode(data) {
            Ok(params) => Some(driver::drive(&self.backend, &params)),
            Err(e) => {
                trace!(len = data.len(), error = %e, "input does not decode");
                None
            }
        }
    }
}

impl<M: ByteMutator> HarnessService<FidoBackend, M> {
    /// Harness over `fido-cred`, honoring `config.debug`.
    pub fn fido(config: HarnessConfig, bytes: M) -> Result<Self, ConfigError> {
        let backend = FidoBackend::with_debug(config.debug);
        Self::new(config, backend, bytes)
    }
}

/// Whether a fresh credential accepts the authenticator data of `params`.
fn authdata_accepted<B: CredentialBackend>(backend: &B, params: &ParamSet) -> bool {
    backend.init();
    let mut cred = backend.new_credential();
    cred.set_type(params.algorithm()).is_ok()
        && cred.set_authdata(params.authdata.as_slice()).is_ok()
}

impl<B: CredentialBackend, M: ByteMutator> HarnessApi for HarnessService<B, M> {
    fn test_one_input(&self, data: &[u8]) {
        let _ = self.run(data);
    }

    fn custom_mutate(
        &mut self,
        data: &mut [u8],
        size: usize,
        max_size: usize,
        seed: u32,
    ) -> usize {
        self.bytes.reseed(seed);
        let gate = self.config.gate_authdata;
        let backend = &self.backend;
        self.mutator
            .mutate(data, size, max_size, &mut self.bytes, |params| {
                !gate || authdata_accepted(backend, params)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::SeededMutator;
    use crate::domain::seed;

    fn harness(config: HarnessConfig) -> FidoHarness<SeededMutator> {
        HarnessService::fido(config, SeededMutator::new(0)).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = HarnessConfig::default().with_encode_capacity(16);
        assert!(HarnessService::fido(config, SeededMutator::new(0)).is_err());
    }

    #[test]
    fn test_run_seed() {
        let h = harness(HarnessConfig::default());
        let report = h.run(&seed::canonical().to_vec().unwrap()).unwrap();
        assert_eq!(report.pubkey_len, 64);
        assert_eq!(report.id_len, 64);
    }

    #[test]
    fn test_run_garbage() {
        let h = harness(HarnessConfig::default());
        assert!(h.run(&[]).is_none());
        assert!(h.run(b"\x02garbage").is_none());
    }

    #[test]
    fn test_gated_outputs_carry_accepted_authdata() {
        let mut h = harness(HarnessConfig::default().with_gate_authdata(true));
        let backend = FidoBackend::default();
        let seed = seed::canonical().to_vec().unwrap();
        let mut data = vec![0u8; 4096];

        for round in 0..200u32 {
            data[..seed.len()].copy_from_slice(&seed);
            let n = h.custom_mutate(&mut data, seed.len(), 4096, round);
            if n > 0 {
                let params = ParamSet::decode(&data[..n]).unwrap();
                assert!(authdata_accepted(&backend, &params));
            }
        }
    }
}
