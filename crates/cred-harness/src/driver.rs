//! # Target Driver
//!
//! Pushes a decoded parameter set through the credential object.

use crate::domain::params::ParamSet;
use crate::ports::outbound::{CredentialBackend, CredentialObject};
use serde::Serialize;
use std::fmt::Display;
use std::hint::black_box;
use tracing::trace;

/// What a single drive observed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DriveReport {
    /// Verification failure, `None` when the credential verified
    pub verify_error: Option<String>,
    /// Length of the credential public key
    pub pubkey_len: usize,
    /// Length of the credential id
    pub id_len: usize,
}

impl DriveReport {
    /// Whether the credential verified.
    pub fn verified(&self) -> bool {
        self.verify_error.is_none()
    }
}

/// Construct a credential object from `params`, verify it and read back its
/// public key and id. Setter failures do not stop the drive.
pub fn drive<B: CredentialBackend>(backend: &B, params: &ParamSet) -> DriveReport {
    backend.init();
    let mut cred = backend.new_credential();

    step("type", cred.set_type(params.algorithm()));
    step("fmt", cred.set_fmt(params.format()));
    step("cdh", cred.set_clientdata_hash(params.cdh.as_slice()));
    step(
        "rp",
        cred.set_rp(params.rp_id.as_bytes(), params.rp_name.as_bytes()),
    );
    step("authdata", cred.set_authdata(params.authdata.as_slice()));
    step("extensions", cred.set_extensions(params.ext));
    step("options", cred.set_options(params.rk, params.uv));
    step("x509", cred.set_x509(params.x509.as_slice()));
    step("sig", cred.set_sig(params.sig.as_slice()));

    let verify_error = cred.verify().err().map(|e| e.to_string());
    trace!(verified = verify_error.is_none(), "verify");

    consume(cred.pubkey());
    consume(cred.id());

    DriveReport {
        verify_error,
        pubkey_len: cred.pubkey().len(),
        id_len: cred.id().len(),
    }
}

fn step<E: Display>(name: &'static str, result: Result<(), E>) {
    if let Err(e) = result {
        trace!(step = name, error = %e, "setter rejected");
    }
}

/// Touch every byte so reads of the library's buffers are not optimized out.
fn consume(bytes: &[u8]) {
    for b in bytes {
        black_box(*b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FidoBackend;
    use crate::domain::seed;

    #[test]
    fn test_canonical_seed_builds_credential() {
        let report = drive(&FidoBackend::default(), &seed::canonical());

        assert_eq!(report.pubkey_len, 64);
        assert_eq!(report.id_len, 64);
        // hmac-secret is requested but the authenticator data reports no
        // extensions.
        assert!(!report.verified());
    }

    #[test]
    fn test_default_params_build_nothing() {
        let report = drive(&FidoBackend::default(), &ParamSet::default());

        assert_eq!(report.pubkey_len, 0);
        assert_eq!(report.id_len, 0);
        assert!(!report.verified());
    }

    #[test]
    fn test_rs256_selector_rejects_seed_authdata() {
        let mut params = seed::canonical();
        params.es256 = false;
        let report = drive(&FidoBackend::default(), &params);

        assert_eq!(report.pubkey_len, 0);
        assert!(!report.verified());
    }
}
