//! # fido-cred Adapter
//!
//! Binds the outbound credential ports to the `fido-cred` library.

use crate::domain::params::{Algorithm, Format};
use crate::ports::outbound::{CredentialBackend, CredentialObject};
use fido_cred::{CoseAlgorithm, CredError, Credential, InitFlags};

/// Backend driving `fido_cred::Credential`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FidoBackend {
    flags: InitFlags,
}

impl FidoBackend {
    /// Backend passing `flags` to the library initialization.
    pub fn new(flags: InitFlags) -> Self {
        Self { flags }
    }

    /// Backend with debug logging of rejected parameters when `debug` is set.
    pub fn with_debug(debug: bool) -> Self {
        Self::new(if debug {
            InitFlags::DEBUG
        } else {
            InitFlags::NONE
        })
    }
}

impl CredentialBackend for FidoBackend {
    type Credential = Credential;

    fn init(&self) {
        fido_cred::init(self.flags);
    }

    fn new_credential(&self) -> Credential {
        Credential::new()
    }
}

impl CredentialObject for Credential {
    type Error = CredError;

    fn set_type(&mut self, alg: Algorithm) -> Result<(), CredError> {
        Credential::set_type(
            self,
            match alg {
                Algorithm::Es256 => CoseAlgorithm::Es256,
                Algorithm::Rs256 => CoseAlgorithm::Rs256,
            },
        )
    }

    fn set_fmt(&mut self, fmt: Format) -> Result<(), CredError> {
        Credential::set_fmt(self, fmt.name())
    }

    fn set_clientdata_hash(&mut self, cdh: &[u8]) -> Result<(), CredError> {
        Credential::set_clientdata_hash(self, cdh)
    }

    fn set_rp(&mut self, id: &[u8], name: &[u8]) -> Result<(), CredError> {
        Credential::set_rp(self, id, name)
    }

    fn set_authdata(&mut self, authdata: &[u8]) -> Result<(), CredError> {
        Credential::set_authdata(self, authdata)
    }

    fn set_extensions(&mut self, ext: i32) -> Result<(), CredError> {
        Credential::set_extensions(self, ext)
    }

    fn set_options(&mut self, rk: bool, uv: bool) -> Result<(), CredError> {
        Credential::set_options(self, rk, uv)
    }

    fn set_x509(&mut self, der: &[u8]) -> Result<(), CredError> {
        Credential::set_x509(self, der)
    }

    fn set_sig(&mut self, sig: &[u8]) -> Result<(), CredError> {
        Credential::set_sig(self, sig)
    }

    fn verify(&self) -> Result<(), CredError> {
        Credential::verify(self)
    }

    fn pubkey(&self) -> &[u8] {
        Credential::pubkey(self)
    }

    fn id(&self) -> &[u8] {
        Credential::id(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed;

    #[test]
    fn test_seed_authdata_accepted_for_es256() {
        let backend = FidoBackend::default();
        backend.init();
        let mut cred = backend.new_credential();
        CredentialObject::set_type(&mut cred, Algorithm::Es256).unwrap();
        CredentialObject::set_authdata(&mut cred, &seed::AUTHDATA).unwrap();

        assert_eq!(CredentialObject::pubkey(&cred).len(), 64);
        assert_eq!(CredentialObject::id(&cred).len(), 64);
    }

    #[test]
    fn test_seed_authdata_rejected_for_rs256() {
        let backend = FidoBackend::default();
        let mut cred = backend.new_credential();
        CredentialObject::set_type(&mut cred, Algorithm::Rs256).unwrap();
        assert_eq!(
            CredentialObject::set_authdata(&mut cred, &seed::AUTHDATA),
            Err(CredError::UnsupportedAlgorithm(-7))
        );
    }

    #[test]
    fn test_format_names_accepted() {
        let mut cred = FidoBackend::default().new_credential();
        assert!(CredentialObject::set_fmt(&mut cred, Format::Packed).is_ok());
        assert!(CredentialObject::set_fmt(&mut cred, Format::FidoU2f).is_ok());
    }
}
