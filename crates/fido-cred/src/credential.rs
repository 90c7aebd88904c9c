//! # Credential Object
//!
//! Holds the parameters of a `makeCredential` response and verifies its
//! attestation statement.
//!
//! ## Verification order
//!
//! 1. Required parameters present (cdh, rp, authdata, x509, sig, fmt)
//! 2. Authenticator rp id hash matches SHA-256(rp id)
//! 3. User presence set; user verification set if requested
//! 4. Reported extensions equal requested extensions
//! 5. Attestation signature verifies under the certificate key

use crate::authdata::AuthData;
use crate::entities::{
    AttestationFormat, CoseAlgorithm, PublicKey, EXT_KNOWN, FLAG_UP, FLAG_UV,
};
use crate::errors::CredError;
use crate::init;
use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature, VerifyingKey};
use p256::pkcs8::DecodePublicKey;
use sha2::{Digest, Sha256};
use x509_parser::certificate::X509Certificate;
use x509_parser::prelude::FromDer;

/// A credential under construction.
#[derive(Debug, Default)]
pub struct Credential {
    alg: Option<CoseAlgorithm>,
    fmt: Option<AttestationFormat>,
    cdh: Vec<u8>,
    rp_id: Option<Vec<u8>>,
    rp_name: Vec<u8>,
    authdata: Option<AuthData>,
    pubkey: Vec<u8>,
    ext: i32,
    uv: bool,
    x509: Vec<u8>,
    sig: Vec<u8>,
}

fn reject<T>(op: &'static str, err: CredError) -> Result<T, CredError> {
    if init::debug_enabled() {
        tracing::debug!(op, error = %err, "credential parameter rejected");
    }
    Err(err)
}

impl Credential {
    /// Create an empty credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the credential algorithm.
    pub fn set_type(&mut self, alg: CoseAlgorithm) -> Result<(), CredError> {
        self.alg = Some(alg);
        Ok(())
    }

    /// Set the attestation format (`"packed"` or `"fido-u2f"`).
    pub fn set_fmt(&mut self, fmt: &str) -> Result<(), CredError> {
        match AttestationFormat::from_name(fmt) {
            Some(fmt) => {
                self.fmt = Some(fmt);
                Ok(())
            }
            None => reject("set_fmt", CredError::InvalidArgument("unknown format")),
        }
    }

    /// Set the client data hash.
    pub fn set_clientdata_hash(&mut self, cdh: &[u8]) -> Result<(), CredError> {
        if cdh.is_empty() {
            return reject("set_clientdata_hash", CredError::InvalidArgument("empty cdh"));
        }
        self.cdh = cdh.to_vec();
        Ok(())
    }

    /// Set the relying party id and display name.
    pub fn set_rp(&mut self, id: &[u8], name: &[u8]) -> Result<(), CredError> {
        self.rp_id = Some(id.to_vec());
        self.rp_name = name.to_vec();
        Ok(())
    }

    /// Set CBOR-wrapped authenticator data. The credential type must already
    /// be set; on failure any previous authenticator data is cleared.
    pub fn set_authdata(&mut self, cbor: &[u8]) -> Result<(), CredError> {
        self.authdata = None;
        self.pubkey.clear();

        let Some(alg) = self.alg else {
            return reject("set_authdata", CredError::InvalidArgument("type not set"));
        };
        match AuthData::parse(cbor, alg) {
            Ok(authdata) => {
                self.pubkey = authdata.credential.pubkey.to_raw();
                self.authdata = Some(authdata);
                Ok(())
            }
            Err(err) => reject("set_authdata", err),
        }
    }

    /// Set requested extension bits. Unknown bits are rejected.
    pub fn set_extensions(&mut self, ext: i32) -> Result<(), CredError> {
        if ext & !EXT_KNOWN != 0 {
            return reject("set_extensions", CredError::InvalidArgument("unknown extension"));
        }
        self.ext = ext;
        Ok(())
    }

    /// Set the resident-key and user-verification options. Only `uv` takes
    /// part in verification.
    pub fn set_options(&mut self, _rk: bool, uv: bool) -> Result<(), CredError> {
        self.uv = uv;
        Ok(())
    }

    /// Set the DER attestation certificate.
    pub fn set_x509(&mut self, der: &[u8]) -> Result<(), CredError> {
        if der.is_empty() {
            return reject("set_x509", CredError::InvalidArgument("empty certificate"));
        }
        self.x509 = der.to_vec();
        Ok(())
    }

    /// Set the DER attestation signature.
    pub fn set_sig(&mut self, sig: &[u8]) -> Result<(), CredError> {
        if sig.is_empty() {
            return reject("set_sig", CredError::InvalidArgument("empty signature"));
        }
        self.sig = sig.to_vec();
        Ok(())
    }

    /// Credential public key (`x‖y` for ES256, `n‖e` for RS256); empty until
    /// authenticator data has been accepted.
    pub fn pubkey(&self) -> &[u8] {
        &self.pubkey
    }

    /// Credential id; empty until authenticator data has been accepted.
    pub fn id(&self) -> &[u8] {
        self.authdata
            .as_ref()
            .map(|a| a.credential.id.as_slice())
            .unwrap_or(&[])
    }

    /// Relying party display name as set.
    pub fn rp_name(&self) -> &[u8] {
        &self.rp_name
    }

    /// Verify the attestation statement.
    pub fn verify(&self) -> Result<(), CredError> {
        let result = self.verify_inner();
        if let Err(err) = &result {
            if init::debug_enabled() {
                tracing::debug!(error = %err, "credential verification failed");
            }
        }
        result
    }

    fn verify_inner(&self) -> Result<(), CredError> {
        if self.cdh.is_empty() {
            return Err(CredError::InvalidArgument("cdh not set"));
        }
        let rp_id = self
            .rp_id
            .as_deref()
            .ok_or(CredError::InvalidArgument("rp not set"))?;
        let authdata = self
            .authdata
            .as_ref()
            .ok_or(CredError::InvalidArgument("authdata not set"))?;
        if self.x509.is_empty() || self.sig.is_empty() {
            return Err(CredError::InvalidArgument("attestation statement incomplete"));
        }
        let fmt = self.fmt.ok_or(CredError::InvalidArgument("fmt not set"))?;

        let rp_id_hash: [u8; 32] = Sha256::digest(rp_id).into();
        if rp_id_hash != authdata.rp_id_hash {
            return Err(CredError::RpIdMismatch);
        }

        let flags = authdata.flags;
        if flags & FLAG_UP == 0 || (self.uv && flags & FLAG_UV == 0) {
            return Err(CredError::FlagsMismatch { flags });
        }

        if authdata.extensions != self.ext {
            return Err(CredError::ExtensionsMismatch {
                requested: self.ext,
                reported: authdata.extensions,
            });
        }

        let message = match fmt {
            AttestationFormat::Packed => [authdata.raw.as_slice(), self.cdh.as_slice()].concat(),
            AttestationFormat::FidoU2f => u2f_message(authdata, &self.cdh)?,
        };

        let (_, cert) = X509Certificate::from_der(&self.x509)
            .map_err(|_| CredError::InvalidCertificate("malformed certificate"))?;
        let key = VerifyingKey::from_public_key_der(cert.public_key().raw)
            .map_err(|_| CredError::InvalidCertificate("unsupported subject public key"))?;
        let sig = Signature::from_der(&self.sig).map_err(|_| CredError::InvalidSignature)?;

        key.verify(&message, &sig)
            .map_err(|_| CredError::InvalidSignature)
    }
}

/// U2F registration message: `0x00 | rpIdHash | cdh | credId | 0x04 | x | y`.
fn u2f_message(authdata: &AuthData, cdh: &[u8]) -> Result<Vec<u8>, CredError> {
    let PublicKey::Es256 { x, y } = &authdata.credential.pubkey else {
        return Err(CredError::UnsupportedAlgorithm(
            CoseAlgorithm::Rs256.cose_value(),
        ));
    };
    let id = &authdata.credential.id;

    let mut message = Vec::with_capacity(1 + 32 + cdh.len() + id.len() + 65);
    message.push(0x00);
    message.extend_from_slice(&authdata.rp_id_hash);
    message.extend_from_slice(cdh);
    message.extend_from_slice(id);
    message.push(0x04);
    message.extend_from_slice(x);
    message.extend_from_slice(y);
    Ok(message)
}
