//! # Credential Entities
//!
//! Identifiers and constants shared by the credential object and its callers.

/// Authenticator data flag: user present.
pub const FLAG_UP: u8 = 0x01;
/// Authenticator data flag: user verified.
pub const FLAG_UV: u8 = 0x04;
/// Authenticator data flag: attested credential data included.
pub const FLAG_AT: u8 = 0x40;
/// Authenticator data flag: extension data included.
pub const FLAG_ED: u8 = 0x80;

/// Extension bit: `hmac-secret`.
pub const EXT_HMAC_SECRET: i32 = 0x01;
/// Extension bit: `credProtect`.
pub const EXT_CRED_PROTECT: i32 = 0x02;
/// All extension bits the credential object understands.
pub const EXT_KNOWN: i32 = EXT_HMAC_SECRET | EXT_CRED_PROTECT;

/// Length of the SHA-256 rp id hash at the start of authenticator data.
pub const RP_ID_HASH_LEN: usize = 32;
/// Length of the authenticator AAGUID.
pub const AAGUID_LEN: usize = 16;

/// COSE algorithm identifiers supported for credential creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoseAlgorithm {
    /// ECDSA P-256 with SHA-256
    Es256,
    /// RSASSA-PKCS1-v1_5 with SHA-256
    Rs256,
}

impl CoseAlgorithm {
    /// COSE algorithm value as it appears in a COSE key.
    pub fn cose_value(self) -> i64 {
        match self {
            CoseAlgorithm::Es256 => -7,
            CoseAlgorithm::Rs256 => -257,
        }
    }
}

/// Attestation statement formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttestationFormat {
    /// `packed` attestation (signature over authdata ‖ cdh)
    Packed,
    /// `fido-u2f` attestation (legacy U2F registration signature)
    FidoU2f,
}

impl AttestationFormat {
    /// Parse a format identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "packed" => Some(AttestationFormat::Packed),
            "fido-u2f" => Some(AttestationFormat::FidoU2f),
            _ => None,
        }
    }

    /// Format identifier string.
    pub fn name(self) -> &'static str {
        match self {
            AttestationFormat::Packed => "packed",
            AttestationFormat::FidoU2f => "fido-u2f",
        }
    }
}

/// Credential public key decoded from a COSE key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicKey {
    /// P-256 point coordinates
    Es256 {
        /// X coordinate
        x: [u8; 32],
        /// Y coordinate
        y: [u8; 32],
    },
    /// RSA modulus and exponent
    Rs256 {
        /// Modulus
        n: Vec<u8>,
        /// Public exponent
        e: Vec<u8>,
    },
}

impl PublicKey {
    /// Raw key bytes as exposed by the credential (`x‖y` or `n‖e`).
    pub fn to_raw(&self) -> Vec<u8> {
        match self {
            PublicKey::Es256 { x, y } => {
                let mut raw = Vec::with_capacity(64);
                raw.extend_from_slice(x);
                raw.extend_from_slice(y);
                raw
            }
            PublicKey::Rs256 { n, e } => {
                let mut raw = Vec::with_capacity(n.len() + e.len());
                raw.extend_from_slice(n);
                raw.extend_from_slice(e);
                raw
            }
        }
    }
}
