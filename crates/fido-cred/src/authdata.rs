//! # Authenticator Data
//!
//! Parses the CBOR byte string wrapping authenticator data returned by a
//! `makeCredential` operation:
//!
//! ```text
//! rpIdHash (32) | flags (1) | signCount (4, BE)
//!   | aaguid (16) | credIdLen (2, BE) | credId | COSE key      (flags & AT)
//!   | extensions map                                         (flags & ED)
//! ```

use crate::entities::{
    CoseAlgorithm, PublicKey, AAGUID_LEN, EXT_CRED_PROTECT, EXT_HMAC_SECRET, FLAG_AT, FLAG_ED,
    RP_ID_HASH_LEN,
};
use crate::errors::CredError;
use ciborium::value::Value;

// COSE key labels
const COSE_KTY: i128 = 1;
const COSE_ALG: i128 = 3;
const COSE_CRV_OR_N: i128 = -1;
const COSE_X_OR_E: i128 = -2;
const COSE_Y: i128 = -3;

const COSE_KTY_EC2: i128 = 2;
const COSE_KTY_RSA: i128 = 3;
const COSE_CRV_P256: i128 = 1;

const RSA_MODULUS_LEN: usize = 256;
const RSA_EXPONENT_LEN: usize = 3;

/// Attested credential data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttestedCredential {
    /// Authenticator model identifier
    pub aaguid: [u8; AAGUID_LEN],
    /// Credential id
    pub id: Vec<u8>,
    /// Credential public key
    pub pubkey: PublicKey,
}

/// Decoded authenticator data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthData {
    /// Raw authenticator data (the content of the CBOR byte string)
    pub raw: Vec<u8>,
    /// SHA-256 of the relying party id
    pub rp_id_hash: [u8; RP_ID_HASH_LEN],
    /// Flags byte
    pub flags: u8,
    /// Signature counter
    pub sign_count: u32,
    /// Attested credential data
    pub credential: AttestedCredential,
    /// Extension bits reported by the authenticator
    pub extensions: i32,
}

impl AuthData {
    /// Parse CBOR-wrapped authenticator data for a credential of type `alg`.
    pub fn parse(cbor: &[u8], alg: CoseAlgorithm) -> Result<Self, CredError> {
        let mut input = cbor;
        let raw = match ciborium::de::from_reader::<Value, _>(&mut input)? {
            Value::Bytes(raw) => raw,
            _ => return Err(CredError::InvalidParam("authdata is not a byte string")),
        };
        if !input.is_empty() {
            return Err(CredError::InvalidParam("trailing bytes after authdata"));
        }

        let mut body = raw.as_slice();
        let rp_id_hash = take_array::<RP_ID_HASH_LEN>(&mut body)?;
        let [flags] = take_array::<1>(&mut body)?;
        let sign_count = u32::from_be_bytes(take_array::<4>(&mut body)?);

        if flags & FLAG_AT == 0 {
            return Err(CredError::InvalidParam("missing attested credential data"));
        }
        let credential = parse_attested_credential(&mut body, alg)?;

        let extensions = if flags & FLAG_ED != 0 {
            parse_extensions(&mut body)?
        } else {
            0
        };

        if !body.is_empty() {
            return Err(CredError::InvalidParam("trailing bytes in authdata"));
        }

        Ok(Self {
            raw,
            rp_id_hash,
            flags,
            sign_count,
            credential,
            extensions,
        })
    }
}

fn take<'a>(input: &mut &'a [u8], n: usize) -> Result<&'a [u8], CredError> {
    if input.len() < n {
        return Err(CredError::InvalidParam("authdata truncated"));
    }
    let (head, tail) = input.split_at(n);
    *input = tail;
    Ok(head)
}

fn take_array<const N: usize>(input: &mut &[u8]) -> Result<[u8; N], CredError> {
    let mut out = [0u8; N];
    out.copy_from_slice(take(input, N)?);
    Ok(out)
}

fn parse_attested_credential(
    input: &mut &[u8],
    alg: CoseAlgorithm,
) -> Result<AttestedCredential, CredError> {
    let aaguid = take_array::<AAGUID_LEN>(input)?;
    let id_len = u16::from_be_bytes(take_array::<2>(input)?) as usize;
    let id = take(input, id_len)?.to_vec();
    let key = ciborium::de::from_reader::<Value, _>(&mut *input)?;
    let pubkey = decode_cose_key(&key, alg)?;

    Ok(AttestedCredential { aaguid, id, pubkey })
}

fn cose_lookup(entries: &[(Value, Value)], label: i128) -> Option<&Value> {
    entries.iter().find_map(|(k, v)| match k {
        Value::Integer(i) if i128::from(*i) == label => Some(v),
        _ => None,
    })
}

fn cose_int(entries: &[(Value, Value)], label: i128) -> Result<i128, CredError> {
    match cose_lookup(entries, label) {
        Some(Value::Integer(i)) => Ok(i128::from(*i)),
        _ => Err(CredError::InvalidParam("COSE key integer field missing")),
    }
}

fn cose_bytes(entries: &[(Value, Value)], label: i128) -> Result<&[u8], CredError> {
    match cose_lookup(entries, label) {
        Some(Value::Bytes(b)) => Ok(b),
        _ => Err(CredError::InvalidParam("COSE key byte field missing")),
    }
}

fn fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N], CredError> {
    bytes
        .try_into()
        .map_err(|_| CredError::InvalidParam("COSE key field has wrong length"))
}

/// Decode a COSE key, requiring its algorithm to match `alg`.
pub fn decode_cose_key(key: &Value, alg: CoseAlgorithm) -> Result<PublicKey, CredError> {
    let Value::Map(entries) = key else {
        return Err(CredError::InvalidParam("COSE key is not a map"));
    };

    let key_alg = cose_int(entries, COSE_ALG)?;
    if key_alg != i128::from(alg.cose_value()) {
        let reported = i64::try_from(key_alg).unwrap_or(i64::MIN);
        return Err(CredError::UnsupportedAlgorithm(reported));
    }

    match alg {
        CoseAlgorithm::Es256 => {
            if cose_int(entries, COSE_KTY)? != COSE_KTY_EC2
                || cose_int(entries, COSE_CRV_OR_N)? != COSE_CRV_P256
            {
                return Err(CredError::InvalidParam("COSE key is not EC2/P-256"));
            }
            Ok(PublicKey::Es256 {
                x: fixed::<32>(cose_bytes(entries, COSE_X_OR_E)?)?,
                y: fixed::<32>(cose_bytes(entries, COSE_Y)?)?,
            })
        }
        CoseAlgorithm::Rs256 => {
            if cose_int(entries, COSE_KTY)? != COSE_KTY_RSA {
                return Err(CredError::InvalidParam("COSE key is not RSA"));
            }
            let n = cose_bytes(entries, COSE_CRV_OR_N)?;
            let e = cose_bytes(entries, COSE_X_OR_E)?;
            if n.len() != RSA_MODULUS_LEN || e.len() != RSA_EXPONENT_LEN {
                return Err(CredError::InvalidParam("RSA key has wrong size"));
            }
            Ok(PublicKey::Rs256 {
                n: n.to_vec(),
                e: e.to_vec(),
            })
        }
    }
}

fn parse_extensions(input: &mut &[u8]) -> Result<i32, CredError> {
    let Value::Map(entries) = ciborium::de::from_reader::<Value, _>(&mut *input)? else {
        return Err(CredError::InvalidParam("extensions are not a map"));
    };

    let mut ext = 0;
    for (k, v) in &entries {
        let Value::Text(name) = k else {
            return Err(CredError::InvalidParam("extension key is not text"));
        };
        match (name.as_str(), v) {
            ("hmac-secret", Value::Bool(true)) => ext |= EXT_HMAC_SECRET,
            ("hmac-secret", Value::Bool(false)) => {}
            ("credProtect", Value::Integer(level)) => {
                if !(1..=3).contains(&i128::from(*level)) {
                    return Err(CredError::InvalidParam("credProtect level out of range"));
                }
                ext |= EXT_CRED_PROTECT;
            }
            ("hmac-secret", _) | ("credProtect", _) => {
                return Err(CredError::InvalidParam("extension value has wrong type"));
            }
            _ => tracing::trace!(extension = %name, "ignoring unknown extension"),
        }
    }
    Ok(ext)
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use super::*;

    pub fn cbor(value: &Value) -> Vec<u8> {
        let mut out = Vec::new();
        ciborium::ser::into_writer(value, &mut out).unwrap();
        out
    }

    pub fn es256_cose_key(x: [u8; 32], y: [u8; 32]) -> Value {
        Value::Map(vec![
            (Value::Integer(1.into()), Value::Integer(2.into())),
            (Value::Integer(3.into()), Value::Integer((-7).into())),
            (Value::Integer((-1).into()), Value::Integer(1.into())),
            (Value::Integer((-2).into()), Value::Bytes(x.to_vec())),
            (Value::Integer((-3).into()), Value::Bytes(y.to_vec())),
        ])
    }

    /// Build CBOR-wrapped authenticator data.
    pub fn build_authdata(
        rp_id_hash: [u8; 32],
        flags: u8,
        cred_id: &[u8],
        cose_key: &Value,
        extensions: Option<&Value>,
    ) -> Vec<u8> {
        let mut raw = Vec::new();
        raw.extend_from_slice(&rp_id_hash);
        raw.push(flags);
        raw.extend_from_slice(&7u32.to_be_bytes());
        raw.extend_from_slice(&[0xAA; AAGUID_LEN]);
        raw.extend_from_slice(&(cred_id.len() as u16).to_be_bytes());
        raw.extend_from_slice(cred_id);
        raw.extend_from_slice(&cbor(cose_key));
        if let Some(ext) = extensions {
            raw.extend_from_slice(&cbor(ext));
        }
        cbor(&Value::Bytes(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use crate::entities::FLAG_UP;

    #[test]
    fn test_parse_es256_authdata() {
        let key = es256_cose_key([3; 32], [4; 32]);
        let data = build_authdata([9; 32], FLAG_UP | FLAG_AT, &[5; 16], &key, None);

        let parsed = AuthData::parse(&data, CoseAlgorithm::Es256).unwrap();
        assert_eq!(parsed.rp_id_hash, [9; 32]);
        assert_eq!(parsed.flags, FLAG_UP | FLAG_AT);
        assert_eq!(parsed.sign_count, 7);
        assert_eq!(parsed.credential.id, vec![5; 16]);
        assert_eq!(
            parsed.credential.pubkey,
            PublicKey::Es256 {
                x: [3; 32],
                y: [4; 32]
            }
        );
        assert_eq!(parsed.extensions, 0);
    }

    #[test]
    fn test_parse_extensions() {
        let key = es256_cose_key([3; 32], [4; 32]);
        let ext = Value::Map(vec![
            (Value::Text("hmac-secret".into()), Value::Bool(true)),
            (Value::Text("credProtect".into()), Value::Integer(2.into())),
        ]);
        let data = build_authdata([0; 32], FLAG_UP | FLAG_AT | FLAG_ED, &[1], &key, Some(&ext));

        let parsed = AuthData::parse(&data, CoseAlgorithm::Es256).unwrap();
        assert_eq!(parsed.extensions, EXT_HMAC_SECRET | EXT_CRED_PROTECT);
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let key = es256_cose_key([3; 32], [4; 32]);
        let data = build_authdata([0; 32], FLAG_UP | FLAG_AT, &[1], &key, None);

        let result = AuthData::parse(&data, CoseAlgorithm::Rs256);
        assert_eq!(result, Err(CredError::UnsupportedAlgorithm(-7)));
    }

    #[test]
    fn test_missing_attested_data_rejected() {
        let key = es256_cose_key([3; 32], [4; 32]);
        let data = build_authdata([0; 32], FLAG_UP, &[1], &key, None);
        assert!(AuthData::parse(&data, CoseAlgorithm::Es256).is_err());
    }

    #[test]
    fn test_not_a_byte_string_rejected() {
        let data = cbor(&Value::Text("authdata".into()));
        assert!(matches!(
            AuthData::parse(&data, CoseAlgorithm::Es256),
            Err(CredError::InvalidParam(_))
        ));
    }

    #[test]
    fn test_truncated_inputs_never_panic() {
        let key = es256_cose_key([3; 32], [4; 32]);
        let data = build_authdata([0; 32], FLAG_UP | FLAG_AT, &[1; 64], &key, None);
        for cut in 0..data.len() {
            assert!(AuthData::parse(&data[..cut], CoseAlgorithm::Es256).is_err());
        }
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let key = es256_cose_key([3; 32], [4; 32]);
        let mut data = build_authdata([0; 32], FLAG_UP | FLAG_AT, &[1], &key, None);
        data.push(0x00);
        assert!(AuthData::parse(&data, CoseAlgorithm::Es256).is_err());
    }
}
