//! # Parameter Set
//!
//! The typed form of one fuzzer input, mirroring the eleven configuration
//! fields of the credential-creation API, and its record codec.
//!
//! Fields are encoded in one fixed order with one fixed tag each; decode
//! fails on the first missing, mismatched or oversized field. Bytes after the
//! final field are ignored.

use super::bounded::{BoundedBytes, BoundedText};
use super::errors::CodecError;
use super::field::{bool_len, int_len, var_len, Reader, Tag, Writer};

/// Text storage per string field, including the terminating NUL.
pub const MAX_STR: usize = 255;
/// Capacity of the large blob fields.
pub const MAX_BLOB: usize = 4096;
/// Capacity of the client data hash.
pub const CDH_LEN: usize = 32;

/// Credential algorithm chosen by the algorithm selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    /// COSE ES256 (selector `true`)
    Es256,
    /// COSE RS256 (selector `false`)
    Rs256,
}

/// Attestation format chosen by the format selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// `"packed"` (selector `true`)
    Packed,
    /// `"fido-u2f"` (selector `false`)
    FidoU2f,
}

impl Format {
    /// Format identifier passed to the credential object.
    pub fn name(self) -> &'static str {
        match self {
            Format::Packed => "packed",
            Format::FidoU2f => "fido-u2f",
        }
    }
}

/// Decoded parameter set. All storage is owned and fixed-capacity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParamSet {
    /// Algorithm selector: ES256 when set, RS256 otherwise
    pub es256: bool,
    /// Client data hash
    pub cdh: BoundedBytes<CDH_LEN>,
    /// Relying party id
    pub rp_id: BoundedText<MAX_STR>,
    /// Relying party display name
    pub rp_name: BoundedText<MAX_STR>,
    /// CBOR-wrapped authenticator data
    pub authdata: BoundedBytes<MAX_BLOB>,
    /// Extension bitmask
    pub ext: i32,
    /// Resident-key option
    pub rk: bool,
    /// User-verification option
    pub uv: bool,
    /// DER attestation certificate
    pub x509: BoundedBytes<MAX_BLOB>,
    /// DER attestation signature
    pub sig: BoundedBytes<MAX_BLOB>,
    /// Format selector: packed when set, fido-u2f otherwise
    pub packed: bool,
}

impl ParamSet {
    /// Algorithm named by the selector.
    pub fn algorithm(&self) -> Algorithm {
        if self.es256 {
            Algorithm::Es256
        } else {
            Algorithm::Rs256
        }
    }

    /// Attestation format named by the selector.
    pub fn format(&self) -> Format {
        if self.packed {
            Format::Packed
        } else {
            Format::FidoU2f
        }
    }

    /// Decode a parameter set from the start of `data`.
    ///
    /// # Errors
    /// `MalformedInput` on truncation, tag mismatch or a length exceeding a
    /// field's capacity.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut r = Reader::new(data);
        Ok(Self {
            es256: r.read_bool(Tag::Type)?,
            cdh: r.read_blob(Tag::Cdh)?,
            rp_id: r.read_text(Tag::RpId)?,
            rp_name: r.read_text(Tag::RpName)?,
            authdata: r.read_blob(Tag::AuthData)?,
            ext: r.read_int(Tag::Ext)?,
            rk: r.read_bool(Tag::Rk)?,
            uv: r.read_bool(Tag::Uv)?,
            x509: r.read_blob(Tag::X509)?,
            sig: r.read_blob(Tag::Sig)?,
            packed: r.read_bool(Tag::Fmt)?,
        })
    }

    /// Encode into `out`, returning the number of bytes written.
    ///
    /// # Errors
    /// `EncodeOverflow` if the encoding does not fit in `out`.
    pub fn encode(&self, out: &mut [u8]) -> Result<usize, CodecError> {
        let mut w = Writer::new(out);
        w.write_bool(Tag::Type, self.es256)?;
        w.write_blob(Tag::Cdh, &self.cdh)?;
        w.write_text(Tag::RpId, &self.rp_id)?;
        w.write_text(Tag::RpName, &self.rp_name)?;
        w.write_blob(Tag::AuthData, &self.authdata)?;
        w.write_int(Tag::Ext, self.ext)?;
        w.write_bool(Tag::Rk, self.rk)?;
        w.write_bool(Tag::Uv, self.uv)?;
        w.write_blob(Tag::X509, &self.x509)?;
        w.write_blob(Tag::Sig, &self.sig)?;
        w.write_bool(Tag::Fmt, self.packed)?;
        Ok(w.position())
    }

    /// Size of the encoding produced by [`ParamSet::encode`].
    pub fn encoded_len(&self) -> usize {
        4 * bool_len()
            + int_len()
            + var_len(self.cdh.len())
            + var_len(self.rp_id.len())
            + var_len(self.rp_name.len())
            + var_len(self.authdata.len())
            + var_len(self.x509.len())
            + var_len(self.sig.len())
    }

    /// Encode into a freshly allocated buffer of exactly the needed size.
    pub fn to_vec(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = vec![0u8; self.encoded_len()];
        let n = self.encode(&mut out)?;
        out.truncate(n);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParamSet {
        ParamSet {
            es256: true,
            cdh: BoundedBytes::from_slice(&[0x11; 32]).unwrap(),
            rp_id: BoundedText::from_bytes(b"example.org").unwrap(),
            rp_name: BoundedText::from_bytes(b"Example").unwrap(),
            authdata: BoundedBytes::from_slice(&[0x58, 0x02, 0xAA, 0xBB]).unwrap(),
            ext: -17,
            rk: true,
            uv: false,
            x509: BoundedBytes::from_slice(&[0x30, 0x00]).unwrap(),
            sig: BoundedBytes::from_slice(&[0x30, 0x06]).unwrap(),
            packed: false,
        }
    }

    #[test]
    fn test_round_trip() {
        let p = sample();
        let bytes = p.to_vec().unwrap();
        assert_eq!(bytes.len(), p.encoded_len());
        assert_eq!(ParamSet::decode(&bytes), Ok(p));
    }

    #[test]
    fn test_default_round_trip() {
        let p = ParamSet::default();
        let bytes = p.to_vec().unwrap();
        assert_eq!(bytes.len(), 31);
        assert_eq!(ParamSet::decode(&bytes), Ok(p));
    }

    #[test]
    fn test_field_order_and_tags() {
        let bytes = sample().to_vec().unwrap();
        let mut tags = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            let tag = bytes[i];
            tags.push(tag);
            i += match tag {
                0x01 | 0x07 | 0x08 | 0x0b => 2,
                0x06 => 5,
                _ => 3 + u16::from_le_bytes([bytes[i + 1], bytes[i + 2]]) as usize,
            };
        }
        assert_eq!(tags, (0x01..=0x0b).collect::<Vec<u8>>());
    }

    #[test]
    fn test_every_truncation_rejected() {
        let bytes = sample().to_vec().unwrap();
        for cut in 0..bytes.len() {
            assert_eq!(
                ParamSet::decode(&bytes[..cut]),
                Err(CodecError::MalformedInput),
                "prefix of {cut} bytes decoded"
            );
        }
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let p = sample();
        let mut bytes = p.to_vec().unwrap();
        bytes.extend_from_slice(&[0xde, 0xad]);
        assert_eq!(ParamSet::decode(&bytes), Ok(p));
    }

    #[test]
    fn test_swapped_fields_rejected() {
        let mut bytes = sample().to_vec().unwrap();
        bytes[0] = Tag::Fmt.byte();
        assert_eq!(ParamSet::decode(&bytes), Err(CodecError::MalformedInput));
    }

    #[test]
    fn test_cdh_length_prefix_over_capacity_rejected() {
        let mut bytes = sample().to_vec().unwrap();
        // cdh length prefix sits right after the 2-byte selector and its tag
        bytes[3] = 33;
        bytes.splice(5..5, [0u8]);
        assert_eq!(ParamSet::decode(&bytes), Err(CodecError::MalformedInput));
    }

    #[test]
    fn test_encode_overflow_on_small_buffer() {
        let p = sample();
        let mut out = vec![0u8; p.encoded_len() - 1];
        assert_eq!(p.encode(&mut out), Err(CodecError::EncodeOverflow));
    }

    #[test]
    fn test_selectors() {
        let mut p = sample();
        assert_eq!(p.algorithm(), Algorithm::Es256);
        assert_eq!(p.format(), Format::FidoU2f);
        p.es256 = false;
        p.packed = true;
        assert_eq!(p.algorithm(), Algorithm::Rs256);
        assert_eq!(p.format().name(), "packed");
    }
}
