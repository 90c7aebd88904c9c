//! # Field Codec
//!
//! Typed TLV primitives. Every field starts with a one-byte tag:
//!
//! | Kind | Layout |
//! |------|--------|
//! | boolean | `tag \| value (1)` |
//! | integer | `tag \| value (4, i32 LE)` |
//! | blob / text | `tag \| len (2, u16 LE) \| len bytes` |
//!
//! Cursors only advance when a field has been read or written completely; a
//! failed call leaves both the cursor and the destination untouched.

use super::bounded::{BoundedBytes, BoundedText};
use super::errors::CodecError;

const LEN_PREFIX: usize = 2;
const INT_WIDTH: usize = 4;

/// Field tags, in canonical record order.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    /// Algorithm selector
    Type = 0x01,
    /// Client data hash
    Cdh = 0x02,
    /// Relying party id
    RpId = 0x03,
    /// Relying party display name
    RpName = 0x04,
    /// Authenticator data
    AuthData = 0x05,
    /// Extension bitmask
    Ext = 0x06,
    /// Resident-key option
    Rk = 0x07,
    /// User-verification option
    Uv = 0x08,
    /// Attestation certificate
    X509 = 0x09,
    /// Attestation signature
    Sig = 0x0a,
    /// Attestation format selector
    Fmt = 0x0b,
}

impl Tag {
    /// Wire value.
    pub fn byte(self) -> u8 {
        self as u8
    }
}

/// Encoded size of a boolean field.
pub const fn bool_len() -> usize {
    1 + 1
}

/// Encoded size of an integer field.
pub const fn int_len() -> usize {
    1 + INT_WIDTH
}

/// Encoded size of a blob or text field with `content` bytes.
pub const fn var_len(content: usize) -> usize {
    1 + LEN_PREFIX + content
}

// =============================================================================
// Reader
// =============================================================================

/// Decoding cursor over borrowed input.
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    buf: &'a [u8],
}

fn split<'a>(buf: &mut &'a [u8], n: usize) -> Result<&'a [u8], CodecError> {
    if buf.len() < n {
        return Err(CodecError::MalformedInput);
    }
    let (head, tail) = buf.split_at(n);
    *buf = tail;
    Ok(head)
}

impl<'a> Reader<'a> {
    /// Cursor over `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// Run `f` against a copy of the cursor and commit it only on success.
    fn transact<T>(
        &mut self,
        tag: Tag,
        f: impl FnOnce(&mut &'a [u8]) -> Result<T, CodecError>,
    ) -> Result<T, CodecError> {
        let mut cur = self.buf;
        let [found] = split(&mut cur, 1)? else {
            return Err(CodecError::MalformedInput);
        };
        if *found != tag.byte() {
            return Err(CodecError::MalformedInput);
        }
        let value = f(&mut cur)?;
        self.buf = cur;
        Ok(value)
    }

    /// Read a boolean; any nonzero byte decodes as `true`.
    pub fn read_bool(&mut self, tag: Tag) -> Result<bool, CodecError> {
        self.transact(tag, |cur| Ok(split(cur, 1)?[0] != 0))
    }

    /// Read a little-endian `i32`.
    pub fn read_int(&mut self, tag: Tag) -> Result<i32, CodecError> {
        self.transact(tag, |cur| {
            let raw = split(cur, INT_WIDTH)?;
            Ok(i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
        })
    }

    fn read_len_prefixed(cur: &mut &'a [u8], max: usize) -> Result<&'a [u8], CodecError> {
        let prefix = split(cur, LEN_PREFIX)?;
        let len = u16::from_le_bytes([prefix[0], prefix[1]]) as usize;
        if len > max {
            return Err(CodecError::MalformedInput);
        }
        split(cur, len)
    }

    /// Read a blob of at most `N` bytes.
    pub fn read_blob<const N: usize>(&mut self, tag: Tag) -> Result<BoundedBytes<N>, CodecError> {
        self.transact(tag, |cur| {
            let body = Self::read_len_prefixed(cur, N)?;
            BoundedBytes::from_slice(body).map_err(|_| CodecError::MalformedInput)
        })
    }

    /// Read text of at most `N - 1` bytes containing no NUL.
    pub fn read_text<const N: usize>(&mut self, tag: Tag) -> Result<BoundedText<N>, CodecError> {
        self.transact(tag, |cur| {
            let body = Self::read_len_prefixed(cur, BoundedText::<N>::MAX_LEN)?;
            BoundedText::from_bytes(body).map_err(|_| CodecError::MalformedInput)
        })
    }
}

// =============================================================================
// Writer
// =============================================================================

/// Encoding cursor over a caller-provided buffer.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    /// Cursor at the start of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Space left.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn reserve(&mut self, n: usize) -> Result<&mut [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::EncodeOverflow);
        }
        let start = self.pos;
        self.pos += n;
        Ok(&mut self.buf[start..start + n])
    }

    /// Write a boolean as `0x00` / `0x01`.
    pub fn write_bool(&mut self, tag: Tag, value: bool) -> Result<(), CodecError> {
        let out = self.reserve(bool_len())?;
        out[0] = tag.byte();
        out[1] = u8::from(value);
        Ok(())
    }

    /// Write a little-endian `i32`.
    pub fn write_int(&mut self, tag: Tag, value: i32) -> Result<(), CodecError> {
        let out = self.reserve(int_len())?;
        out[0] = tag.byte();
        out[1..].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    fn write_len_prefixed(&mut self, tag: Tag, body: &[u8], max: usize) -> Result<(), CodecError> {
        if body.len() > max {
            return Err(CodecError::EncodeOverflow);
        }
        let len = u16::try_from(body.len()).map_err(|_| CodecError::EncodeOverflow)?;
        let out = self.reserve(var_len(body.len()))?;
        out[0] = tag.byte();
        out[1..1 + LEN_PREFIX].copy_from_slice(&len.to_le_bytes());
        out[1 + LEN_PREFIX..].copy_from_slice(body);
        Ok(())
    }

    /// Write a blob field.
    pub fn write_blob<const N: usize>(
        &mut self,
        tag: Tag,
        blob: &BoundedBytes<N>,
    ) -> Result<(), CodecError> {
        self.write_len_prefixed(tag, blob.as_slice(), N)
    }

    /// Write a text field (without its terminator).
    pub fn write_text<const N: usize>(
        &mut self,
        tag: Tag,
        text: &BoundedText<N>,
    ) -> Result<(), CodecError> {
        self.write_len_prefixed(tag, text.as_bytes(), BoundedText::<N>::MAX_LEN)
    }

    /// Write raw bytes as a blob field bounded by `max`.
    pub fn write_raw(&mut self, tag: Tag, body: &[u8], max: usize) -> Result<(), CodecError> {
        self.write_len_prefixed(tag, body, max)
    }
}
