//! # Fixed-Capacity Storage
//!
//! Owned, stack-sized containers for blob and text fields. Capacity is a
//! compile-time bound; nothing here grows with the size of untrusted input.

use super::errors::CodecError;
use std::fmt;

// =============================================================================
// BoundedBytes
// =============================================================================

/// Opaque byte field with at most `N` bytes of content.
#[derive(Clone)]
pub struct BoundedBytes<const N: usize> {
    body: [u8; N],
    len: usize,
}

impl<const N: usize> BoundedBytes<N> {
    /// Maximum content length.
    pub const CAPACITY: usize = N;

    /// Empty field.
    pub fn new() -> Self {
        Self {
            body: [0; N],
            len: 0,
        }
    }

    /// Copy `bytes` into a new field.
    ///
    /// # Errors
    /// `EncodeOverflow` if `bytes` is longer than the capacity.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() > N {
            return Err(CodecError::EncodeOverflow);
        }
        let mut field = Self::new();
        field.body[..bytes.len()].copy_from_slice(bytes);
        field.len = bytes.len();
        Ok(field)
    }

    /// Field holding a fixed array; the bound is checked at compile time.
    pub fn from_array<const M: usize>(bytes: &[u8; M]) -> Self {
        const { assert!(M <= N) };
        let mut field = Self::new();
        field.body[..M].copy_from_slice(bytes);
        field.len = M;
        field
    }

    /// Current content.
    pub fn as_slice(&self) -> &[u8] {
        &self.body[..self.len]
    }

    /// Current content length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the field is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Hand the full storage and current length to `f`, which returns the new
    /// length. The result is clamped to the capacity.
    pub fn mutate_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut [u8], usize) -> usize,
    {
        let new_len = f(&mut self.body, self.len);
        self.len = new_len.min(N);
    }
}

impl<const N: usize> Default for BoundedBytes<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PartialEq for BoundedBytes<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<const N: usize> Eq for BoundedBytes<N> {}

impl<const N: usize> fmt::Debug for BoundedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedBytes")
            .field("capacity", &N)
            .field("len", &self.len)
            .field("head", &&self.as_slice()[..self.len.min(16)])
            .finish()
    }
}

// =============================================================================
// BoundedText
// =============================================================================

/// NUL-terminated text field stored in `N` bytes, so at most `N - 1` bytes of
/// content. The content never contains a NUL.
#[derive(Clone)]
pub struct BoundedText<const N: usize> {
    body: [u8; N],
    len: usize,
}

impl<const N: usize> BoundedText<N> {
    /// Maximum content length (storage minus the terminator).
    pub const MAX_LEN: usize = N - 1;

    /// Empty text.
    pub fn new() -> Self {
        Self {
            body: [0; N],
            len: 0,
        }
    }

    /// Copy `text` into a new field.
    ///
    /// # Errors
    /// - `EncodeOverflow` if `text` is longer than `N - 1` bytes
    /// - `MalformedInput` if `text` contains a NUL
    pub fn from_bytes(text: &[u8]) -> Result<Self, CodecError> {
        if text.len() > Self::MAX_LEN {
            return Err(CodecError::EncodeOverflow);
        }
        if text.contains(&0) {
            return Err(CodecError::MalformedInput);
        }
        let mut field = Self::new();
        field.body[..text.len()].copy_from_slice(text);
        field.len = text.len();
        Ok(field)
    }

    /// Text holding a fixed array, cut at its first NUL; the bound is checked
    /// at compile time.
    pub fn from_array<const M: usize>(text: &[u8; M]) -> Self {
        const { assert!(M < N) };
        let len = text.iter().position(|&b| b == 0).unwrap_or(M);
        let mut field = Self::new();
        field.body[..len].copy_from_slice(&text[..len]);
        field.len = len;
        field
    }

    /// Content without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.body[..self.len]
    }

    /// Content including the terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.body[..=self.len]
    }

    /// Content length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Hand the storage (without the terminator slot) and current length to
    /// `f`, which returns the new length. The result is clamped to `N - 1`,
    /// cut at the first NUL and re-terminated.
    pub fn mutate_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut [u8], usize) -> usize,
    {
        let max = Self::MAX_LEN;
        let new_len = f(&mut self.body[..max], self.len).min(max);
        let len = self.body[..new_len]
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(new_len);
        self.body[len] = 0;
        self.len = len;
    }
}

impl<const N: usize> Default for BoundedText<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PartialEq for BoundedText<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> Eq for BoundedText<N> {}

impl<const N: usize> fmt::Debug for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_rejects_oversized() {
        assert_eq!(
            BoundedBytes::<4>::from_slice(&[1, 2, 3, 4, 5]),
            Err(CodecError::EncodeOverflow)
        );
        assert_eq!(BoundedBytes::<4>::from_slice(&[1, 2, 3, 4]).unwrap().len(), 4);
    }

    #[test]
    fn test_bytes_equality_ignores_stale_storage() {
        let mut a = BoundedBytes::<8>::from_slice(&[1, 2, 3, 4]).unwrap();
        a.mutate_with(|_, _| 2);
        let b = BoundedBytes::<8>::from_slice(&[1, 2]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bytes_mutation_is_clamped() {
        let mut field = BoundedBytes::<8>::new();
        field.mutate_with(|body, _| {
            body.fill(0xAB);
            usize::MAX
        });
        assert_eq!(field.as_slice(), &[0xAB; 8]);
    }

    #[test]
    fn test_text_rejects_embedded_nul() {
        assert_eq!(
            BoundedText::<16>::from_bytes(b"ab\0cd"),
            Err(CodecError::MalformedInput)
        );
    }

    #[test]
    fn test_text_rejects_full_storage() {
        assert_eq!(
            BoundedText::<4>::from_bytes(b"abcd"),
            Err(CodecError::EncodeOverflow)
        );
        assert_eq!(BoundedText::<4>::from_bytes(b"abc").unwrap().len(), 3);
    }

    #[test]
    fn test_text_always_terminated() {
        let text = BoundedText::<8>::from_bytes(b"abc").unwrap();
        assert_eq!(text.as_bytes_with_nul(), b"abc\0");
    }

    #[test]
    fn test_text_mutation_cuts_at_nul() {
        let mut text = BoundedText::<16>::from_bytes(b"localhost").unwrap();
        text.mutate_with(|body, len| {
            body[3] = 0;
            len
        });
        assert_eq!(text.as_bytes(), b"loc");
        assert_eq!(text.as_bytes_with_nul(), b"loc\0");
    }

    #[test]
    fn test_text_mutation_never_touches_terminator_slot() {
        let mut text = BoundedText::<4>::new();
        text.mutate_with(|body, _| {
            assert_eq!(body.len(), 3);
            body.fill(b'x');
            10
        });
        assert_eq!(text.as_bytes_with_nul(), b"xxx\0");
    }

    #[test]
    fn test_from_array_cuts_at_nul() {
        let text = BoundedText::<16>::from_array(b"abc\0def");
        assert_eq!(text.as_bytes(), b"abc");
    }
}
