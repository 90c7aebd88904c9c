//! # Inbound Ports (Driving Ports / API)
//!
//! The entry points a fuzzing engine calls.

/// Fuzzing harness API.
pub trait HarnessApi {
    /// Run one input against the credential object.
    ///
    /// Undecodable input is a no-op. Never reads outside `data`.
    fn test_one_input(&self, data: &[u8]);

    /// Structure-aware mutation of `data[..size]` in place.
    ///
    /// Returns the new length, or 0 when no well-formed mutation fits in
    /// `max_size` bytes. Never writes beyond `min(max_size, data.len())`.
    fn custom_mutate(&mut self, data: &mut [u8], size: usize, max_size: usize, seed: u32)
        -> usize;
}
