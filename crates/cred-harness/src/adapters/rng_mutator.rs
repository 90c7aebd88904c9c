//! Seeded byte mutator for driving the structure-aware mutator without
//! libFuzzer (corpus tooling, tests). It applies a handful of classic
//! byte-level edits; it is not a replacement for the engine's own mutator.

use crate::ports::outbound::ByteMutator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const INTERESTING: [u8; 8] = [0x00, 0x01, 0x7f, 0x80, 0xff, 0x20, 0x30, 0x58];

/// `rand`-backed [`ByteMutator`].
#[derive(Debug, Clone)]
pub struct SeededMutator {
    rng: StdRng,
}

impl SeededMutator {
    /// Mutator with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ByteMutator for SeededMutator {
    fn mutate(&mut self, data: &mut [u8], size: usize, max_size: usize) -> usize {
        let max_size = max_size.min(data.len());
        let mut size = size.min(max_size);

        match self.rng.gen_range(0..6u8) {
            // flip one bit
            0 if size > 0 => {
                let i = self.rng.gen_range(0..size);
                data[i] ^= 1 << self.rng.gen_range(0..8);
            }
            // overwrite with a random or interesting byte
            1 if size > 0 => {
                let i = self.rng.gen_range(0..size);
                data[i] = if self.rng.gen_bool(0.5) {
                    self.rng.gen()
                } else {
                    INTERESTING[self.rng.gen_range(0..INTERESTING.len())]
                };
            }
            // insert a byte
            2 if size < max_size => {
                let i = self.rng.gen_range(0..=size);
                data.copy_within(i..size, i + 1);
                data[i] = self.rng.gen();
                size += 1;
            }
            // erase a run
            3 if size > 0 => {
                let i = self.rng.gen_range(0..size);
                let n = self.rng.gen_range(1..=size - i);
                data.copy_within(i + n..size, i);
                size -= n;
            }
            // copy a chunk over another position
            4 if size > 1 => {
                let src = self.rng.gen_range(0..size);
                let dst = self.rng.gen_range(0..size);
                let n = self.rng.gen_range(1..=size - src.max(dst));
                data.copy_within(src..src + n, dst);
            }
            // resize, filling growth with random bytes
            _ => {
                let new_size = self.rng.gen_range(0..=max_size);
                if new_size > size {
                    self.rng.fill(&mut data[size..new_size]);
                }
                size = new_size;
            }
        }
        size
    }

    fn reseed(&mut self, seed: u32) {
        self.rng = StdRng::seed_from_u64(u64::from(seed));
    }
}
