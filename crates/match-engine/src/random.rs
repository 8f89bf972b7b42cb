//! Randomness for computer-controlled seats
//!
//! Computer seats pick uniformly from the catalog. The engine only needs
//! `next_range`, so tests can drive it with a scripted source.
//! `SeededRng` is a small xorshift64* generator: the same seed gives the
//! same picks.

use crate::piece::{Catalog, Piece};

/// Source of uniform indices.
pub trait RandomSource {
    /// A value in `[0, max)`. Returns 0 when `max` is 0.
    fn next_range(&mut self, max: u32) -> u32;

    /// Uniformly pick a piece from a non-empty catalog.
    fn pick<'a>(&mut self, catalog: &'a Catalog) -> Option<&'a Piece> {
        let index = self.next_range(catalog.len() as u32);
        catalog.nth(index as usize)
    }
}

/// Seeded random number generator for computer picks
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Fold a 32-byte seed into the generator state.
    pub fn new(seed: &[u8; 32]) -> Self {
        let folded = seed
            .chunks_exact(8)
            .map(|chunk| {
                let mut word = [0u8; 8];
                word.copy_from_slice(chunk);
                u64::from_le_bytes(word)
            })
            .fold(0x9e3779b97f4a7c15u64, |acc, word| mix(acc ^ word));

        // xorshift never leaves the all-zero state
        let state = if folded == 0 { 0x9e3779b97f4a7c15 } else { folded };
        Self { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }
}

/// splitmix64 finalizer
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

impl RandomSource for SeededRng {
    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u64() >> 32) % max as u64) as u32
    }
}
