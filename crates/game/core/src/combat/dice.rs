//! Seeded dice for deterministic damage rolls.
//!
//! # Determinism
//!
//! A [`DiceRng`] built from the same seed must yield the same sequence of
//! rolls on every platform. The verifying counterpart replays the exact
//! same draws, so the generator is part of the rules.

/// Deterministic source of die rolls.
pub trait DiceRng {
    /// Generate the next raw 32-bit value of the sequence.
    fn next_u32(&mut self) -> u32;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&mut self, sides: u32) -> u32 {
        (self.next_u32() % sides.max(1)) + 1
    }
}

/// PCG random number stream (Permuted Congruential Generator).
///
/// Uses the PCG-XSH-RR variant: 64-bit LCG state, 32-bit permuted output.
/// The seed is avalanched once before the first step so that adjacent
/// seeds (1, 2, 3, ...) start from unrelated states.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgStream {
    state: u64,
}

impl PcgStream {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn from_seed(seed: u64) -> Self {
        Self {
            state: Self::mix_seed(seed),
        }
    }

    /// MurmurHash3 finalizer.
    #[inline]
    fn mix_seed(seed: u64) -> u64 {
        let mut hash = seed;
        hash ^= hash >> 33;
        hash = hash.wrapping_mul(0xff51afd7ed558ccd);
        hash ^= hash >> 33;
        hash
    }

    /// `state' = (state * multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl DiceRng for PcgStream {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}
