//! Token stat rolling.
//!
//! Randomness is injected through the [`Entropy`] trait so the ledger can run
//! on OS entropy in production and on a fixed sequence in tests.

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::model::{MAX_STRENGTH, MAX_VARIANT};

/// A source of bounded random draws.
pub trait Entropy {
    /// Returns a value in `range`.
    fn draw(&mut self, range: RangeInclusive<u8>) -> u8;
}

/// Entropy backed by a `rand` generator.
pub struct RngEntropy<R>(R);

impl RngEntropy<SmallRng> {
    /// Seeds from the operating system.
    pub fn from_os() -> Self {
        RngEntropy(SmallRng::from_entropy())
    }

    /// Seeds deterministically. A seed of 0 falls back to OS entropy.
    pub fn seeded(seed: u64) -> Self {
        if seed == 0 {
            Self::from_os()
        } else {
            RngEntropy(SmallRng::seed_from_u64(seed))
        }
    }
}

impl<R: RngCore> RngEntropy<R> {
    pub fn new(rng: R) -> Self {
        RngEntropy(rng)
    }
}

impl<R: RngCore> Entropy for RngEntropy<R> {
    fn draw(&mut self, range: RangeInclusive<u8>) -> u8 {
        self.0.gen_range(range)
    }
}

/// Replays a fixed sequence of values, clamped into each requested range.
///
/// Once the sequence runs out every draw returns the low end of the range.
#[derive(Debug, Clone, Default)]
pub struct SequenceEntropy {
    values: VecDeque<u8>,
}

impl SequenceEntropy {
    pub fn new(values: impl IntoIterator<Item = u8>) -> Self {
        SequenceEntropy {
            values: values.into_iter().collect(),
        }
    }
}

impl Entropy for SequenceEntropy {
    fn draw(&mut self, range: RangeInclusive<u8>) -> u8 {
        let (lo, hi) = (*range.start(), *range.end());
        match self.values.pop_front() {
            Some(v) => v.clamp(lo, hi),
            None => lo,
        }
    }
}

/// Stats rolled for a freshly minted token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenStats {
    pub attack: u8,
    pub defense: u8,
    pub variant: u8,
}

/// Rolls a token: attack in `1..=9`, defense making up the rest of
/// [`MAX_STRENGTH`], and an independent variant in `0..=MAX_VARIANT`.
///
/// Attack is drawn first, then variant.
pub fn roll_stats(entropy: &mut dyn Entropy) -> TokenStats {
    let attack = entropy.draw(1..=MAX_STRENGTH - 1);
    let variant = entropy.draw(0..=MAX_VARIANT);
    TokenStats {
        attack,
        defense: MAX_STRENGTH - attack,
        variant,
    }
}
