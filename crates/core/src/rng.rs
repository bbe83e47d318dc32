//! RNG module - next-piece selection
//!
//! The randomizer rolls over eight values, seven piece kinds plus a "none"
//! slot. A roll that lands on "none" or repeats the previous kind is rerolled
//! once over the seven real kinds. The reroll may still repeat the previous
//! kind, so this is neither uniform nor a 7-bag; the skew is part of how the
//! game feels and is kept as-is.
//!
//! Also provides a simple LCG for deterministic play and testing.

use crate::types::PieceKind;

/// Number of values in the first roll: seven kinds plus the "none" slot.
const ROLL_DOMAIN: u32 = PieceKind::ALL.len() as u32 + 1;

/// A source of uniform integers, split out so tests can script rolls.
pub trait RandomSource {
    /// Uniform value in `[0, max)`. `max` must be non-zero.
    fn next_range(&mut self, max: u32) -> u32;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // Multiply-shift keeps the high bits; the low bits of a power-of-two
        // LCG cycle with a tiny period.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Next-piece picker with the anti-repeat reroll.
#[derive(Debug, Clone)]
pub struct Randomizer<R = SimpleRng> {
    source: R,
}

impl Randomizer<SimpleRng> {
    /// Create a randomizer backed by [`SimpleRng`] with the given seed
    pub fn new(seed: u32) -> Self {
        Self::with_source(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> Randomizer<R> {
    pub fn with_source(source: R) -> Self {
        Self { source }
    }

    /// Uniform pick over the seven kinds, used for the very first queued piece.
    pub fn first(&mut self) -> PieceKind {
        self.pick_uniform()
    }

    /// Pick the kind that follows `previous`.
    pub fn next(&mut self, previous: PieceKind) -> PieceKind {
        let roll = self.source.next_range(ROLL_DOMAIN) as usize;
        match PieceKind::from_index(roll) {
            Some(kind) if kind != previous => kind,
            // "none" slot or an immediate repeat
            _ => self.pick_uniform(),
        }
    }

    fn pick_uniform(&mut self) -> PieceKind {
        let roll = self.source.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[roll % PieceKind::ALL.len()]
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new(1)
    }
}
