//! RNG oracle for deterministic random number generation.
//!
//! Crit rolls, spawn batch sizes, spawn timers and spawn tile selection all
//! draw from a [`Dice`], which pairs a stateless [`RngOracle`] with a running
//! nonce. Given the same game seed and the same sequence of calls, every run
//! produces the same numbers.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        // Widened so the full u32 span does not overflow
        let span = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32(seed)) % span) as u32
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute deterministic seed from simulation components.
///
/// * `game_seed` - Base seed set when the simulation is built
/// * `nonce` - Roll sequence number (increments each roll)
/// * `stream` - Independent stream id (one per spawn zone, one for combat)
/// * `context` - Distinguishes roll purposes within the same nonce
pub fn compute_seed(game_seed: u64, nonce: u64, stream: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash multipliers
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (stream as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Stateful roller on top of an [`RngOracle`].
pub struct Dice {
    oracle: Box<dyn RngOracle>,
    game_seed: u64,
    stream: u32,
    nonce: u64,
}

impl Dice {
    /// Dice on stream 0 backed by [`PcgRng`].
    pub fn new(game_seed: u64) -> Self {
        Self::with_oracle(Box::new(PcgRng), game_seed, 0)
    }

    pub fn with_oracle(oracle: Box<dyn RngOracle>, game_seed: u64, stream: u32) -> Self {
        Self {
            oracle,
            game_seed,
            stream,
            nonce: 0,
        }
    }

    /// Independent [`PcgRng`] dice with the same game seed on another stream.
    pub fn fork(&self, stream: u32) -> Self {
        Self::with_oracle(Box::new(PcgRng), self.game_seed, stream)
    }

    /// Number of rolls made so far.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    fn next_seed(&mut self) -> u64 {
        self.nonce += 1;
        compute_seed(self.game_seed, self.nonce, self.stream, 0)
    }

    pub fn next_u32(&mut self) -> u32 {
        let seed = self.next_seed();
        self.oracle.next_u32(seed)
    }

    /// Uniform integer in `[min, max]` inclusive.
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        let seed = self.next_seed();
        self.oracle.range(seed, min, max)
    }

    /// Uniform float in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        // 24 bits keep every value exactly representable in f32
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform float in `[min, max)`; returns `min` when the range is empty.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + (max - min) * self.unit()
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.unit() < p
    }

    /// Uniform index into a collection of `len` elements.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.range(0, (len - 1) as u32) as usize)
    }
}

impl core::fmt::Debug for Dice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dice")
            .field("game_seed", &self.game_seed)
            .field("stream", &self.stream)
            .field("nonce", &self.nonce)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Dice::new(42);
        let mut b = Dice::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn streams_diverge() {
        let base = Dice::new(42);
        let mut a = base.fork(1);
        let mut b = base.fork(2);
        let xs: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn range_is_inclusive_and_bounded() {
        let mut dice = Dice::new(9);
        for _ in 0..200 {
            let v = dice.range(3, 6);
            assert!((3..=6).contains(&v));
        }
        assert_eq!(dice.range(5, 5), 5);
    }

    #[test]
    fn full_width_range_does_not_overflow() {
        let mut dice = Dice::new(3);
        for _ in 0..64 {
            dice.range(0, u32::MAX);
            assert!(dice.range(1, u32::MAX) >= 1);
        }
        assert_eq!(PcgRng.range(7, u32::MAX, u32::MAX), u32::MAX);
    }

    #[test]
    fn unit_stays_below_one() {
        let mut dice = Dice::new(1);
        for _ in 0..500 {
            let v = dice.unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn index_of_empty_is_none() {
        let mut dice = Dice::new(1);
        assert_eq!(dice.index(0), None);
        assert_eq!(dice.index(1), Some(0));
    }
}
