//! RNG oracle for percent rolls and random picks.
//!
//! All randomness consumed by the combat engine flows through [`RngOracle`],
//! a single shared uniform generator supplied by the caller. Nothing in the
//! core owns an RNG; proc rolls and AI picks borrow one for the duration of a
//! call.
//!
//! # Determinism
//!
//! Implementations must be deterministic for a given seed so a recorded
//! session replays identically. [`ReplayRng`] goes one step further and
//! replays an explicit roll list.

/// RNG oracle for uniform random numbers.
pub trait RngOracle {
    /// Generate the next random u32 value.
    fn next_u32(&mut self) -> u32;

    /// Roll a d100 (1-100 inclusive).
    ///
    /// Common for percentage-based mechanics like proc and combo chances.
    fn roll_d100(&mut self) -> u32 {
        (self.next_u32() % 100) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let width = (max - min) as u64 + 1;
        min + (self.next_u32() as u64 % width) as u32
    }

    /// Succeeds when a d100 roll lands at or below `chance`.
    fn roll_percent(&mut self, chance: u32) -> bool {
        self.roll_d100() <= chance
    }
}

impl<R: RngOracle + ?Sized> RngOracle for &mut R {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    #[inline]
    fn roll_d100(&mut self) -> u32 {
        (**self).roll_d100()
    }

    #[inline]
    fn range(&mut self, min: u32, max: u32) -> u32 {
        (**self).range(min, max)
    }
}

impl<R: RngOracle + ?Sized> RngOracle for Box<R> {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    #[inline]
    fn roll_d100(&mut self) -> u32 {
        (**self).roll_d100()
    }

    #[inline]
    fn range(&mut self, min: u32, max: u32) -> u32 {
        (**self).range(min, max)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 64 bits of state, 32-bit output.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a seed. Equal seeds give equal sequences.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.state = Self::pcg_step(rng.state.wrapping_add(seed));
        rng
    }

    /// Current internal state, for snapshots.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        // XOR upper bits with lower bits, shift right
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;

        // Use upper bits to determine rotation amount
        let rot = (state >> 59) as u32;

        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

/// Replays a fixed list of d100 rolls.
///
/// Used to reproduce recorded sessions and to pin probabilistic rules to an
/// exact outcome. Rolls wrap around when the list runs out; an empty list
/// always rolls 100.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplayRng {
    rolls: Vec<u32>,
    cursor: usize,
}

impl ReplayRng {
    pub fn new(rolls: impl Into<Vec<u32>>) -> Self {
        Self {
            rolls: rolls.into(),
            cursor: 0,
        }
    }

    /// Number of values consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    fn next_value(&mut self) -> u32 {
        if self.rolls.is_empty() {
            self.cursor += 1;
            return 100;
        }
        let value = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        value
    }
}

impl RngOracle for ReplayRng {
    fn next_u32(&mut self) -> u32 {
        self.next_value()
    }

    /// Returns the scripted value as-is, clamped into 1..=100.
    fn roll_d100(&mut self) -> u32 {
        self.next_value().clamp(1, 100)
    }

    /// Scripted values are taken modulo the range width.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let width = (max - min) as u64 + 1;
        min + (self.next_value() as u64 % width) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic_per_seed() {
        let mut a = PcgRng::new(42);
        let mut b = PcgRng::new(42);
        let mut c = PcgRng::new(43);

        let seq_a: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let seq_b: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        let seq_c: Vec<u32> = (0..8).map(|_| c.next_u32()).collect();

        assert_eq!(seq_a, seq_b);
        assert_ne!(seq_a, seq_c);
    }

    #[test]
    fn d100_stays_in_bounds() {
        let mut rng = PcgRng::new(7);
        for _ in 0..1_000 {
            let roll = rng.roll_d100();
            assert!((1..=100).contains(&roll));
        }
    }

    #[test]
    fn range_is_inclusive_and_handles_degenerate_bounds() {
        let mut rng = PcgRng::new(99);
        for _ in 0..500 {
            let value = rng.range(3, 5);
            assert!((3..=5).contains(&value));
        }
        assert_eq!(rng.range(8, 8), 8);
        assert_eq!(rng.range(9, 2), 9);
    }

    #[test]
    fn full_width_range_does_not_overflow() {
        let mut rng = PcgRng::new(5);
        let _ = rng.range(0, u32::MAX);
        assert!(rng.range(u32::MAX - 1, u32::MAX) >= u32::MAX - 1);

        let mut replay = ReplayRng::new(vec![u32::MAX, 7]);
        assert_eq!(replay.range(0, u32::MAX), u32::MAX);
        assert_eq!(replay.range(1, u32::MAX), 8);
    }

    #[test]
    fn pcg_state_tracks_draws() {
        let mut a = PcgRng::new(42);
        let b = PcgRng::new(42);
        assert_eq!(a.state(), b.state());

        a.next_u32();
        assert_ne!(a.state(), b.state());

        let mut resumed = PcgRng { state: a.state() };
        assert_eq!(resumed.next_u32(), a.next_u32());
    }

    #[test]
    fn replay_rng_returns_script_in_order() {
        let mut rng = ReplayRng::new(vec![41, 10, 0, 250]);
        assert_eq!(rng.roll_d100(), 41);
        assert_eq!(rng.roll_d100(), 10);
        assert_eq!(rng.roll_d100(), 1);
        assert_eq!(rng.roll_d100(), 100);
        assert_eq!(rng.roll_d100(), 41);
        assert_eq!(rng.consumed(), 5);
    }

    #[test]
    fn replay_rng_through_trait_object() {
        let mut rng = ReplayRng::new(vec![30]);
        let dynamic: &mut dyn RngOracle = &mut rng;
        assert!(dynamic.roll_percent(30));
        assert!(!dynamic.roll_percent(29));
    }
}
