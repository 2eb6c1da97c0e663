//! Randomness seam for every draw the game makes.
//!
//! Game code takes `&mut impl Dice` the same way the rest of the engine takes
//! `&mut impl Rng`. Any `rand::Rng` is a `Dice`, so production code passes
//! `rand::thread_rng()` and tests pass a seeded `ChaCha8Rng` or a scripted
//! double that returns fixed rolls.

use rand::Rng;
use std::collections::VecDeque;

pub trait Dice {
    /// Uniform integer in `min..=max`.
    fn roll(&mut self, min: u32, max: u32) -> u32;

    /// True with probability `p` (clamped to 0..=1).
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> Dice for R {
    fn roll(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.gen_range(min..=max)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.gen_bool(p.clamp(0.0, 1.0))
    }

    fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.gen_range(0..len)
    }
}

/// Picks a uniformly random element of a non-empty slice.
pub fn pick<'a, T>(dice: &mut impl Dice, items: &'a [T]) -> &'a T {
    &items[dice.pick_index(items.len())]
}

/// Replays queued outcomes in order. Used by tests that need exact rolls.
///
/// Rolls are clamped into the requested range. When a queue runs dry the
/// double falls back to the low end of the range, a failed chance, and the
/// first item respectively.
#[derive(Debug, Default, Clone)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
    chances: VecDeque<bool>,
    picks: VecDeque<usize>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(mut self, rolls: &[u32]) -> Self {
        self.rolls.extend(rolls.iter().copied());
        self
    }

    pub fn with_chances(mut self, chances: &[bool]) -> Self {
        self.chances.extend(chances.iter().copied());
        self
    }

    pub fn with_picks(mut self, picks: &[usize]) -> Self {
        self.picks.extend(picks.iter().copied());
        self
    }

    pub fn remaining_rolls(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, min: u32, max: u32) -> u32 {
        self.rolls
            .pop_front()
            .map(|r| r.clamp(min, max.max(min)))
            .unwrap_or(min)
    }

    fn chance(&mut self, _p: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        let idx = self.picks.pop_front().unwrap_or(0);
        idx.min(len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_roll_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let r = rng.roll(1, 6);
            assert!((1..=6).contains(&r));
        }
    }

    #[test]
    fn test_roll_degenerate_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(rng.roll(4, 4), 4);
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(rng.chance(1.0));
            assert!(!rng.chance(0.0));
        }
    }

    #[test]
    fn test_scripted_dice_replays_in_order() {
        let mut dice = ScriptedDice::new()
            .with_rolls(&[3, 99])
            .with_chances(&[true]);
        assert_eq!(dice.roll(1, 6), 3);
        // Clamped into range
        assert_eq!(dice.roll(1, 6), 6);
        // Exhausted: low end
        assert_eq!(dice.roll(2, 6), 2);
        assert!(dice.chance(0.1));
        assert!(!dice.chance(0.9));
    }

    #[test]
    fn test_pick_single_item() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(*pick(&mut rng, &["only"]), "only");
    }
}
