use std::collections::VecDeque;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// A single six-sided die together with its keep flag.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Die {
    /// Face value between 1 and 6.
    pub value: u8,
    /// Whether the die is kept (excluded from the next reroll).
    pub selected: bool,
}

pub const MIN_FACE: u8 = 1;
pub const MAX_FACE: u8 = 6;
pub const DICE_PER_SIDE: usize = 5;
pub const MAX_ROLLS_PER_TURN: u8 = 3;
pub const DEFAULT_TARGET_SCORE: u32 = 101;

/// One side's dice, in display order.
pub type DiceSet = [Die; DICE_PER_SIDE];

impl Die {
    #[inline]
    pub fn new(value: u8) -> Self {
        debug_assert!((MIN_FACE..=MAX_FACE).contains(&value));
        Self {
            value,
            selected: false,
        }
    }

    /// Returns a copy with the keep flag flipped.
    #[inline]
    pub fn toggled(self) -> Self {
        Self {
            selected: !self.selected,
            ..self
        }
    }

    /// Returns a copy with the keep flag cleared.
    #[inline]
    pub fn released(self) -> Self {
        Self {
            selected: false,
            ..self
        }
    }
}

impl Default for Die {
    fn default() -> Self {
        Self::new(MIN_FACE)
    }
}

/// Five unrolled dice, as both sides start a game or a tie-break round.
pub fn starting_dice() -> DiceSet {
    [Die::default(); DICE_PER_SIDE]
}

/// Source of die faces.
///
/// Wraps a seeded RNG so games are reproducible. A scripted prefix of
/// faces can be queued ahead of the random draws, which is how tests pin
/// down exact rolls.
pub struct Roller {
    rng: StdRng,
    script: VecDeque<u8>,
}

impl Roller {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            script: VecDeque::new(),
        }
    }

    /// Queues faces to be returned, in order, before any random draw.
    pub fn push_script(&mut self, faces: impl IntoIterator<Item = u8>) {
        self.script.extend(faces);
    }

    /// Number of scripted faces not yet consumed.
    pub fn scripted_remaining(&self) -> usize {
        self.script.len()
    }

    /// Draws the next face: the scripted prefix first, then uniform in 1..=6.
    pub fn face(&mut self) -> u8 {
        match self.script.pop_front() {
            Some(face) => face,
            None => self.rng.gen_range(MIN_FACE..=MAX_FACE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_faces_come_first() {
        let mut roller = Roller::seeded(7);
        roller.push_script([6, 1, 3]);
        assert_eq!(roller.face(), 6);
        assert_eq!(roller.face(), 1);
        assert_eq!(roller.face(), 3);
        assert_eq!(roller.scripted_remaining(), 0);
    }

    #[test]
    fn random_faces_stay_in_range() {
        let mut roller = Roller::seeded(42);
        for _ in 0..1000 {
            let face = roller.face();
            assert!((MIN_FACE..=MAX_FACE).contains(&face));
        }
    }

    #[test]
    fn toggled_is_involutive() {
        let die = Die::new(4);
        assert!(die.toggled().selected);
        assert_eq!(die.toggled().toggled(), die);
    }
}
