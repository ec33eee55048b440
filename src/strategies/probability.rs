use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::die::{DiceSet, MAX_ROLLS_PER_TURN};
use crate::rules::dice_total;
use crate::strategy::{Strategy, TurnView};

/// Probability-driven strategy that adapts to the score situation.
///
/// In plain English:
/// - Early game (below half the target): chase big sums, rerolling
///   anything under 25 on the first roll and under 20 on the second.
/// - Mid game (below 80% of the target): stand on 18, but push the
///   threshold up when trailing, by a fifth of the score gap.
/// - End game: bank immediately once the current sum would reach the
///   target; otherwise settle for smaller sums the closer the target is.
/// - Keeps are drawn per die from a face-value probability, nudged by
///   the roll stage and by how close the target is.
pub struct ProbabilityStrategy<R: Rng> {
    rng: R,
}

impl<R: Rng> ProbabilityStrategy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn keep_probability(value: u8) -> f64 {
        match value {
            6 => 1.0,
            5 => 0.9,
            4 => 0.7,
            3 => 0.5,
            2 => 0.2,
            _ => 0.1,
        }
    }

    fn roll_adjustment(roll_number: u8) -> f64 {
        match roll_number {
            1 => -0.2,
            2 => 0.0,
            _ => 0.2,
        }
    }

    fn target_adjustment(deficit: i32) -> f64 {
        if deficit < 10 {
            0.3
        } else if deficit < 20 {
            0.1
        } else if deficit > 50 {
            -0.1
        } else {
            0.0
        }
    }
}

impl ProbabilityStrategy<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Strategy for ProbabilityStrategy<R> {
    fn wants_reroll(&mut self, view: &TurnView, dice: &DiceSet) -> bool {
        if view.roll_number >= MAX_ROLLS_PER_TURN {
            return false;
        }

        let sum = dice_total(dice) as i32;
        let deficit = view.deficit();
        let gap = view.gap();
        let own = f64::from(view.own_score);
        let target = f64::from(view.target_score);

        if own < target * 0.5 {
            if view.roll_number == 1 {
                return sum < 25;
            }
            if view.roll_number == 2 {
                return sum < 20;
            }
        } else if own < target * 0.8 {
            if gap > 0 {
                let reroll_threshold = 15 + gap / 5;
                return sum < reroll_threshold;
            }
            return sum < 18;
        } else {
            // Standing on a winning sum is never wrong.
            if view.own_score as i32 + sum >= view.target_score as i32 {
                return false;
            }
            if deficit < 20 {
                return sum < 12;
            }
            return sum < 15;
        }

        // Residual: early game with a roll number outside 1..=2.
        self.rng.gen_bool(0.5)
    }

    fn select_keeps(&mut self, view: &TurnView, dice: DiceSet) -> DiceSet {
        let deficit = view.deficit();
        dice.map(|die| {
            let final_probability = (Self::keep_probability(die.value)
                + Self::roll_adjustment(view.roll_number)
                + Self::target_adjustment(deficit))
            .clamp(0.0, 1.0);
            let keep = self.rng.gen_range(0.0..1.0) < final_probability;
            crate::die::Die {
                selected: keep,
                ..die
            }
        })
    }
}
