use rand::Rng;

use crate::die::DiceSet;
use crate::strategy::{Strategy, TurnView};

/// Baseline strategy that flips a coin for every decision.
pub struct RandomStrategy<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomStrategy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Strategy for RandomStrategy<R> {
    fn wants_reroll(&mut self, _view: &TurnView, _dice: &DiceSet) -> bool {
        self.rng.gen_bool(0.5)
    }

    fn select_keeps(&mut self, _view: &TurnView, dice: DiceSet) -> DiceSet {
        dice.map(|die| crate::die::Die {
            selected: self.rng.gen_bool(0.5),
            ..die
        })
    }
}
