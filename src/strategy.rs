use crate::die::DiceSet;

/// What a strategy may observe at a decision point: scores and the roll
/// number, never the opponent's dice.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TurnView {
    /// Roll number within the turn, 1 through 3.
    pub roll_number: u8,
    pub own_score: u32,
    pub opponent_score: u32,
    pub target_score: u32,
}

impl TurnView {
    /// Points still missing to the target; negative once past it.
    pub fn deficit(&self) -> i32 {
        self.target_score as i32 - self.own_score as i32
    }

    /// How far the opponent is ahead; negative when trailing us.
    pub fn gap(&self) -> i32 {
        self.opponent_score as i32 - self.own_score as i32
    }
}

/// Interface for defining turn strategies, for the computer seat or for
/// driving the player seat in batch simulations.
pub trait Strategy {
    /// Whether to reroll the unkept dice instead of banking the sum now.
    fn wants_reroll(&mut self, view: &TurnView, dice: &DiceSet) -> bool;

    /// Marks the dice to keep through the next reroll.
    fn select_keeps(&mut self, view: &TurnView, dice: DiceSet) -> DiceSet;
}
