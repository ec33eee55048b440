use serde::{Deserialize, Serialize};

use crate::die::{DiceSet, starting_dice};

/// One of the two sides of the duel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Computer,
}

/// Coarse phase of the round, derived from the state flags.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum RoundPhase {
    InProgress,
    TieBreak,
    GameOver,
}

/// Observable snapshot of a running duel.
///
/// The orchestrator replaces this value wholesale on every transition;
/// consumers read it, they never write it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub player_dice: DiceSet,
    pub computer_dice: DiceSet,
    pub player_score: u32,
    pub computer_score: u32,
    /// Rolls taken in the current player turn, capped at three.
    pub roll_count: u8,
    pub target_score: u32,
    pub is_game_over: bool,
    pub is_player_winner: bool,
    pub player_wins: u32,
    pub computer_wins: u32,
    pub is_tie_breaker: bool,
    pub is_computer_turn: bool,
}

impl RoundState {
    /// Fresh state: unrolled dice, zero scores, zero win counters.
    pub fn new(target_score: u32) -> Self {
        Self {
            player_dice: starting_dice(),
            computer_dice: starting_dice(),
            player_score: 0,
            computer_score: 0,
            roll_count: 0,
            target_score,
            is_game_over: false,
            is_player_winner: false,
            player_wins: 0,
            computer_wins: 0,
            is_tie_breaker: false,
            is_computer_turn: false,
        }
    }

    /// Exactly one phase holds at any time: a finished game wins over a
    /// pending tie-break, which wins over normal play.
    pub fn phase(&self) -> RoundPhase {
        if self.is_game_over {
            RoundPhase::GameOver
        } else if self.is_tie_breaker {
            RoundPhase::TieBreak
        } else {
            RoundPhase::InProgress
        }
    }

    /// The winning side of a finished game.
    pub fn winner(&self) -> Option<Side> {
        if !self.is_game_over {
            return None;
        }
        Some(if self.is_player_winner {
            Side::Player
        } else {
            Side::Computer
        })
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(crate::die::DEFAULT_TARGET_SCORE)
    }
}
