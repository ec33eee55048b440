//! Greed-style dice duel engine tailored for bot experimentation and
//! scripted simulations.

pub mod die;
pub mod error;
pub mod game;
pub mod rules;
pub mod state;
pub mod strategies;
pub mod strategy;
pub mod visualize;

pub use crate::die::{
    DEFAULT_TARGET_SCORE, DICE_PER_SIDE, DiceSet, Die, MAX_FACE, MAX_ROLLS_PER_TURN, MIN_FACE,
    Roller, starting_dice,
};
pub use crate::error::GameError;
pub use crate::game::{Game, GameBuilder, GameConfig, TurnEvent};
pub use crate::state::{RoundPhase, RoundState, Side};
pub use crate::strategies::{
    ProbabilityStrategy, RandomStrategy, create_strategy_from_spec, label_for_spec,
};
pub use crate::strategy::{Strategy, TurnView};
pub use crate::visualize::{VisualOptions, describe_event, render_state};
