use serde::{Deserialize, Serialize};

use crate::die::{DEFAULT_TARGET_SCORE, MAX_FACE, MAX_ROLLS_PER_TURN, MIN_FACE, Roller, starting_dice};
use crate::error::GameError;
use crate::rules;
use crate::state::{RoundState, Side};
use crate::strategies::ProbabilityStrategy;
use crate::strategy::{Strategy, TurnView};

const DEFAULT_SEED: u64 = 0xD1CE_D1CE_D1CE_D1CE;
const STRATEGY_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub target_score: u32,
    pub seed: u64,
}

impl GameConfig {
    pub fn new(target_score: u32, seed: u64) -> Result<Self, GameError> {
        if target_score == 0 {
            return Err(GameError::InvalidConfiguration(
                "target score must be positive",
            ));
        }
        Ok(Self { target_score, seed })
    }
}

/// Builder that enables deterministic roll injection for tests and demos.
pub struct GameBuilder {
    config: GameConfig,
    strategy: Option<Box<dyn Strategy>>,
    scripted_rolls: Vec<u8>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig {
                target_score: DEFAULT_TARGET_SCORE,
                seed: DEFAULT_SEED,
            },
            strategy: None,
            scripted_rolls: Vec::new(),
        }
    }

    pub fn with_target_score(mut self, target_score: u32) -> Self {
        self.config.target_score = target_score;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Override the computer seat's strategy. When not set, a
    /// probability strategy seeded from the game seed is used.
    pub fn with_strategy(mut self, strategy: Box<dyn Strategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Queue die faces to be produced, in order, before any random roll.
    pub fn with_scripted_rolls(mut self, faces: Vec<u8>) -> Self {
        self.scripted_rolls = faces;
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One observable transition of the machine-driven sequences. Drivers
/// insert their presentation pacing between `step` calls based on these.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    ComputerRolled { roll_number: u8 },
    ComputerKeptDice { roll_number: u8 },
    ComputerScored { points: u32 },
    TieBreakStarted,
    TieBreakRolled,
    TieBreakResolved { winner: Option<Side> },
}

/// Next machine transition to perform. `None` means the orchestrator is
/// idle and waiting on player operations.
enum Pending {
    ComputerOpen,
    ComputerDecide { roll: u8 },
    ComputerReroll { roll: u8 },
    TieBreakReset,
    TieBreakRoll,
    TieBreakResolve,
}

/// Core duel orchestrator.
///
/// Owns the single [`RoundState`] snapshot and replaces it wholesale on
/// every transition. Player operations are discrete calls; the computer
/// turn and the tie-break run as a step machine driven by [`Game::step`],
/// so a presentation layer can render every intermediate state.
pub struct Game {
    state: RoundState,
    roller: Roller,
    strategy: Box<dyn Strategy>,
    pending: Option<Pending>,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder {
            config,
            strategy: None,
            scripted_rolls: Vec::new(),
        }
        .build()
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder {
            config,
            strategy,
            scripted_rolls,
        } = builder;
        if config.target_score == 0 {
            return Err(GameError::InvalidConfiguration(
                "target score must be positive",
            ));
        }
        if scripted_rolls
            .iter()
            .any(|face| !(MIN_FACE..=MAX_FACE).contains(face))
        {
            return Err(GameError::InvalidConfiguration(
                "scripted face out of range",
            ));
        }
        let mut roller = Roller::seeded(config.seed);
        roller.push_script(scripted_rolls);
        let strategy = strategy.unwrap_or_else(|| {
            Box::new(ProbabilityStrategy::seeded(config.seed ^ STRATEGY_SEED_SALT))
        });
        Ok(Game {
            state: RoundState::new(config.target_score),
            roller,
            strategy,
            pending: None,
        })
    }

    /// Read-only view of the current snapshot.
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Owned copy of the current snapshot.
    pub fn snapshot(&self) -> RoundState {
        self.state.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_game_over
    }

    pub fn winner(&self) -> Option<Side> {
        self.state.winner()
    }

    /// True when the orchestrator is idle and accepting player operations.
    pub fn is_player_turn(&self) -> bool {
        self.pending.is_none() && !self.state.is_game_over
    }

    /// Queue die faces ahead of the random draws. Deterministic roll
    /// injection for tests and scripted demos; faces must be in 1..=6.
    pub fn script_rolls(&mut self, faces: impl IntoIterator<Item = u8>) {
        let faces: Vec<u8> = faces.into_iter().collect();
        debug_assert!(
            faces.iter().all(|face| (MIN_FACE..=MAX_FACE).contains(face)),
            "scripted face out of range"
        );
        self.roller.push_script(faces);
    }

    /// Resets to a fresh round with the given target. Win counters carry
    /// over; construct a new `Game` to zero them.
    pub fn start_new_game(&mut self, target_score: u32) {
        if target_score == 0 {
            return;
        }
        let player_wins = self.state.player_wins;
        let computer_wins = self.state.computer_wins;
        self.state = RoundState::new(target_score);
        self.state.player_wins = player_wins;
        self.state.computer_wins = computer_wins;
        self.pending = None;
    }

    /// Changes the target score mid-round. Zero is rejected silently.
    pub fn update_target_score(&mut self, target_score: u32) {
        if target_score > 0 {
            self.state.target_score = target_score;
        }
    }

    /// Rerolls the player's unkept dice. No-op when the game is over,
    /// machine work is pending, or the roll cap is reached; the third
    /// roll scores immediately.
    pub fn roll_player_dice(&mut self) {
        if self.state.is_game_over
            || self.pending.is_some()
            || self.state.roll_count >= MAX_ROLLS_PER_TURN
        {
            return;
        }
        self.state.player_dice = rules::reroll_unselected(self.state.player_dice, &mut self.roller);
        self.state.roll_count += 1;
        if self.state.roll_count >= MAX_ROLLS_PER_TURN {
            self.score_player_now();
        }
    }

    /// Toggles the keep flag of the player die at `index`. No-op `Ok`
    /// before the first roll of a turn, after the game ends, or while
    /// machine work is pending.
    pub fn toggle_player_die(&mut self, index: usize) -> Result<(), GameError> {
        if self.state.is_game_over || self.pending.is_some() || self.state.roll_count == 0 {
            return Ok(());
        }
        self.state.player_dice = rules::toggle_selection(self.state.player_dice, index)?;
        Ok(())
    }

    /// Banks the player's current dice sum and ends the turn. No-op under
    /// the same guards as [`Game::toggle_player_die`].
    pub fn score_player_dice(&mut self) {
        if self.state.is_game_over || self.pending.is_some() || self.state.roll_count == 0 {
            return;
        }
        self.score_player_now();
    }

    fn score_player_now(&mut self) {
        let points = rules::dice_total(&self.state.player_dice);
        self.state.player_score += points;
        self.state.player_dice = rules::clear_selections(self.state.player_dice);
        self.check_game_status();
        if !self.state.is_game_over && !self.state.is_tie_breaker {
            self.pending = Some(Pending::ComputerOpen);
        }
    }

    /// Performs the next machine transition (computer turn or tie-break)
    /// and reports it. Returns `None` when idle. Pacing between calls is
    /// the driver's business; calling in a tight loop is equally correct.
    pub fn step(&mut self) -> Option<TurnEvent> {
        let pending = self.pending.take()?;
        Some(match pending {
            Pending::ComputerOpen => {
                self.state.is_computer_turn = true;
                self.state.computer_dice =
                    rules::reroll_unselected(self.state.computer_dice, &mut self.roller);
                self.pending = Some(Pending::ComputerDecide { roll: 1 });
                TurnEvent::ComputerRolled { roll_number: 1 }
            }
            Pending::ComputerDecide { roll } => {
                let view = self.computer_view(roll);
                if roll < MAX_ROLLS_PER_TURN
                    && self.strategy.wants_reroll(&view, &self.state.computer_dice)
                {
                    self.state.computer_dice =
                        self.strategy.select_keeps(&view, self.state.computer_dice);
                    self.pending = Some(Pending::ComputerReroll { roll });
                    TurnEvent::ComputerKeptDice { roll_number: roll }
                } else {
                    self.score_computer_now()
                }
            }
            Pending::ComputerReroll { roll } => {
                self.state.computer_dice =
                    rules::reroll_unselected(self.state.computer_dice, &mut self.roller);
                self.pending = Some(Pending::ComputerDecide { roll: roll + 1 });
                TurnEvent::ComputerRolled {
                    roll_number: roll + 1,
                }
            }
            Pending::TieBreakReset => {
                self.state.player_dice = starting_dice();
                self.state.computer_dice = starting_dice();
                self.state.roll_count = 0;
                self.pending = Some(Pending::TieBreakRoll);
                TurnEvent::TieBreakStarted
            }
            Pending::TieBreakRoll => {
                // Player dice roll first; scripted faces land on them.
                self.state.player_dice =
                    rules::reroll_unselected(self.state.player_dice, &mut self.roller);
                self.state.computer_dice =
                    rules::reroll_unselected(self.state.computer_dice, &mut self.roller);
                self.pending = Some(Pending::TieBreakResolve);
                TurnEvent::TieBreakRolled
            }
            Pending::TieBreakResolve => {
                let winner =
                    rules::resolve_tie_break(&self.state.player_dice, &self.state.computer_dice);
                match winner {
                    Some(side) => self.declare_winner(side),
                    None => self.pending = Some(Pending::TieBreakReset),
                }
                TurnEvent::TieBreakResolved { winner }
            }
        })
    }

    fn computer_view(&self, roll: u8) -> TurnView {
        TurnView {
            roll_number: roll,
            own_score: self.state.computer_score,
            opponent_score: self.state.player_score,
            target_score: self.state.target_score,
        }
    }

    fn score_computer_now(&mut self) -> TurnEvent {
        let points = rules::dice_total(&self.state.computer_dice);
        self.state.computer_score += points;
        self.state.computer_dice = rules::clear_selections(self.state.computer_dice);
        self.check_game_status();
        self.state.is_computer_turn = false;
        if !self.state.is_game_over && !self.state.is_tie_breaker {
            self.state.roll_count = 0;
        }
        TurnEvent::ComputerScored { points }
    }

    fn check_game_status(&mut self) {
        if rules::tie_break_needed(
            self.state.player_score,
            self.state.computer_score,
            self.state.target_score,
        ) {
            self.state.is_tie_breaker = true;
            self.pending = Some(Pending::TieBreakReset);
            return;
        }
        if let (true, Some(side)) = rules::check_game_over(
            self.state.player_score,
            self.state.computer_score,
            self.state.target_score,
        ) {
            self.declare_winner(side);
        }
    }

    fn declare_winner(&mut self, side: Side) {
        self.state.is_game_over = true;
        self.state.is_tie_breaker = false;
        self.state.is_player_winner = matches!(side, Side::Player);
        match side {
            Side::Player => self.state.player_wins += 1,
            Side::Computer => self.state.computer_wins += 1,
        }
    }
}
