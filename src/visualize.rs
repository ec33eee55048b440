use std::fmt::Write;

use crate::die::DiceSet;
use crate::game::TurnEvent;
use crate::rules::dice_total;
use crate::state::{RoundPhase, RoundState, Side};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_kept_markers: bool,
    pub show_win_totals: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_kept_markers: true,
            show_win_totals: true,
        }
    }
}

pub fn render_state(state: &RoundState) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &RoundState, options: VisualOptions) -> String {
    let mut out = String::new();
    let phase = match state.phase() {
        RoundPhase::InProgress => {
            if state.is_computer_turn {
                String::from("In progress (computer's turn)")
            } else {
                String::from("In progress")
            }
        }
        RoundPhase::TieBreak => String::from("Tie-break"),
        RoundPhase::GameOver => {
            let winner = if state.is_player_winner {
                "You"
            } else {
                "Computer"
            };
            format!("Finished (winner: {winner})")
        }
    };
    let _ = writeln!(out, "Game status: {phase}");
    let _ = writeln!(
        out,
        "Target: {}  |  Roll {} of 3",
        state.target_score, state.roll_count
    );
    let _ = writeln!(
        out,
        "You      {:>4}  {}",
        state.player_score,
        format_dice(&state.player_dice, options.show_kept_markers)
    );
    let _ = writeln!(
        out,
        "Computer {:>4}  {}",
        state.computer_score,
        format_dice(&state.computer_dice, options.show_kept_markers)
    );
    if options.show_win_totals {
        let _ = writeln!(
            out,
            "Wins: you {} - computer {}",
            state.player_wins, state.computer_wins
        );
    }
    out
}

/// One-line narration of a machine transition, for CLI drivers.
pub fn describe_event(state: &RoundState, event: &TurnEvent) -> String {
    match event {
        TurnEvent::ComputerRolled { roll_number } => format!(
            "Computer rolls ({roll_number}/3): {} (sum {})",
            format_dice(&state.computer_dice, false),
            dice_total(&state.computer_dice)
        ),
        TurnEvent::ComputerKeptDice { .. } => {
            let kept = state
                .computer_dice
                .iter()
                .filter(|die| die.selected)
                .count();
            format!(
                "Computer keeps {kept} of 5: {}",
                format_dice(&state.computer_dice, true)
            )
        }
        TurnEvent::ComputerScored { points } => format!(
            "Computer banks {points} points (total {})",
            state.computer_score
        ),
        TurnEvent::TieBreakStarted => String::from("Both sides hit the target - sudden death!"),
        TurnEvent::TieBreakRolled => format!(
            "Tie-break roll: you {} ({}) vs computer {} ({})",
            format_dice(&state.player_dice, false),
            dice_total(&state.player_dice),
            format_dice(&state.computer_dice, false),
            dice_total(&state.computer_dice)
        ),
        TurnEvent::TieBreakResolved { winner } => match winner {
            Some(Side::Player) => String::from("Tie-break goes to you!"),
            Some(Side::Computer) => String::from("Tie-break goes to the computer."),
            None => String::from("Still tied - rolling again."),
        },
    }
}

/// Kept dice render in brackets, loose dice in parentheses.
fn format_dice(dice: &DiceSet, markers: bool) -> String {
    let mut parts = Vec::with_capacity(dice.len());
    for die in dice {
        if markers && die.selected {
            parts.push(format!("[{}]", die.value));
        } else {
            parts.push(format!("({})", die.value));
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameBuilder;

    #[test]
    fn render_and_describe_include_expected_phrases() {
        let mut game = GameBuilder::new()
            .with_target_score(50)
            .with_scripted_rolls(vec![6, 6, 6, 6, 6])
            .build()
            .expect("game");
        game.roll_player_dice();
        let text = render_state(game.state());
        assert!(text.contains("Target: 50"));
        assert!(text.contains("Roll 1 of 3"));
        assert!(text.contains("You"));
        assert!(text.contains("Computer"));
        assert!(text.contains("(6) (6) (6) (6) (6)"));

        let scored = TurnEvent::ComputerScored { points: 17 };
        assert!(describe_event(game.state(), &scored).contains("banks 17"));
        let resolved = TurnEvent::TieBreakResolved { winner: None };
        assert!(describe_event(game.state(), &resolved).contains("Still tied"));
    }
}
