//! Scoring and turn primitives for the dice duel.
//!
//! Everything here is a pure function over dice sets and scores; the
//! orchestrator in [`crate::game`] sequences them into turns. Randomness
//! enters only through the [`Roller`] passed to [`reroll_unselected`].

use crate::die::{DiceSet, Roller};
use crate::error::GameError;
use crate::state::Side;

/// Replaces the value of every die not marked selected with a fresh face.
/// Selected dice pass through unchanged.
pub fn reroll_unselected(dice: DiceSet, roller: &mut Roller) -> DiceSet {
    dice.map(|die| {
        if die.selected {
            die
        } else {
            crate::die::Die {
                value: roller.face(),
                ..die
            }
        }
    })
}

/// Total of all die values, selected or not.
pub fn dice_total(dice: &DiceSet) -> u32 {
    dice.iter().map(|die| u32::from(die.value)).sum()
}

/// Flips the keep flag of exactly the die at `index`.
pub fn toggle_selection(dice: DiceSet, index: usize) -> Result<DiceSet, GameError> {
    if index >= dice.len() {
        return Err(GameError::DieIndex(index));
    }
    let mut next = dice;
    next[index] = next[index].toggled();
    Ok(next)
}

/// Clears every keep flag.
pub fn clear_selections(dice: DiceSet) -> DiceSet {
    dice.map(|die| die.released())
}

/// Decides whether the game has ended and who won.
///
/// Both sides at or past the target is not a finished game: it means a
/// tie-break is required, so `(false, None)` is returned for that case
/// just as for a game still in progress.
pub fn check_game_over(
    player_score: u32,
    computer_score: u32,
    target_score: u32,
) -> (bool, Option<Side>) {
    let player_reached = player_score >= target_score;
    let computer_reached = computer_score >= target_score;
    match (player_reached, computer_reached) {
        (true, true) => (false, None),
        (true, false) => (true, Some(Side::Player)),
        (false, true) => (true, Some(Side::Computer)),
        (false, false) => (false, None),
    }
}

/// True iff both sides reached the target in the same scoring step.
pub fn tie_break_needed(player_score: u32, computer_score: u32, target_score: u32) -> bool {
    player_score >= target_score && computer_score >= target_score
}

/// Compares single-roll sums; the strictly greater side wins, equal sums
/// stay tied and the caller must re-roll.
pub fn resolve_tie_break(player_dice: &DiceSet, computer_dice: &DiceSet) -> Option<Side> {
    let player_sum = dice_total(player_dice);
    let computer_sum = dice_total(computer_dice);
    if player_sum > computer_sum {
        Some(Side::Player)
    } else if computer_sum > player_sum {
        Some(Side::Computer)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::die::{Die, starting_dice};

    fn dice(values: [u8; 5]) -> DiceSet {
        values.map(Die::new)
    }

    #[test]
    fn test_reroll_preserves_selected_dice() {
        let mut roller = Roller::seeded(11);
        roller.push_script([2, 2, 2]);
        let mut hand = dice([6, 5, 1, 1, 1]);
        hand[0].selected = true;
        hand[1].selected = true;
        let rerolled = reroll_unselected(hand, &mut roller);
        assert_eq!(rerolled[0], hand[0]);
        assert_eq!(rerolled[1], hand[1]);
        assert_eq!(rerolled[2].value, 2);
        assert_eq!(rerolled[3].value, 2);
        assert_eq!(rerolled[4].value, 2);
    }

    #[test]
    fn test_dice_total_counts_every_die() {
        let mut hand = dice([1, 2, 3, 4, 5]);
        hand[3].selected = true;
        assert_eq!(dice_total(&hand), 15);
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let hand = dice([3, 3, 3, 3, 3]);
        let once = toggle_selection(hand, 2).unwrap();
        assert!(once[2].selected);
        let twice = toggle_selection(once, 2).unwrap();
        assert_eq!(twice, hand);
    }

    #[test]
    fn test_toggle_rejects_out_of_range_index() {
        let hand = starting_dice();
        assert_eq!(
            toggle_selection(hand, 5),
            Err(GameError::DieIndex(5))
        );
    }

    #[test]
    fn test_clear_selections_yields_all_false() {
        let mut hand = dice([6, 6, 6, 6, 6]);
        for die in hand.iter_mut() {
            die.selected = true;
        }
        let cleared = clear_selections(hand);
        assert!(cleared.iter().all(|die| !die.selected));
    }

    #[test]
    fn test_check_game_over_table() {
        assert_eq!(check_game_over(101, 50, 101), (true, Some(Side::Player)));
        assert_eq!(check_game_over(50, 101, 101), (true, Some(Side::Computer)));
        assert_eq!(check_game_over(101, 101, 101), (false, None));
        assert_eq!(check_game_over(50, 50, 101), (false, None));
    }

    #[test]
    fn test_tie_break_needed_only_when_both_reached() {
        assert!(tie_break_needed(101, 101, 101));
        assert!(tie_break_needed(120, 105, 101));
        assert!(!tie_break_needed(101, 50, 101));
        assert!(!tie_break_needed(50, 101, 101));
        assert!(!tie_break_needed(50, 50, 101));
    }

    #[test]
    fn test_resolve_tie_break() {
        // 20 vs 15: player takes it.
        let player = dice([6, 5, 4, 3, 2]);
        let computer = dice([5, 4, 3, 2, 1]);
        assert_eq!(resolve_tie_break(&player, &computer), Some(Side::Player));
        assert_eq!(resolve_tie_break(&computer, &player), Some(Side::Computer));
        // Equal sums stay tied.
        let also_twenty = dice([4, 4, 4, 4, 4]);
        assert_eq!(resolve_tie_break(&player, &also_twenty), None);
    }
}
