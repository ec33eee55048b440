use greedbot::{DiceSet, Die, ProbabilityStrategy, Strategy, TurnView};

fn dice(values: [u8; 5]) -> DiceSet {
    values.map(Die::new)
}

fn view(roll_number: u8, own_score: u32, opponent_score: u32, target_score: u32) -> TurnView {
    TurnView {
        roll_number,
        own_score,
        opponent_score,
        target_score,
    }
}

#[test]
fn never_rerolls_past_the_cap() {
    let mut strategy = ProbabilityStrategy::seeded(1);
    for (own, opp) in [(0, 0), (40, 80), (90, 90), (100, 0)] {
        assert!(!strategy.wants_reroll(&view(3, own, opp, 101), &dice([1, 1, 1, 1, 1])));
        assert!(!strategy.wants_reroll(&view(3, own, opp, 101), &dice([6, 6, 6, 6, 6])));
    }
}

#[test]
fn early_game_chases_big_sums() {
    let mut strategy = ProbabilityStrategy::seeded(2);
    // Roll 1 stands on 25.
    assert!(!strategy.wants_reroll(&view(1, 0, 0, 101), &dice([6, 6, 6, 6, 1])));
    assert!(strategy.wants_reroll(&view(1, 0, 0, 101), &dice([6, 6, 6, 5, 1])));
    // Roll 2 stands on 20.
    assert!(!strategy.wants_reroll(&view(2, 0, 0, 101), &dice([4, 4, 4, 4, 4])));
    assert!(strategy.wants_reroll(&view(2, 0, 0, 101), &dice([4, 4, 4, 4, 3])));
}

#[test]
fn mid_game_stands_on_eighteen_when_not_behind() {
    let mut strategy = ProbabilityStrategy::seeded(3);
    // 60 of 101 is mid game; level scores.
    assert!(!strategy.wants_reroll(&view(1, 60, 60, 101), &dice([6, 4, 4, 2, 2])));
    assert!(strategy.wants_reroll(&view(1, 60, 60, 101), &dice([6, 4, 3, 2, 2])));
}

#[test]
fn mid_game_raises_threshold_when_trailing() {
    let mut strategy = ProbabilityStrategy::seeded(4);
    // Trailing by 20 lifts the stand threshold to 19.
    assert!(strategy.wants_reroll(&view(1, 60, 80, 101), &dice([6, 4, 4, 2, 2])));
    assert!(!strategy.wants_reroll(&view(1, 60, 80, 101), &dice([6, 5, 4, 2, 2])));
}

#[test]
fn end_game_locks_in_a_winning_sum() {
    let mut strategy = ProbabilityStrategy::seeded(5);
    // 90 + 11 reaches 101: stand, even though 11 is a poor sum.
    assert!(!strategy.wants_reroll(&view(1, 90, 0, 101), &dice([3, 2, 2, 2, 2])));
    assert!(!strategy.wants_reroll(&view(2, 90, 50, 101), &dice([3, 2, 2, 2, 2])));
}

#[test]
fn end_game_settles_small_when_target_is_close() {
    let mut strategy = ProbabilityStrategy::seeded(6);
    // 85 of 101: sixteen points out, stand on 12.
    assert!(strategy.wants_reroll(&view(1, 85, 0, 101), &dice([3, 2, 2, 2, 2])));
    assert!(!strategy.wants_reroll(&view(1, 85, 0, 101), &dice([4, 2, 2, 2, 2])));
    // 81 of 101: twenty points out, stand on 15.
    assert!(strategy.wants_reroll(&view(1, 81, 0, 101), &dice([6, 2, 2, 2, 2])));
    assert!(!strategy.wants_reroll(&view(1, 81, 0, 101), &dice([6, 3, 2, 2, 2])));
}

#[test]
fn keep_probability_clamps_to_certain_keep() {
    // Face 6 at the boundary: base 1.0, no adjustments at roll 2 with a
    // moderate deficit, clamped keep chance is exactly 1.
    let mut strategy = ProbabilityStrategy::seeded(7);
    let hand = dice([6, 6, 6, 6, 6]);
    for _ in 0..200 {
        let kept = strategy.select_keeps(&view(2, 70, 0, 101), hand);
        assert!(kept.iter().all(|die| die.selected));
    }
    // And well past the boundary: roll 3 and a nearly-reached target push
    // the adjusted chance above 1 before clamping.
    for _ in 0..200 {
        let kept = strategy.select_keeps(&view(3, 95, 0, 101), hand);
        assert!(kept.iter().all(|die| die.selected));
    }
}

#[test]
fn keep_probability_clamps_to_certain_reroll() {
    // Face 1 on roll 1 with a distant target: 0.1 - 0.2 - 0.1 clamps to 0.
    let mut strategy = ProbabilityStrategy::seeded(8);
    let hand = dice([1, 1, 1, 1, 1]);
    for _ in 0..200 {
        let kept = strategy.select_keeps(&view(1, 0, 0, 101), hand);
        assert!(kept.iter().all(|die| !die.selected));
    }
}

#[test]
fn select_keeps_never_changes_face_values() {
    let mut strategy = ProbabilityStrategy::seeded(9);
    let hand = dice([6, 5, 4, 2, 1]);
    let kept = strategy.select_keeps(&view(2, 40, 30, 101), hand);
    for (before, after) in hand.iter().zip(kept.iter()) {
        assert_eq!(before.value, after.value);
    }
}
