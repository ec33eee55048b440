use std::env;
use std::error::Error;
use std::io::{self, Write};
use std::process;
use std::thread;
use std::time::Duration;

use greedbot::{
    DEFAULT_TARGET_SCORE, Game, Strategy, TurnEvent, TurnView, create_strategy_from_spec,
    describe_event, render_state,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_D1CE_F00D;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let mut seed = DEFAULT_SEED;
    let mut target = DEFAULT_TARGET_SCORE;
    let mut fast = false;
    let mut seat_spec: Option<String> = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--seed requires a value".to_string())?;
                seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid seed value: {value}"))?;
            }
            "--target" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--target requires a value".to_string())?;
                target = value
                    .parse::<u32>()
                    .map_err(|_| format!("invalid target value: {value}"))?;
                if target == 0 {
                    return Err("target must be positive".into());
                }
            }
            "--fast" => fast = true,
            "--help" => {
                print_usage();
                return Ok(());
            }
            other => {
                if seat_spec.is_some() {
                    return Err(format!("unexpected argument: {other}").into());
                }
                seat_spec = Some(other.to_string());
            }
        }
    }

    let seat_spec = seat_spec.unwrap_or_else(|| String::from("human"));
    let mut auto_seat: Option<Box<dyn Strategy>> = if seat_spec.eq_ignore_ascii_case("human") {
        None
    } else {
        Some(create_strategy_from_spec(&seat_spec, 0, seed)?)
    };

    let mut game = Game::builder()
        .with_seed(seed)
        .with_target_score(target)
        .build()?;

    println!("Dice duel to {target}. First side at or past the target wins.\n");
    loop {
        while let Some(event) = game.step() {
            println!("{}", describe_event(game.state(), &event));
            if !fast {
                thread::sleep(pacing(&event));
            }
        }
        if game.is_finished() {
            break;
        }
        match auto_seat.as_mut() {
            Some(strategy) => play_auto_turn(&mut game, strategy.as_mut()),
            None => play_human_turn(&mut game)?,
        }
    }

    let state = game.state();
    println!("\n{}", render_state(state));
    if state.is_player_winner {
        println!("Game finished. You win!");
    } else {
        println!("Game finished. The computer wins.");
    }
    Ok(())
}

/// Presentation pacing between machine steps; the engine itself never waits.
fn pacing(event: &TurnEvent) -> Duration {
    match event {
        TurnEvent::ComputerKeptDice { .. } => Duration::from_millis(500),
        _ => Duration::from_millis(1000),
    }
}

fn play_human_turn(game: &mut Game) -> Result<(), Box<dyn Error>> {
    println!("\n=== Your turn ===");
    while game.is_player_turn() {
        println!("{}", render_state(game.state()));
        println!("Commands: (r)oll, (k)eep <die 1-5>, (s)core, help, (q)uit.");
        print!("Selection: ");
        if io::stdout().flush().is_err() {
            eprintln!("failed to flush stdout");
        }
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            eprintln!("failed to read input");
            continue;
        }
        let trimmed = input.trim().to_ascii_lowercase();
        let mut parts = trimmed.split_whitespace();
        match parts.next() {
            Some("r") | Some("roll") => game.roll_player_dice(),
            Some("k") | Some("keep") => {
                if game.state().roll_count == 0 {
                    println!("Roll first; there is nothing to keep yet.");
                    continue;
                }
                let Some(value) = parts.next() else {
                    println!("keep needs a die number, e.g. 'keep 2'.");
                    continue;
                };
                let Ok(number) = value.parse::<usize>() else {
                    println!("Invalid die number: '{value}'.");
                    continue;
                };
                if number == 0 || number > 5 {
                    println!("Die numbers run from 1 to 5.");
                    continue;
                }
                game.toggle_player_die(number - 1)?;
            }
            Some("s") | Some("score") => {
                if game.state().roll_count == 0 {
                    println!("Roll at least once before scoring.");
                    continue;
                }
                game.score_player_dice();
            }
            Some("help") => {
                println!("roll rerolls every die not marked kept (max 3 rolls; the third");
                println!("scores automatically). keep <n> toggles a die. score banks the sum.");
            }
            Some("q") | Some("quit") => {
                println!("Exiting game at user's request.");
                process::exit(0);
            }
            Some(other) => println!("Unknown command: '{other}'. Type 'help' for help."),
            None => {}
        }
    }
    Ok(())
}

fn play_auto_turn(game: &mut Game, strategy: &mut dyn Strategy) {
    game.roll_player_dice();
    while game.is_player_turn() {
        let state = game.state();
        let view = TurnView {
            roll_number: state.roll_count,
            own_score: state.player_score,
            opponent_score: state.computer_score,
            target_score: state.target_score,
        };
        let dice = state.player_dice;
        if !strategy.wants_reroll(&view, &dice) {
            game.score_player_dice();
            return;
        }
        let keeps = strategy.select_keeps(&view, dice);
        for (index, (current, wanted)) in dice.iter().zip(keeps.iter()).enumerate() {
            if current.selected != wanted.selected {
                // Index is in range by construction.
                let _ = game.toggle_player_die(index);
            }
        }
        game.roll_player_dice();
    }
}

fn print_usage() {
    println!("Usage: simulate [OPTIONS] [SEAT]");
    println!("  --seed <u64>      Seed for dice and strategies (default: {DEFAULT_SEED:#x})");
    println!("  --target <u32>    Target score (default: {DEFAULT_TARGET_SCORE})");
    println!("  --fast            Skip presentation pacing between computer steps");
    println!("  --help            Show this help message");
    println!("Seat (who plays the player side, default human):");
    println!("  human                  Interactive play via stdin");
    println!("  probability[:seed]     The computer's own probability strategy");
    println!("  random[:seed]          Coin-flip baseline strategy");
}
