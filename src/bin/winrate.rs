use std::collections::HashMap;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use plotters::prelude::*;

use greedbot::{
    DEFAULT_TARGET_SCORE, Game, Strategy, TurnView, create_strategy_from_spec, label_for_spec,
};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xC0FFEE_u64 << 32 | 0xD1CE_u64;

#[derive(Parser, Debug)]
#[command(
    name = "winrate",
    about = "Run multiple duels and plot per-seat win rates."
)]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 200)]
    games: usize,

    /// Base RNG seed (dice + strategy RNGs are derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Target score per game
    #[arg(short = 't', long = "target", default_value_t = DEFAULT_TARGET_SCORE)]
    target: u32,

    /// Output chart file (png)
    #[arg(short = 'o', long = "out", default_value = "winrates.png")]
    out: PathBuf,

    /// Show a textual summary only (no chart)
    #[arg(long = "no-chart", action = ArgAction::SetTrue)]
    no_chart: bool,

    /// Safety cap on machine steps per game; games exceeding it are
    /// aborted (counted as no win for either seat)
    #[arg(long = "max-steps", default_value_t = 10_000)]
    max_steps: usize,

    /// Strategy spec for the player seat (e.g. probability, random)
    player: String,

    /// Strategy spec for the computer seat
    computer: String,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if args.player.to_ascii_lowercase().starts_with("human")
        || args.computer.to_ascii_lowercase().starts_with("human")
    {
        return Err("human seats are not supported in winrate runs".into());
    }
    if args.target == 0 {
        return Err("target must be positive".into());
    }

    let player_label = format!("{} (P)", label_for_spec(&args.player));
    let computer_label = format!("{} (C)", label_for_spec(&args.computer));

    let mut wins_per_label: HashMap<String, usize> = HashMap::new();
    let mut score_per_label: HashMap<String, u64> = HashMap::new();
    let mut aborted_games = 0usize;

    for game_idx in 0..args.games {
        let dice_seed = mix_seed(args.seed, game_idx as u64, 0xD1CE);
        let computer_strategy =
            create_strategy_from_spec(&args.computer, 1, mix_seed(args.seed, game_idx as u64, 1))?;
        let mut player_strategy =
            create_strategy_from_spec(&args.player, 0, mix_seed(args.seed, game_idx as u64, 0))?;

        let mut game = Game::builder()
            .with_seed(dice_seed)
            .with_target_score(args.target)
            .with_strategy(computer_strategy)
            .build()?;

        let mut steps = 0usize;
        while !game.is_finished() && steps < args.max_steps {
            if game.is_player_turn() {
                play_seat_turn(&mut game, player_strategy.as_mut());
            }
            while let Some(_event) = game.step() {
                steps += 1;
                if steps >= args.max_steps {
                    break;
                }
            }
        }

        let state = game.state();
        *score_per_label.entry(player_label.clone()).or_default() += u64::from(state.player_score);
        *score_per_label.entry(computer_label.clone()).or_default() +=
            u64::from(state.computer_score);
        match game.winner() {
            Some(greedbot::Side::Player) => {
                *wins_per_label.entry(player_label.clone()).or_default() += 1;
            }
            Some(greedbot::Side::Computer) => {
                *wins_per_label.entry(computer_label.clone()).or_default() += 1;
            }
            None => aborted_games += 1,
        }
    }

    let mut results: Vec<(String, f64, usize)> = Vec::new();
    for label in [&player_label, &computer_label] {
        let wins = wins_per_label.get(label).copied().unwrap_or(0);
        let rate = if args.games > 0 {
            wins as f64 / args.games as f64
        } else {
            0.0
        };
        results.push((label.clone(), rate, wins));
    }
    results.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    println!("Win rates over {} games to {}:", args.games, args.target);
    for (label, rate, wins) in &results {
        let total_score = score_per_label.get(label).copied().unwrap_or(0);
        let avg_score = if args.games > 0 {
            total_score as f64 / args.games as f64
        } else {
            0.0
        };
        println!(
            "  {label:<18}  {wins}/{}  ({:.2}%)   avg final score: {avg_score:>7.2}",
            args.games,
            rate * 100.0
        );
    }
    if aborted_games > 0 {
        println!("\nNote: {aborted_games} game(s) hit the step cap and were aborted.");
    }

    if !args.no_chart {
        render_bar_chart(&args.out, &results)?;
        println!("\nChart written to {}", args.out.display());
    }

    Ok(())
}

/// Drives the player seat through the public player operations using the
/// given strategy, until the turn ends (scored, auto-scored on the third
/// roll, or the game finished).
fn play_seat_turn(game: &mut Game, strategy: &mut dyn Strategy) {
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
                let _ = game.toggle_player_die(index);
            }
        }
        game.roll_player_dice();
    }
}

fn mix_seed(base: u64, a: u64, b: u64) -> u64 {
    // Simple reversible mixer (xorshift-like mix).
    let mut z =
        base ^ (a.wrapping_mul(0x9E37_79B9_7F4A_7C15)) ^ (b.wrapping_mul(0xBF58_476D_1CE4_E5B9));
    z ^= z >> 12;
    z ^= z << 25;
    z ^= z >> 27;
    z
}

fn render_bar_chart(out: &PathBuf, data: &[(String, f64, usize)]) -> Result<(), Box<dyn Error>> {
    let labels: Vec<String> = data.iter().map(|(l, _, _)| l.clone()).collect();
    let values: Vec<f64> = data.iter().map(|(_, r, _)| r * 100.0).collect();
    let max_value = values.iter().cloned().fold(10.0_f64, f64::max);

    let root = BitMapBackend::new(out, (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| format!("{e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Dice Duel Win Rates", ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0..labels.len(), 0.0f64..max_value)
        .map_err(|e| format!("{e}"))?;

    chart
        .configure_mesh()
        .y_desc("Win rate (%)")
        .x_desc("Seat")
        .x_labels(labels.len())
        .x_label_formatter(&|idx| {
            if *idx < labels.len() {
                labels[*idx].clone()
            } else {
                idx.to_string()
            }
        })
        .y_label_formatter(&|v| format!("{v:.0}"))
        .light_line_style(&WHITE.mix(0.0))
        .draw()
        .map_err(|e| format!("{e}"))?;

    for (i, value) in values.iter().enumerate() {
        let rect = Rectangle::new([(i, 0.0), (i, *value)], BLUE.filled());
        chart
            .draw_series(std::iter::once(rect))
            .map_err(|e| format!("{e}"))?;
    }

    root.present().map_err(|e| format!("{e}"))?;
    Ok(())
}
