//! Self-play runner - random mover against random mover, many games in parallel
//!
//! Usage: cargo run --release --bin self_play -- --games 1000 --seed 7
//!
//! Both sides pick uniformly among their legal moves. Black goes through the same
//! `attempt_move`/`resolve_promotion` path as a human would, so every game doubles as a
//! check that the rules never leave a side without a legal answer to its own moves.

use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::bail;
use itertools::Itertools;
use rayon::prelude::*;

use wizard_chess::engine::RandomMover;
use wizard_chess::game::{GameState, Outcome, Rejected, AUTOMATED_SIDE};

#[derive(Parser, Debug)]
#[command(name = "self_play")]
#[command(about = "Play random games and tally how they end")]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 100)]
    games: u64,

    /// Stop a game after this many plies
    #[arg(long, default_value_t = 400)]
    max_plies: usize,

    /// Seed of the first game; game n uses seed + n
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Worker threads (defaults to one per core)
    #[arg(short, long)]
    threads: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum GameEnd {
    CheckmateByWhite,
    CheckmateByBlack,
    Stalemate,
    MarkedCaptured(&'static str),
    MoveLimit,
}

impl GameEnd {
    fn from_outcome(outcome: Option<Outcome>) -> Self {
        match outcome {
            Some(Outcome::Checkmate { winner }) if winner == AUTOMATED_SIDE => {
                GameEnd::CheckmateByWhite
            }
            Some(Outcome::Checkmate { .. }) => GameEnd::CheckmateByBlack,
            Some(Outcome::Stalemate) => GameEnd::Stalemate,
            Some(Outcome::MarkedPieceCaptured { identity, .. }) => {
                GameEnd::MarkedCaptured(identity.name())
            }
            None => GameEnd::MoveLimit,
        }
    }
}

fn play_one(seed: u64, max_plies: usize) -> Result<(GameEnd, usize), Rejected> {
    let mut mover = RandomMover::new(Some(seed));
    let mut state = GameState::new_game();

    while !state.is_over() && state.history().len() < max_plies {
        state = if state.turn() == AUTOMATED_SIDE {
            state.play_automated(mover.rng())?
        } else {
            let mv = mover
                .choose_move(state.board(), state.turn())
                .ok_or(Rejected::NoLegalMoves)?;
            let next = state.attempt_move(mv.from, mv.to)?;
            match mv.promotion {
                Some(choice) => next.resolve_promotion(choice)?,
                None => next,
            }
        };
    }
    Ok((GameEnd::from_outcome(state.outcome()), state.history().len()))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads.unwrap_or(0))
        .build()?;

    println!(
        "Playing {} games on {} threads, max {} plies",
        args.games,
        pool.current_num_threads(),
        args.max_plies
    );
    let start = Instant::now();

    let results: Vec<(u64, Result<(GameEnd, usize), Rejected>)> = pool.install(|| {
        (0..args.games)
            .into_par_iter()
            .map(|n| {
                let seed = args.seed.wrapping_add(n);
                (seed, play_one(seed, args.max_plies))
            })
            .collect()
    });

    let failures: Vec<_> = results
        .iter()
        .filter_map(|(seed, result)| result.as_ref().err().map(|e| (*seed, *e)))
        .collect();
    for (seed, rejected) in &failures {
        eprintln!("game with seed {seed} stopped early: {rejected}");
    }

    let finished: Vec<(GameEnd, usize)> = results
        .into_iter()
        .filter_map(|(_, result)| result.ok())
        .collect();
    let total_plies: usize = finished.iter().map(|(_, plies)| plies).sum();

    println!("Results after {:.2?}:", start.elapsed());
    for (end, count) in finished
        .iter()
        .map(|(end, _)| *end)
        .counts()
        .into_iter()
        .sorted()
    {
        println!("  {:<30} {:>6}", format!("{end:?}"), count);
    }
    if !finished.is_empty() {
        println!(
            "  average length: {:.1} plies",
            total_plies as f64 / finished.len() as f64
        );
    }

    if !failures.is_empty() {
        bail!("{} of {} games hit a rejected move", failures.len(), args.games);
    }
    Ok(())
}
