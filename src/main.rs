//! Terminal front end: you play Black against the random mover.
//!
//! Usage: cargo run --release -- [--seed 42] [--delay-ms 1000] [--fen <placement>]
//!
//! Moves are typed as origin and destination, e.g. `e7e5`, or one square at a time
//! (`e7` selects, `e5` moves there). When a pawn reaches the first
//! rank answer with `q`, `r`, `b` or `n`, or `cancel` to take the move back.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use clap::Parser;
use wizard_chess::board::Board;
use wizard_chess::game::{GameState, HUMAN_SIDE};
use wizard_chess::session::{Session, SessionConfig};
use wizard_chess::types::{Color, PieceType, Square, ALL_SQUARES};

#[derive(Parser, Debug)]
#[command(name = "wizard_chess")]
#[command(about = "Play wizard chess against a random mover")]
struct Args {
    /// Seed for the automated side
    #[arg(long)]
    seed: Option<u64>,

    /// Pause before the automated side moves, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Start from this piece placement instead of the standard position (Black to move)
    #[arg(long)]
    fen: Option<String>,

    /// Don't announce moves
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Click(Square),
    Move(Square, Square),
    Promote(PieceType),
    Cancel,
    Status,
    History,
    Reset,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim().to_lowercase();
    match line.as_str() {
        "cancel" => Some(Command::Cancel),
        "status" => Some(Command::Status),
        "history" => Some(Command::History),
        "reset" => Some(Command::Reset),
        "help" | "?" => Some(Command::Help),
        "quit" | "exit" => Some(Command::Quit),
        "q" | "r" | "b" | "n" => line
            .chars()
            .next()
            .and_then(PieceType::from_char)
            .map(Command::Promote),
        sq if sq.len() == 2 => Square::from_algebraic(sq).map(Command::Click),
        mv if mv.len() == 4 => {
            let from = Square::from_algebraic(mv.get(0..2)?)?;
            let to = Square::from_algebraic(mv.get(2..4)?)?;
            Some(Command::Move(from, to))
        }
        _ => None,
    }
}

fn draw(state: &GameState) {
    state.board().draw_to_terminal();

    let labels: Vec<String> = ALL_SQUARES
        .iter()
        .filter_map(|sq| {
            state
                .marked()
                .label_at(*sq)
                .filter(|_| state.board().piece_at(*sq).is_some())
                .map(|name| format!("{} on {}", name, sq.to_algebraic()))
        })
        .collect();
    if !labels.is_empty() {
        println!("{}", labels.join(", "));
    }

    for color in [Color::White, Color::Black] {
        if state.check().for_color(color) {
            println!("{} is in check!", color.to_human());
        }
    }
    if let Some(outcome) = state.outcome() {
        println!("{}", outcome.message());
        println!("type `reset` to play again or `quit`");
    } else if state.pending_promotion().is_some() {
        println!("promote to (q/r/b/n) or cancel");
    } else if let Some(selected) = state.selected() {
        println!("selected {}", selected.to_algebraic());
    }
}

fn print_help() {
    println!(
        "commands: <square> to select, <from><to> (e.g. e7e5), q/r/b/n, cancel, status, history, reset, quit"
    );
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config = SessionConfig {
        automated_delay: Duration::from_millis(args.delay_ms),
        seed: args.seed,
        silent: args.quiet,
    };
    let state = match &args.fen {
        Some(fen) => GameState::from_board(Board::from_fen(fen)?, HUMAN_SIDE),
        None => GameState::new_game(),
    };
    let mut session = Session::with_state(config, state);

    println!(
        "Wizard chess - game started {}",
        session.state().started_at().format("%Y-%m-%d %H:%M")
    );
    print_help();
    draw(session.state());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if let Some(ticket) = session.schedule_automated_turn() {
            thread::sleep(ticket.remaining());
            if let Err(rejected) = session.run_scheduled(ticket) {
                eprintln!("automated turn skipped: {rejected}");
            }
            draw(session.state());
            continue;
        }

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let result = match parse_command(&line) {
            Some(Command::Click(square)) => {
                if session.click(square) {
                    draw(session.state());
                }
                continue;
            }
            Some(Command::Move(from, to)) => session.attempt_move(from, to),
            Some(Command::Promote(choice)) => session.resolve_promotion(choice),
            Some(Command::Cancel) => {
                session.cancel_promotion();
                Ok(())
            }
            Some(Command::Status) => {
                for color in [Color::White, Color::Black] {
                    let status = session.state().status(color);
                    println!("{}: {:?}", color.to_human(), status);
                }
                continue;
            }
            Some(Command::History) => {
                for entry in session.state().history() {
                    println!("{}. {}", entry.ply, entry.mv.to_human());
                }
                continue;
            }
            Some(Command::Reset) => {
                session.reset();
                Ok(())
            }
            Some(Command::Help) => {
                print_help();
                continue;
            }
            Some(Command::Quit) => break,
            None => {
                println!("unrecognized input `{}`", line.trim());
                continue;
            }
        };

        match result {
            Ok(()) => draw(session.state()),
            Err(rejected) => println!("{rejected}"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(
            parse_command("e7e5"),
            Some(Command::Move(
                Square::from_algebraic("e7").unwrap(),
                Square::from_algebraic("e5").unwrap()
            ))
        );
        assert_eq!(
            parse_command(" N \n"),
            Some(Command::Promote(PieceType::Knight))
        );
        assert_eq!(parse_command("q"), Some(Command::Promote(PieceType::Queen)));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("cancel"), Some(Command::Cancel));
        assert_eq!(
            parse_command("b8"),
            Some(Command::Click(Square::from_algebraic("b8").unwrap()))
        );
        assert_eq!(parse_command("e7e9"), None);
        assert_eq!(parse_command("k"), None);
        assert_eq!(parse_command(""), None);
    }
}
