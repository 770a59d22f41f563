//! Owns the current `GameState` for a front end, together with the random mover and the
//! timing of the automated side's turn.
//!
//! The automated reply is not played immediately: the front end asks for a `ScheduledTurn`,
//! waits until it is due, then hands it back. Every change to the game bumps a generation
//! counter and a ticket from an older generation is refused, so a reset (or any other
//! change) while the reply is pending cancels it.

use std::time::{Duration, Instant};

use crate::engine::RandomMover;
use crate::game::{GameState, Rejected, AUTOMATED_SIDE};
use crate::types::{PieceType, Square};

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Pause before the automated side answers
    pub automated_delay: Duration,
    /// Seed for the random mover, `None` to seed from the OS
    pub seed: Option<u64>,
    /// Don't print moves as they are played
    pub silent: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            automated_delay: Duration::from_millis(1000),
            seed: None,
            silent: false,
        }
    }
}

/// A promise that the automated side will move once `due` has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTurn {
    generation: u64,
    pub due: Instant,
}

impl ScheduledTurn {
    pub fn remaining(&self) -> Duration {
        self.due.saturating_duration_since(Instant::now())
    }
}

pub struct Session {
    state: GameState,
    generation: u64,
    scheduled: Option<ScheduledTurn>,
    mover: RandomMover,
    config: SessionConfig,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_state(config, GameState::new_game())
    }

    pub fn with_state(config: SessionConfig, state: GameState) -> Self {
        Self {
            state,
            generation: 0,
            scheduled: None,
            mover: RandomMover::new(config.seed),
            config,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn replace(&mut self, next: GameState) {
        if next == self.state {
            return;
        }
        let moves_before = self.state.history().len();
        self.state = next;
        self.generation += 1;
        self.scheduled = None;

        if !self.config.silent {
            for entry in self.state.history().iter().skip(moves_before) {
                println!("move {}: {}", entry.ply, entry.mv.to_human());
            }
            if let Some(outcome) = self.state.outcome() {
                println!("{}", outcome.message());
            }
        }
    }

    /// Returns true if the click changed anything
    pub fn click(&mut self, square: Square) -> bool {
        let generation = self.generation;
        let next = self.state.click(square);
        self.replace(next);
        generation != self.generation
    }

    pub fn attempt_move(&mut self, from: Square, to: Square) -> Result<(), Rejected> {
        let next = self.state.attempt_move(from, to)?;
        self.replace(next);
        Ok(())
    }

    pub fn resolve_promotion(&mut self, choice: PieceType) -> Result<(), Rejected> {
        let next = self.state.resolve_promotion(choice)?;
        self.replace(next);
        Ok(())
    }

    pub fn cancel_promotion(&mut self) {
        let next = self.state.cancel_promotion();
        self.replace(next);
    }

    /// Start a new game. Any scheduled automated turn is dropped with the old one.
    pub fn reset(&mut self) {
        self.state = self.state.reset();
        self.generation += 1;
        self.scheduled = None;
    }

    /// Schedule the automated side's reply, if it is its turn. Asking again before the
    /// ticket is used returns the same ticket.
    pub fn schedule_automated_turn(&mut self) -> Option<ScheduledTurn> {
        if self.state.turn() != AUTOMATED_SIDE
            || self.state.is_over()
            || self.state.pending_promotion().is_some()
        {
            return None;
        }
        if let Some(ticket) = self.scheduled {
            return Some(ticket);
        }
        let ticket = ScheduledTurn {
            generation: self.generation,
            due: Instant::now() + self.config.automated_delay,
        };
        self.scheduled = Some(ticket);
        Some(ticket)
    }

    /// Play the automated move promised by `ticket`. Refused if the game has changed since
    /// the ticket was issued, or if the ticket was already used.
    pub fn run_scheduled(&mut self, ticket: ScheduledTurn) -> Result<(), Rejected> {
        if ticket.generation != self.generation || self.scheduled != Some(ticket) {
            return Err(Rejected::Stale);
        }
        self.scheduled = None;
        let next = self.state.play_automated(self.mover.rng())?;
        self.replace(next);
        Ok(())
    }
}
