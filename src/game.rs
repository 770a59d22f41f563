//! Game state and the transitions between states.
//!
//! A `GameState` is a plain value. Every transition (`click`, `attempt_move`,
//! `resolve_promotion`, `play_automated`, ...) borrows the current state and returns the next
//! one, so a rejected input simply means the caller keeps the state it already had.
//!
//! Black is the human side and moves first; White is played by the random mover.

use chrono::prelude::*;
use rand::Rng;
use thiserror::Error;

use crate::board::Board;
use crate::engine::choose_move;
use crate::marked::{MarkedPiece, MarkedRegistry};
use crate::movegen::{compute_status, is_legal, CheckStatus, PositionStatus};
use crate::types::*;

pub const HUMAN_SIDE: Color = Color::Black;
pub const AUTOMATED_SIDE: Color = Color::White;

/// Why an input did not change the game. None of these are faults: an interactive front end
/// can ignore them and keep showing the state it already has.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    #[error("the game is over")]
    GameOver,
    #[error("a promotion choice is pending")]
    PromotionPending,
    #[error("no promotion is pending")]
    NoPromotionPending,
    #[error("there is no piece on {}", .0.to_algebraic())]
    NoPiece(Square),
    #[error("it is {0}'s turn")]
    WrongColor(&'static str),
    #[error("it is not the automated side's turn")]
    NotYourTurn,
    #[error("illegal move")]
    IllegalMove,
    #[error("cannot promote to {0}")]
    InvalidPromotion(&'static str),
    #[error("no legal moves")]
    NoLegalMoves,
    #[error("the scheduled turn belongs to an earlier game state")]
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    MarkedPieceCaptured { identity: MarkedPiece, winner: Color },
}

impl Outcome {
    pub fn winner(&self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(*winner),
            Outcome::MarkedPieceCaptured { winner, .. } => Some(*winner),
            Outcome::Stalemate => None,
        }
    }

    /// Who the game-over screen is about
    pub fn character(&self) -> &'static str {
        match self {
            Outcome::Checkmate {
                winner: Color::Black,
            } => "You",
            Outcome::Checkmate {
                winner: Color::White,
            } => "Voldemort",
            Outcome::Stalemate => "Draw",
            Outcome::MarkedPieceCaptured { identity, .. } => identity.name(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Outcome::Checkmate {
                winner: Color::Black,
            } => "Checkmate! You win!".to_string(),
            Outcome::Checkmate {
                winner: Color::White,
            } => "Checkmate! Voldemort wins!".to_string(),
            Outcome::Stalemate => "Stalemate! The game is a draw.".to_string(),
            Outcome::MarkedPieceCaptured { identity, winner } => format!(
                "{} has been captured! {} wins!",
                identity.name(),
                match winner {
                    Color::White => "Voldemort",
                    Color::Black => "You",
                }
            ),
        }
    }
}

/// A pawn move onto its promotion rank that is waiting for the replacement piece.
/// The board does not reflect it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
}

/// Append `entry` to `history`, leaving the original untouched.
pub fn record_move(history: &[AppliedMove], entry: AppliedMove) -> Vec<AppliedMove> {
    let mut next = Vec::with_capacity(history.len() + 1);
    next.extend_from_slice(history);
    next.push(entry);
    next
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    turn: Color,
    selected: Option<Square>,
    pending_promotion: Option<PendingPromotion>,
    marked: MarkedRegistry,
    history: Vec<AppliedMove>,
    check: CheckStatus,
    outcome: Option<Outcome>,
    started_at: DateTime<Local>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard position, Black (the human) to move, marked pieces on their home squares
    pub fn new_game() -> Self {
        Self::from_board(Board::new(), HUMAN_SIDE)
    }

    /// Start from an arbitrary position. A marked piece is followed only if a black piece
    /// stands on its home square.
    pub fn from_board(board: Board, turn: Color) -> Self {
        Self {
            board,
            turn,
            selected: None,
            pending_promotion: None,
            marked: MarkedRegistry::for_board(&board),
            history: Vec::new(),
            check: CheckStatus::compute(&board),
            outcome: None,
            started_at: Local::now(),
        }
    }

    /// A fresh game, discarding everything about this one
    pub fn reset(&self) -> Self {
        Self::new_game()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending_promotion
    }

    pub fn marked(&self) -> &MarkedRegistry {
        &self.marked
    }

    pub fn history(&self) -> &[AppliedMove] {
        &self.history
    }

    pub fn check(&self) -> CheckStatus {
        self.check
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn status(&self, color: Color) -> PositionStatus {
        compute_status(&self.board, color)
    }

    /// Is a move from `from` to `to` open to the side to move right now?
    pub fn is_legal_move(&self, from: Square, to: Square) -> bool {
        self.accepting_moves().is_ok()
            && self.board.piece_at(from).is_some_and(|p| p.color == self.turn)
            && is_legal(&self.board, from, to)
    }

    fn accepting_moves(&self) -> Result<(), Rejected> {
        if self.outcome.is_some() {
            return Err(Rejected::GameOver);
        }
        if self.pending_promotion.is_some() {
            return Err(Rejected::PromotionPending);
        }
        Ok(())
    }

    /// A square was clicked on the human's behalf. Selects, deselects or moves; anything
    /// that makes no sense right now leaves the state as it was.
    pub fn click(&self, square: Square) -> GameState {
        if self.turn != HUMAN_SIDE || self.accepting_moves().is_err() {
            return self.clone();
        }
        let clicked = self.board.piece_at(square);
        let own_piece = clicked.is_some_and(|p| p.color == HUMAN_SIDE);

        match self.selected {
            None if own_piece => GameState {
                selected: Some(square),
                ..self.clone()
            },
            None => self.clone(),
            Some(selected) if selected == square => GameState {
                selected: None,
                ..self.clone()
            },
            Some(_) if own_piece => GameState {
                selected: Some(square),
                ..self.clone()
            },
            Some(selected) => self
                .attempt_move(selected, square)
                .unwrap_or_else(|_| self.clone()),
        }
    }

    /// Move the piece on `from` to `to` for the side to move. A pawn reaching its last
    /// rank does not move yet: the returned state holds a pending promotion instead.
    pub fn attempt_move(&self, from: Square, to: Square) -> Result<GameState, Rejected> {
        self.accepting_moves()?;
        let piece = self
            .board
            .piece_at(from)
            .ok_or_else(|| Rejected::NoPiece(from))?;
        if piece.color != self.turn {
            return Err(Rejected::WrongColor(self.turn.to_human()));
        }
        if !is_legal(&self.board, from, to) {
            return Err(Rejected::IllegalMove);
        }

        let mv = Move::new(piece, from, to, self.board.piece_at(to));
        if mv.needs_promotion() {
            return Ok(GameState {
                selected: Some(from),
                pending_promotion: Some(PendingPromotion {
                    from,
                    to,
                    captured: mv.captured,
                }),
                ..self.clone()
            });
        }
        Ok(self.complete_move(mv))
    }

    /// Finish the pending promotion with `choice`.
    pub fn resolve_promotion(&self, choice: PieceType) -> Result<GameState, Rejected> {
        if self.outcome.is_some() {
            return Err(Rejected::GameOver);
        }
        let pending = self.pending_promotion.ok_or(Rejected::NoPromotionPending)?;
        if !PIECES_CAN_PROMOTE_TO.contains(&choice) {
            return Err(Rejected::InvalidPromotion(choice.to_human()));
        }
        let piece = self
            .board
            .piece_at(pending.from)
            .ok_or_else(|| Rejected::NoPiece(pending.from))?;
        let mv = Move::new(piece, pending.from, pending.to, pending.captured).with_promotion(choice);
        Ok(self.complete_move(mv))
    }

    /// Abandon the pending promotion. The board never saw the move, so nothing to undo.
    pub fn cancel_promotion(&self) -> GameState {
        GameState {
            selected: None,
            pending_promotion: None,
            ..self.clone()
        }
    }

    /// Let the random mover play for the automated side.
    pub fn play_automated<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GameState, Rejected> {
        self.accepting_moves()?;
        if self.turn != AUTOMATED_SIDE {
            return Err(Rejected::NotYourTurn);
        }
        let mv = choose_move(&self.board, self.turn, rng).ok_or(Rejected::NoLegalMoves)?;
        Ok(self.complete_move(mv))
    }

    /// Apply an already validated move and work out what it did to the game.
    fn complete_move(&self, mv: Move) -> GameState {
        let mover = mv.piece.color;
        // must be looked up before the registry follows the move
        let captured_marked = self.marked.captured_by(&mv);

        let board = self.board.execute_move(&mv);
        let history = record_move(
            &self.history,
            AppliedMove {
                mv,
                color: mover,
                ply: self.history.len() + 1,
            },
        );
        let mut next = GameState {
            board,
            turn: mover.other_color(),
            selected: None,
            pending_promotion: None,
            marked: self.marked,
            history,
            check: CheckStatus::compute(&board),
            outcome: None,
            started_at: self.started_at,
        };

        // losing a marked piece trumps whatever the position would say
        if let Some(identity) = captured_marked {
            next.outcome = Some(Outcome::MarkedPieceCaptured {
                identity,
                winner: mover,
            });
            return next;
        }

        next.marked = self.marked.follow(&mv);
        let status = compute_status(&board, next.turn);
        if status.is_checkmate {
            next.outcome = Some(Outcome::Checkmate { winner: mover });
        } else if status.is_stalemate {
            next.outcome = Some(Outcome::Stalemate);
        }
        next
    }
}
