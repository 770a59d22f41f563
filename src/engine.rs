//! The automated opponent.
//!
//! It has no evaluation at all: every legal move is equally likely. Pawns that reach the far
//! rank always become queens.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::movegen::legal_moves;
use crate::types::{Color, Move, PieceType};

/// Pick one of `color`'s legal moves uniformly at random, or `None` when there are none.
pub fn choose_move<R: Rng + ?Sized>(board: &Board, color: Color, rng: &mut R) -> Option<Move> {
    let moves = legal_moves(board, color);
    let picked = *moves.choose(rng)?;
    if picked.needs_promotion() {
        Some(picked.with_promotion(PieceType::Queen))
    } else {
        Some(picked)
    }
}

/// `choose_move` bundled with its own random number generator
pub struct RandomMover {
    rng: StdRng,
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new(None)
    }
}

impl RandomMover {
    /// A fixed seed gives a reproducible sequence of choices
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn choose_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        choose_move(board, color, &mut self.rng)
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::is_legal;
    use crate::types::{Piece, Square};
    use std::collections::HashSet;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn picks_a_legal_move() {
        let board = Board::new();
        let mut mover = RandomMover::new(Some(7));
        for _ in 0..50 {
            let mv = mover.choose_move(&board, Color::White).unwrap();
            assert_eq!(mv.piece.color, Color::White);
            assert!(is_legal(&board, mv.from, mv.to));
        }
    }

    #[test]
    fn covers_every_legal_move() {
        // with enough draws all 20 opening moves show up
        let board = Board::new();
        let mut mover = RandomMover::new(Some(42));
        let seen: HashSet<(Square, Square)> = (0..2000)
            .filter_map(|_| mover.choose_move(&board, Color::White))
            .map(|mv| (mv.from, mv.to))
            .collect();
        assert_eq!(seen.len(), 20);
    }

    #[test]
    fn same_seed_same_choices() {
        let board = Board::new();
        let mut a = RandomMover::new(Some(3));
        let mut b = RandomMover::new(Some(3));
        for _ in 0..10 {
            assert_eq!(
                a.choose_move(&board, Color::Black),
                b.choose_move(&board, Color::Black)
            );
        }
    }

    #[test]
    fn no_move_when_stalemated() {
        let board = Board::from_fen("7K/8/8/8/8/8/2Q5/k7").unwrap();
        let mut mover = RandomMover::new(Some(1));
        assert_eq!(mover.choose_move(&board, Color::Black), None);
    }

    #[test]
    fn auto_promotes_to_queen() {
        // the pawn push is the only move besides the king's
        // . . . . . . . ♔
        // ♙ . . . . . . ♟︎
        // . . . . . . . ♚
        // . . . . . . . .
        let board = Board::from_fen("7K/P6p/7k/8/8/8/8/8").unwrap();
        let mut mover = RandomMover::new(Some(11));
        let mut promoted = 0;
        for _ in 0..100 {
            let mv = mover.choose_move(&board, Color::White).unwrap();
            if mv.from == sq("a7") {
                assert_eq!(mv.to, sq("a8"));
                assert_eq!(mv.promotion, Some(PieceType::Queen));
                assert_eq!(
                    board.execute_move(&mv).piece_at(sq("a8")),
                    Some(Piece::new(Color::White, PieceType::Queen))
                );
                promoted += 1;
            } else {
                assert_eq!(mv.promotion, None);
            }
        }
        assert!(promoted > 0);
    }
}
