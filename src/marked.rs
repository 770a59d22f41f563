//! The three black pieces the story is about. Losing any of them ends the game on the spot,
//! whatever the position on the board says.
//!
//! Pieces carry no identity of their own, so each marked piece is followed by the square it
//! currently stands on.

use crate::board::Board;
use crate::types::{Color, Move, Square};

/// Side the marked pieces belong to
pub const MARKED_COLOR: Color = Color::Black;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkedPiece {
    Ron,
    Harry,
    Hermione,
}

impl MarkedPiece {
    pub const ALL: [MarkedPiece; 3] = [MarkedPiece::Ron, MarkedPiece::Harry, MarkedPiece::Hermione];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ron => "Ron",
            Self::Harry => "Harry",
            Self::Hermione => "Hermione",
        }
    }

    /// Where the piece stands at the start: the queenside knight, bishop and the queen
    pub fn home_square(&self) -> Square {
        match self {
            Self::Ron => Square::new(7, 1),
            Self::Harry => Square::new(7, 2),
            Self::Hermione => Square::new(7, 3),
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Where each marked piece stands, or `None` once it is no longer followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkedRegistry {
    squares: [Option<Square>; 3],
}

impl Default for MarkedRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkedRegistry {
    /// All three on their home squares, as in the standard starting position
    pub fn new() -> Self {
        Self {
            squares: MarkedPiece::ALL.map(|m| Some(m.home_square())),
        }
    }

    /// Follow only the marked pieces whose home square holds a black piece on `board`.
    pub fn for_board(board: &Board) -> Self {
        Self {
            squares: MarkedPiece::ALL.map(|m| {
                let home = m.home_square();
                board
                    .piece_at(home)
                    .filter(|p| p.color == MARKED_COLOR)
                    .map(|_| home)
            }),
        }
    }

    pub fn square_of(&self, marked: MarkedPiece) -> Option<Square> {
        self.squares[marked.index()]
    }

    pub fn identity_at(&self, square: Square) -> Option<MarkedPiece> {
        MarkedPiece::ALL
            .into_iter()
            .find(|m| self.square_of(*m) == Some(square))
    }

    /// Narrative label for the piece on `square`, if it is one of the marked three
    pub fn label_at(&self, square: Square) -> Option<&'static str> {
        self.identity_at(square).map(|m| m.name())
    }

    /// Marked piece that `mv` would take, if any. Only the capture of a black piece counts.
    pub fn captured_by(&self, mv: &Move) -> Option<MarkedPiece> {
        mv.captured
            .filter(|p| p.color == MARKED_COLOR)
            .and(self.identity_at(mv.to))
    }

    /// Registry after `mv`: whoever stood on the origin now stands on the destination, and
    /// whoever stood on the destination is gone.
    pub fn follow(&self, mv: &Move) -> Self {
        let mut next = *self;
        for sq in next.squares.iter_mut() {
            if *sq == Some(mv.to) {
                *sq = None;
            }
        }
        for sq in next.squares.iter_mut() {
            if *sq == Some(mv.from) {
                *sq = Some(mv.to);
            }
        }
        debug_assert!(next.is_consistent(), "two marked pieces share a square");
        next
    }

    /// No two marked pieces on one square
    pub fn is_consistent(&self) -> bool {
        let placed: Vec<Square> = self.squares.iter().flatten().copied().collect();
        placed
            .iter()
            .enumerate()
            .all(|(i, a)| placed[i + 1..].iter().all(|b| a != b))
    }
}
