//! Move rules for the 8x8 board.
//!
//! Everything here is a pure function of a `Board`: a move is *pseudo-legal* when it fits
//! the moving piece's pattern and the occupancy of the squares it crosses, and *legal* when
//! it is pseudo-legal and does not leave the mover's own king attacked. Check, checkmate and
//! stalemate are all derived from those two predicates.

use itertools::iproduct;

use crate::board::Board;
use crate::types::*;

/// Does the piece on `from` move like that? Ignores whose turn it is and whether the move
/// exposes the mover's king.
pub fn is_pseudo_legal(board: &Board, from: Square, to: Square) -> bool {
    // kings are never captured: games end through checkmate instead
    if board
        .piece_at(to)
        .is_some_and(|p| p.piece_type == PieceType::King)
    {
        return false;
    }
    fits_pattern(board, from, to)
}

/// Movement pattern, path and self-capture rules, without the ban on landing on a king.
/// This is what "attacks" means: the king square is attacked if the move would fit.
fn fits_pattern(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    let target = board.piece_at(to);

    // no self capture (this also rejects from == to)
    if target.is_some_and(|p| p.color == piece.color) {
        return false;
    }

    let rank_diff = (to.rank as i8 - from.rank as i8).abs();
    let file_diff = (to.file as i8 - from.file as i8).abs();

    let shape_fits = match piece.piece_type {
        PieceType::Pawn => {
            return pawn_fits_pattern(board, piece.color, from, to, target.is_some())
        }
        PieceType::Knight => {
            (rank_diff == 2 && file_diff == 1) || (rank_diff == 1 && file_diff == 2)
        }
        PieceType::Bishop => rank_diff == file_diff,
        PieceType::Rook => from.rank == to.rank || from.file == to.file,
        PieceType::Queen => from.rank == to.rank || from.file == to.file || rank_diff == file_diff,
        PieceType::King => rank_diff <= 1 && file_diff <= 1,
    };
    shape_fits && (!piece.piece_type.is_sliding() || is_path_clear(board, from, to))
}

fn pawn_fits_pattern(
    board: &Board,
    color: Color,
    from: Square,
    to: Square,
    is_capture: bool,
) -> bool {
    let direction = color.pawn_direction();
    let rank_step = to.rank as i8 - from.rank as i8;
    let file_diff = (to.file as i8 - from.file as i8).abs();

    // pushes: straight ahead onto an empty square
    if file_diff == 0 && !is_capture {
        if rank_step == direction {
            return true;
        }
        if from.rank == color.pawn_starting_rank() && rank_step == 2 * direction {
            return from
                .offset(direction, 0)
                .is_some_and(|between| board.piece_at(between).is_none());
        }
        return false;
    }

    // captures: one step diagonally, only onto an enemy piece
    file_diff == 1 && rank_step == direction && is_capture
}

/// True if every square strictly between `from` and `to` is empty. Only meaningful for
/// squares on a shared rank, file or diagonal.
fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let rank_dir = (to.rank as i8 - from.rank as i8).signum();
    let file_dir = (to.file as i8 - from.file as i8).signum();

    let mut current = from.offset(rank_dir, file_dir);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if board.piece_at(sq).is_some() {
            return false;
        }
        current = sq.offset(rank_dir, file_dir);
    }
    // walked off the board, `to` was not on the ray
    false
}

/// Could any piece of `by_color` move to `target`? Same rules as ordinary moves, so a
/// pawn only reaches an occupied square diagonally. The one rule relaxed is the ban on
/// landing on a king: without it no king could ever be attacked.
pub fn is_attacked(board: &Board, target: Square, by_color: Color) -> bool {
    board
        .pieces(by_color)
        .any(|(from, _)| fits_pattern(board, from, target))
}

/// A missing king is never in check.
pub fn in_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king) => is_attacked(board, king, color.other_color()),
        None => false,
    }
}

/// Pseudo-legal, and the mover's king is not attacked once the move is played.
pub fn is_legal(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    is_pseudo_legal(board, from, to) && !in_check(&board.simulate(from, to), piece.color)
}

/// Lazily enumerate every legal move for `color`, origin-major in square order.
/// Pawn moves onto the promotion rank are yielded without a promotion type.
pub fn legal_move_iter(board: &Board, color: Color) -> impl Iterator<Item = Move> + '_ {
    iproduct!(board.pieces(color), ALL_SQUARES.iter())
        .filter(move |((from, _), to)| is_legal(board, *from, **to))
        .map(move |((from, piece), to)| Move::new(piece, from, *to, board.piece_at(*to)))
}

pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    legal_move_iter(board, color).collect()
}

/// Exhaustive search shared by checkmate and stalemate detection: stops at the first
/// move that leaves `color` out of check.
pub fn has_any_legal_move(board: &Board, color: Color) -> bool {
    legal_move_iter(board, color).next().is_some()
}

pub fn is_checkmate(board: &Board, color: Color) -> bool {
    in_check(board, color) && !has_any_legal_move(board, color)
}

pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !in_check(board, color) && !has_any_legal_move(board, color)
}

/// Which kings are attacked. Always recomputed from the board, never updated in place.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CheckStatus {
    pub white_in_check: bool,
    pub black_in_check: bool,
}

impl CheckStatus {
    pub fn compute(board: &Board) -> Self {
        Self {
            white_in_check: in_check(board, Color::White),
            black_in_check: in_check(board, Color::Black),
        }
    }

    pub fn for_color(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_in_check,
            Color::Black => self.black_in_check,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionStatus {
    pub in_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
}

/// Check, checkmate and stalemate for `color` in one pass over its moves.
pub fn compute_status(board: &Board, color: Color) -> PositionStatus {
    let checked = in_check(board, color);
    let can_move = has_any_legal_move(board, color);
    PositionStatus {
        in_check: checked,
        is_checkmate: checked && !can_move,
        is_stalemate: !checked && !can_move,
    }
}
