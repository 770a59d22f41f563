use thiserror::Error;

use crate::types::*;

/// Piece placement of the standard starting position. White sits on ranks 0 and 1,
/// Black on ranks 6 and 7.
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("piece placement must have 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} covers {width} files instead of 8")]
    RankWidth { rank: usize, width: usize },
    #[error("unexpected char `{0}` in piece placement")]
    UnexpectedChar(char),
}

/// The 8x8 grid. Boards are plain values: every transformation returns a fresh copy,
/// so a simulated position can never alias the position it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard starting position
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (file, piece_type) in BACK_RANK.iter().enumerate() {
            board.squares[0][file] = Some(Piece::new(Color::White, *piece_type));
            board.squares[1][file] = Some(Piece::new(Color::White, PieceType::Pawn));
            board.squares[6][file] = Some(Piece::new(Color::Black, PieceType::Pawn));
            board.squares[7][file] = Some(Piece::new(Color::Black, *piece_type));
        }
        board
    }

    /// Build a board from the piece placement field of a FEN string. Any further
    /// fields (side to move, castling, ...) are ignored since the rules here have no use for them.
    pub fn from_fen(fen_string: &str) -> Result<Board, FenError> {
        let placement = fen_string.split_whitespace().next().unwrap_or("");
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut board = Self::empty();
        // first rank listed is rank 8, i.e. index 7
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i;
            let mut file = 0usize;
            for piece_char in rank_str.chars() {
                if let Some(skip) = piece_char.to_digit(10) {
                    file += skip as usize;
                } else {
                    let piece =
                        Piece::from_char(piece_char).ok_or(FenError::UnexpectedChar(piece_char))?;
                    if file < 8 {
                        board.squares[rank][file] = Some(piece);
                    }
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth {
                    rank: rank + 1,
                    width: file,
                });
            }
        }
        Ok(board)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.squares[rank][file] {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }
        fen
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.rank as usize][square.file as usize]
    }

    /// Copy of the board with `square` set to `piece`
    pub fn with_piece(&self, square: Square, piece: Option<Piece>) -> Board {
        let mut board = *self;
        board.squares[square.rank as usize][square.file as usize] = piece;
        board
    }

    /// All pieces of `color`, with their squares
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        ALL_SQUARES.iter().filter_map(move |&sq| match self.piece_at(sq) {
            Some(p) if p.color == color => Some((sq, p)),
            _ => None,
        })
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, p)| p.piece_type == PieceType::King)
            .map(|(sq, _)| sq)
    }

    /// Hypothetical position after lifting the piece on `from` and dropping it on `to`.
    /// No promotion is applied: a promoted piece stands on the same square and cannot
    /// change whether its own king is attacked.
    pub fn simulate(&self, from: Square, to: Square) -> Board {
        let piece = self.piece_at(from);
        self.with_piece(from, None).with_piece(to, piece)
    }

    /// New board with the move applied: origin cleared, destination holding the moved
    /// (or promoted) piece. `self` is left untouched.
    pub fn execute_move(&self, selected_move: &Move) -> Board {
        self.with_piece(selected_move.from, None)
            .with_piece(selected_move.to, Some(selected_move.landing_piece()))
    }

    /// Inverse of `execute_move`: rebuilds the position the move was played from.
    pub fn undo_move(&self, selected_move: &Move) -> Board {
        self.with_piece(selected_move.to, selected_move.captured)
            .with_piece(selected_move.from, Some(selected_move.piece))
    }

    pub fn draw_board(&self) -> String {
        let mut string = String::new();

        for r in (0..8).rev() {
            string.push((b'1' + r as u8) as char);
            for f in 0..8 {
                let p = self.squares[r][f];
                string = format!(
                    "{} {}",
                    string,
                    match p {
                        Some(pp) => pp.to_symbol(),
                        None => ".",
                    }
                );
            }
            string.push('\n');
        }
        string.push_str("  a b c d e f g h\n");
        string
    }

    pub fn draw_to_terminal(&self) {
        println!("{}", self.draw_board());
    }
}
