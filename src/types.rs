use itertools::iproduct;
use once_cell::sync::Lazy;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    pub fn from_case(c: char) -> Option<Color> {
        if c.is_uppercase() {
            Some(Color::White)
        } else if c.is_lowercase() {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn other_color(&self) -> Color {
        if *self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Rank delta of a single pawn step
    pub fn pawn_direction(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank the pawns of this color start on, and may double-step from
    pub fn pawn_starting_rank(&self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Farthest rank from the pawns' start, where they must promote
    pub fn promotion_rank(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub fn to_human(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceType {
    pub fn from_char(c: char) -> Option<PieceType> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'r' => Some(PieceType::Rook),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }

    /// Is the piece a sliding piece (one which can move multiple square in a given direction)
    pub fn is_sliding(&self) -> bool {
        matches!(
            self,
            PieceType::Rook | PieceType::Bishop | PieceType::Queen
        )
    }

    pub fn to_human(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Rook => "rook",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Rook => 'R',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }
}

/// Promotion choices offered to the human side, strongest first.
pub const PIECES_CAN_PROMOTE_TO: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

/// A square on the board. Both coordinates are 0-based: rank 0 is White's back rank,
/// rank 7 is Black's.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Square {
    pub rank: u8, // row
    pub file: u8, // col
}

/// All 64 squares, rank-major starting from a1.
pub static ALL_SQUARES: Lazy<Vec<Square>> =
    Lazy::new(|| iproduct!(0..8u8, 0..8u8).map(|(rank, file)| Square { rank, file }).collect());

impl Square {
    pub const fn new(rank: u8, file: u8) -> Self {
        Self { rank, file }
    }

    /// The square `d_rank`, `d_file` away, if it is still on the board
    pub fn offset(&self, d_rank: i8, d_file: i8) -> Option<Square> {
        let rank = self.rank as i8 + d_rank;
        let file = self.file as i8 + d_file;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Square::new(rank as u8, file as u8))
        } else {
            None
        }
    }

    pub fn from_algebraic(s: &str) -> Option<Square> {
        let mut char_iter = s.chars();
        let file_char = char_iter.next()?;
        let rank_char = char_iter.next()?;
        if char_iter.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&file_char) || !('1'..='8').contains(&rank_char) {
            return None;
        }

        let file = file_char as u8 - b'a';
        let rank = rank_char as u8 - b'1';

        Some(Square { rank, file })
    }

    pub fn to_algebraic(&self) -> String {
        format!(
            "{}{}",
            (self.file + b'a') as char,
            (self.rank + b'1') as char
        )
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Piece {
    pub color: Color,
    pub piece_type: PieceType,
}

impl Piece {
    pub const fn new(color: Color, piece_type: PieceType) -> Self {
        Self { color, piece_type }
    }

    /// Upper case is white, lower case is black
    pub fn from_char(c: char) -> Option<Piece> {
        Some(Piece {
            color: Color::from_case(c)?,
            piece_type: PieceType::from_char(c)?,
        })
    }

    pub fn to_char(&self) -> char {
        match self.color {
            Color::White => self.piece_type.to_char(),
            Color::Black => self.piece_type.to_char().to_ascii_lowercase(),
        }
    }

    pub fn to_symbol(&self) -> &'static str {
        let is_white = self.color == Color::White;
        match self.piece_type {
            PieceType::Pawn => {
                if is_white {
                    "♙"
                } else {
                    "♟︎"
                }
            }
            PieceType::Rook => {
                if is_white {
                    "♖"
                } else {
                    "♜"
                }
            }
            PieceType::Knight => {
                if is_white {
                    "♘"
                } else {
                    "♞"
                }
            }
            PieceType::Bishop => {
                if is_white {
                    "♗"
                } else {
                    "♝"
                }
            }
            PieceType::Queen => {
                if is_white {
                    "♕"
                } else {
                    "♛"
                }
            }
            PieceType::King => {
                if is_white {
                    "♔"
                } else {
                    "♚"
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// The piece that moved, as it stood on `from`
    pub piece: Piece,
    pub captured: Option<Piece>,
    /// Replacement type when a pawn reaches its promotion rank
    pub promotion: Option<PieceType>,
}

impl Move {
    pub fn new(piece: Piece, from: Square, to: Square, captured: Option<Piece>) -> Self {
        Self {
            from,
            to,
            piece,
            captured,
            promotion: None,
        }
    }

    pub fn with_promotion(self, promotion: PieceType) -> Self {
        Self {
            promotion: Some(promotion),
            ..self
        }
    }

    /// A pawn landing on the far rank has to be replaced before the move completes.
    pub fn needs_promotion(&self) -> bool {
        self.piece.piece_type == PieceType::Pawn && self.to.rank == self.piece.color.promotion_rank()
    }

    /// The piece standing on `to` once the move is applied
    pub fn landing_piece(&self) -> Piece {
        match self.promotion {
            Some(piece_type) => Piece::new(self.piece.color, piece_type),
            None => self.piece,
        }
    }

    pub fn to_human(&self) -> String {
        let maybe_capture_str = match self.captured {
            Some(p) => format!(
                " capturing {} {} at {}",
                p.color.to_human(),
                p.piece_type.to_human(),
                self.to.to_algebraic()
            ),
            None => "".to_string(),
        };
        let maybe_promotion_str = match self.promotion {
            Some(promoted_to_type) => format!(" promoting to {}", promoted_to_type.to_human()),
            None => "".to_string(),
        };
        format!(
            "{} moves {} from {} to {}{}{}",
            self.piece.color.to_human(),
            self.piece.piece_type.to_human(),
            self.from.to_algebraic(),
            self.to.to_algebraic(),
            maybe_capture_str,
            maybe_promotion_str,
        )
    }
}

/// An entry in the move history. Never mutated once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub mv: Move,
    /// Side that made the move
    pub color: Color,
    /// 1-based half-move number
    pub ply: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_char() {
        assert_eq!(Color::from_char('w'), Some(Color::White));
        assert_eq!(Color::from_char('b'), Some(Color::Black));
        assert_eq!(Color::from_char('g'), None);
    }

    #[test]
    fn test_color_from_case() {
        assert_eq!(Color::from_case('K'), Some(Color::White));
        assert_eq!(Color::from_case('k'), Some(Color::Black));
        assert_eq!(Color::from_case('1'), None);
    }

    #[test]
    fn test_other_color() {
        assert_eq!(Color::White, Color::Black.other_color());
        assert_eq!(Color::Black, Color::White.other_color());
    }

    #[test]
    fn test_piece_type_from_char() {
        assert_eq!(PieceType::from_char('p'), Some(PieceType::Pawn));
        assert_eq!(PieceType::from_char('R'), Some(PieceType::Rook));
        assert_eq!(PieceType::from_char('n'), Some(PieceType::Knight));
        assert_eq!(PieceType::from_char('B'), Some(PieceType::Bishop));
        assert_eq!(PieceType::from_char('q'), Some(PieceType::Queen));
        assert_eq!(PieceType::from_char('K'), Some(PieceType::King));
        assert_eq!(PieceType::from_char('x'), None);
    }

    #[test]
    fn test_is_sliding() {
        assert!(PieceType::Rook.is_sliding());
        assert!(PieceType::Bishop.is_sliding());
        assert!(PieceType::Queen.is_sliding());
        assert!(!PieceType::Pawn.is_sliding());
        assert!(!PieceType::Knight.is_sliding());
        assert!(!PieceType::King.is_sliding());
    }

    #[test]
    fn test_square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::new(0, 0)));
        assert_eq!(Square::from_algebraic("d8"), Some(Square::new(7, 3)));
        assert_eq!(Square::from_algebraic("h5"), Some(Square::new(4, 7)));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("a10"), None);
        assert_eq!(Square::from_algebraic(""), None);
        assert_eq!(Square::new(6, 4).to_algebraic(), "e7");
    }

    #[test]
    fn test_square_offset() {
        let sq = Square::new(0, 7);
        assert_eq!(sq.offset(1, -1), Some(Square::new(1, 6)));
        assert_eq!(sq.offset(-1, 0), None);
        assert_eq!(sq.offset(0, 1), None);
    }

    #[test]
    fn test_all_squares() {
        assert_eq!(ALL_SQUARES.len(), 64);
        assert_eq!(ALL_SQUARES[0], Square::new(0, 0));
        assert_eq!(ALL_SQUARES[63], Square::new(7, 7));
    }

    #[test]
    fn test_piece_from_char() {
        assert_eq!(
            Piece::from_char('N'),
            Some(Piece::new(Color::White, PieceType::Knight))
        );
        assert_eq!(
            Piece::from_char('q'),
            Some(Piece::new(Color::Black, PieceType::Queen))
        );
        assert_eq!(Piece::from_char('q').map(|p| p.to_char()), Some('q'));
    }

    #[test]
    fn test_symbol_outlives_piece() {
        let symbol = {
            let piece = Piece::new(Color::Black, PieceType::Knight);
            piece.to_symbol()
        };
        assert_eq!(symbol, "♞");
    }

    #[test]
    fn test_move_needs_promotion() {
        let black_pawn = Piece::new(Color::Black, PieceType::Pawn);
        let mv = Move::new(black_pawn, Square::new(1, 0), Square::new(0, 0), None);
        assert!(mv.needs_promotion());
        assert_eq!(mv.landing_piece(), black_pawn);
        let promoted = mv.with_promotion(PieceType::Knight);
        assert_eq!(
            promoted.landing_piece(),
            Piece::new(Color::Black, PieceType::Knight)
        );

        let white_pawn = Piece::new(Color::White, PieceType::Pawn);
        let mv = Move::new(white_pawn, Square::new(1, 0), Square::new(0, 0), None);
        assert!(!mv.needs_promotion());
    }

    #[test]
    fn test_move_to_human() {
        let mv = Move::new(
            Piece::new(Color::White, PieceType::Rook),
            Square::new(0, 0),
            Square::new(7, 0),
            Some(Piece::new(Color::Black, PieceType::Rook)),
        );
        assert_eq!(
            mv.to_human(),
            "white moves rook from a1 to a8 capturing black rook at a8"
        );
    }
}
