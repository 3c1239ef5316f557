//! The `Move` record and the fixed-capacity buffers move generation fills.

use arrayvec::ArrayVec;
use std::fmt;

use crate::square::{square_of, Color, Piece, PieceType, Square};

/// Maximum pseudo-legal moves ever generated from a single position; well
/// above the true worst case, kept as a round stack-allocation budget.
pub const MAX_MOVES: usize = 256;

pub type MoveList = ArrayVec<Move, MAX_MOVES>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub promotion: Option<PieceType>,
    /// Square the captured pawn stood on, or 0 (`NO_SQUARE`) if not en passant.
    pub en_passant_victim: Square,
    /// Scratch ordering score, written by `ordering` and read back by sort.
    pub score: i32,
}

impl Move {
    pub fn quiet(piece: Piece, from: Square, to: Square) -> Self {
        Move {
            piece,
            from,
            to,
            captured: None,
            promotion: None,
            en_passant_victim: 0,
            score: 0,
        }
    }

    pub fn capture(piece: Piece, from: Square, to: Square, captured: Piece) -> Self {
        Move {
            piece,
            from,
            to,
            captured: Some(captured),
            promotion: None,
            en_passant_victim: 0,
            score: 0,
        }
    }

    pub fn en_passant(piece: Piece, from: Square, to: Square, captured: Piece, victim: Square) -> Self {
        Move {
            piece,
            from,
            to,
            captured: Some(captured),
            promotion: None,
            en_passant_victim: victim,
            score: 0,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_en_passant(&self) -> bool {
        self.en_passant_victim != 0
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    pub fn is_tactical(&self) -> bool {
        self.is_capture() || self.is_promotion()
    }

    fn king_home(color: Color) -> Square {
        match color {
            Color::White => square_of(5, 1),
            Color::Black => square_of(5, 8),
        }
    }

    pub fn is_kingside_castle(&self) -> bool {
        self.piece.kind == PieceType::King
            && self.from == Self::king_home(self.piece.color)
            && self.to as i32 - self.from as i32 == 2
    }

    pub fn is_queenside_castle(&self) -> bool {
        self.piece.kind == PieceType::King
            && self.from == Self::king_home(self.piece.color)
            && self.from as i32 - self.to as i32 == 2
    }

    pub fn is_castling(&self) -> bool {
        self.is_kingside_castle() || self.is_queenside_castle()
    }

    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.kind == PieceType::Pawn && (self.from as i32 - self.to as i32).abs() == 24
    }

    pub fn to_uci(&self) -> String {
        let mut s = String::with_capacity(5);
        s.push_str(&square_to_algebraic(self.from));
        s.push_str(&square_to_algebraic(self.to));
        if let Some(promo) = self.promotion {
            s.push(match promo {
                PieceType::Queen => 'q',
                PieceType::Rook => 'r',
                PieceType::Bishop => 'b',
                PieceType::Knight => 'n',
                _ => unreachable!("only Q/R/B/N are legal promotion targets"),
            });
        }
        s
    }
}

pub fn square_to_algebraic(sq: Square) -> String {
    let file = crate::square::file_of(sq);
    let rank = crate::square::rank_of(sq);
    format!("{}{}", (b'a' + file) as char, rank)
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
