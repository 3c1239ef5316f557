//! Static position evaluation: material plus positional terms per piece,
//! phase-interpolated between an opening and an endgame score.

use crate::board::Board;
use crate::square::{
    file_of, material_value, phase_weight, rank_of, square_of, Cell, Color, Piece, PieceType,
    PHASE_TOTAL,
};

/// Opening/endgame score pair for one side.
#[derive(Default, Clone, Copy)]
struct ScorePair {
    opening: i32,
    endgame: i32,
}

impl ScorePair {
    fn add(&mut self, opening: i32, endgame: i32) {
        self.opening += opening;
        self.endgame += endgame;
    }
}

fn centralization_bonus(sq: crate::square::Square) -> i32 {
    let file = file_of(sq) as i32; // 0..=7
    let rank = rank_of(sq) as i32; // 1..=8
    let df = (2 * file - 7).abs(); // 1 at center files, larger at edges
    let dr = (2 * rank - 9).abs();
    // Center files/ranks score ~1, edges score ~7; invert into a small bonus.
    (8 - df.max(dr)).max(0)
}

fn pawn_advancement(color: Color, sq: crate::square::Square) -> i32 {
    let rank = rank_of(sq) as i32;
    let advanced = match color {
        Color::White => rank - 2,
        Color::Black => 7 - rank,
    };
    advanced.max(0) * 8
}

fn pawn_center_bonus(color: Color, sq: crate::square::Square) -> i32 {
    let (big, small) = match color {
        Color::White => ([square_of(4, 4), square_of(5, 4)], [square_of(4, 3), square_of(5, 3)]),
        Color::Black => ([square_of(4, 5), square_of(5, 5)], [square_of(4, 6), square_of(5, 6)]),
    };
    if big.contains(&sq) {
        20
    } else if small.contains(&sq) {
        10
    } else {
        0
    }
}

fn king_pst(sq: crate::square::Square) -> i32 {
    // Discourages a central king in the opening; mirrors centralization but
    // with the sign flipped and scaled down.
    -centralization_bonus(sq) / 2
}

/// Friendly pawns on the three squares directly in front of the king
/// (NW/N/NE for White, SW/S/SE for Black). This intentionally reproduces the
/// source's linear-offset indexing bug rather than using the direction
/// array: `king + i` for `i` in 0..3, not `king + shield_dirs[i]`. Left
/// uncorrected per the design note — see DESIGN.md.
fn king_shield_bonus(board: &Board, color: Color, king_sq: crate::square::Square) -> i32 {
    let mut bonus = 0;
    for i in 0..3i32 {
        let probe = king_sq as i32 + i;
        if crate::square::in_bounds(probe) {
            if let Some(p) = board.piece_at(probe as crate::square::Square) {
                if p.color == color && p.kind == PieceType::Pawn {
                    bonus += 6;
                }
            }
        }
    }
    bonus
}

fn rook_file_bonus(board: &Board, color: Color, sq: crate::square::Square) -> i32 {
    let back_rank = match color {
        Color::White => 1,
        Color::Black => 8,
    };
    if rank_of(sq) != back_rank {
        return 0;
    }
    let file = file_of(sq) + 1; // back to square_of's 1-based convention
    let (mut own_pawn, mut enemy_pawn) = (false, false);
    for rank in 1..=8u8 {
        let probe = square_of(file, rank);
        if let Some(p) = board.piece_at(probe) {
            if p.kind == PieceType::Pawn {
                if p.color == color {
                    own_pawn = true;
                } else {
                    enemy_pawn = true;
                }
            }
        }
    }
    if !own_pawn && !enemy_pawn {
        10
    } else if !own_pawn && enemy_pawn {
        5
    } else {
        0
    }
}

fn rook_seventh_rank_bonus(board: &Board, color: Color, sq: crate::square::Square) -> i32 {
    let seventh = match color {
        Color::White => 7,
        Color::Black => 2,
    };
    if rank_of(sq) != seventh {
        return 0;
    }
    let mut count = 0;
    for file in 1..=8u8 {
        let probe = square_of(file, seventh);
        if let Some(p) = board.piece_at(probe) {
            if p.kind == PieceType::Pawn && p.color != color {
                count += 1;
            }
        }
    }
    count * 3
}

fn score_piece(board: &Board, piece: Piece, sq: crate::square::Square) -> ScorePair {
    let mut pair = ScorePair::default();
    let material = material_value(piece.kind);
    pair.add(material, material);

    match piece.kind {
        PieceType::Pawn => {
            let advance = pawn_advancement(piece.color, sq);
            pair.add(advance, advance);
            pair.add(pawn_center_bonus(piece.color, sq), 0);
        }
        PieceType::Knight | PieceType::Bishop => {
            let c = centralization_bonus(sq);
            pair.add(c, c);
        }
        PieceType::Rook => {
            pair.add(rook_file_bonus(board, piece.color, sq), 0);
            pair.add(0, rook_seventh_rank_bonus(board, piece.color, sq));
        }
        PieceType::Queen => {
            let c = centralization_bonus(sq);
            pair.add(0, c / 2);
        }
        PieceType::King => {
            pair.add(king_shield_bonus(board, piece.color, sq), 0);
            pair.add(king_pst(sq), 0);
        }
    }
    pair
}

/// Returns an integer from the side-to-move's point of view.
pub fn static_eval(board: &Board) -> i32 {
    let mut white = ScorePair::default();
    let mut black = ScorePair::default();
    let mut phase = PHASE_TOTAL;

    for row in 2..=9i32 {
        for col in 2..=9i32 {
            let sq = (row * 12 + col) as crate::square::Square;
            if let Cell::Occupied(piece) = board.cell(sq) {
                phase -= phase_weight(piece.kind);
                let pair = score_piece(board, piece, sq);
                match piece.color {
                    Color::White => {
                        white.opening += pair.opening;
                        white.endgame += pair.endgame;
                    }
                    Color::Black => {
                        black.opening += pair.opening;
                        black.endgame += pair.endgame;
                    }
                }
            }
        }
    }
    let phase = phase.max(0);

    let delta_opening = white.opening - black.opening;
    let delta_endgame = white.endgame - black.endgame;
    let score =
        (delta_opening * (PHASE_TOTAL - phase) + delta_endgame * phase) / PHASE_TOTAL;

    match board.side_to_move {
        Some(Color::Black) => -score,
        _ => score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn startpos_is_symmetric() {
        let board = Board::starting_position();
        assert_eq!(static_eval(&board), 0);
    }

    #[test]
    fn extra_queen_is_strongly_favored() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert!(static_eval(&board) > 800);
    }

    #[test]
    fn eval_flips_sign_with_side_to_move() {
        let white_to_move = Board::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        let black_to_move = Board::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").unwrap();
        assert_eq!(static_eval(&white_to_move), -static_eval(&black_to_move));
    }
}
