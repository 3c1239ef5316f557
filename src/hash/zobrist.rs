//! Zobrist key material: one random word per (piece, square), one for
//! side-to-move, one per castling right, one per en-passant file.

use once_cell::sync::OnceCell;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::castle_bits::{CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ};
#[cfg(test)]
use crate::square::{Color, PieceType};

pub struct ZobristKeys {
    /// [color][piece_type - 1][square 0..64]
    piece: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 4],
    ep_file: [u64; 8],
}

impl ZobristKeys {
    pub fn piece_square(&self, piece: crate::square::Piece, sq8: usize) -> u64 {
        self.piece[piece.color.index()][piece.kind as usize - 1][sq8]
    }

    pub fn side_to_move(&self) -> u64 {
        self.side_to_move
    }

    pub fn castling_bit(&self, bit: u8) -> u64 {
        match bit {
            CASTLE_WK => self.castling[0],
            CASTLE_WQ => self.castling[1],
            CASTLE_BK => self.castling[2],
            CASTLE_BQ => self.castling[3],
            _ => 0,
        }
    }

    pub fn en_passant_file(&self, file: u8) -> u64 {
        self.ep_file[(file as usize) % 8]
    }
}

fn generate_with_rng(rng: &mut StdRng) -> ZobristKeys {
    let mut piece = [[[0u64; 64]; 6]; 2];
    for c in 0..2 {
        for k in 0..6 {
            for s in 0..64 {
                piece[c][k][s] = rng.random();
            }
        }
    }
    let side_to_move = rng.random();
    let mut castling = [0u64; 4];
    for c in castling.iter_mut() {
        *c = rng.random();
    }
    let mut ep_file = [0u64; 8];
    for f in ep_file.iter_mut() {
        *f = rng.random();
    }
    ZobristKeys {
        piece,
        side_to_move,
        castling,
        ep_file,
    }
}

static KEYS: OnceCell<ZobristKeys> = OnceCell::new();

/// Memoized, process-lifetime Zobrist key table. Seeded deterministically
/// under the `deterministic_zobrist` feature (stable across runs, useful for
/// reproducible perft/fuzz tests); otherwise seeded from OS randomness.
pub fn zobrist_keys() -> &'static ZobristKeys {
    KEYS.get_or_init(|| {
        let mut rng = if cfg!(feature = "deterministic_zobrist") {
            StdRng::seed_from_u64(0xC0FFEE)
        } else {
            StdRng::from_rng(&mut rand::rng())
        };
        generate_with_rng(&mut rng)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_memoized() {
        let a = zobrist_keys() as *const ZobristKeys;
        let b = zobrist_keys() as *const ZobristKeys;
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_piece_square_words() {
        let keys = zobrist_keys();
        let wp = crate::square::Piece::new(Color::White, PieceType::Pawn);
        let bp = crate::square::Piece::new(Color::Black, PieceType::Pawn);
        assert_ne!(keys.piece_square(wp, 0), keys.piece_square(bp, 0));
        assert_ne!(keys.piece_square(wp, 0), keys.piece_square(wp, 1));
    }
}
