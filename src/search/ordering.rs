//! Move ordering: hash-move priority, MVV/LVA for captures, history
//! heuristic for everything else.

use crate::moves::types::{Move, MoveList};
use crate::square::{to8x8, Piece};

const HASH_MOVE_SCORE: i32 = 100_000_000;
const CAPTURE_BASE: i32 = 10_000;
pub const HISTORY_OVERFLOW: i32 = 9_000;
pub const HISTORY_AGING_DIVISOR: i32 = 8;

/// `[piece_index][destination_8x8]`, 12 rows by 64 columns.
pub struct HistoryTable {
    counters: [[i32; 64]; 12],
}

impl HistoryTable {
    pub fn new() -> Self {
        HistoryTable { counters: [[0; 64]; 12] }
    }

    pub fn clear(&mut self) {
        self.counters = [[0; 64]; 12];
    }

    pub fn score(&self, piece: Piece, dest8: usize) -> i32 {
        self.counters[piece.piece_index()][dest8]
    }

    /// Rewards a quiet move that raised alpha or caused a cutoff. Ages all
    /// counters by dividing by 8 if any counter exceeds 9,000.
    pub fn update(&mut self, piece: Piece, dest8: usize, depth: i32) {
        self.counters[piece.piece_index()][dest8] += depth;
        if self.counters.iter().flatten().any(|&c| c > HISTORY_OVERFLOW) {
            for row in self.counters.iter_mut() {
                for c in row.iter_mut() {
                    *c /= HISTORY_AGING_DIVISOR;
                }
            }
        }
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Scores one move given an optional hash-move hint and the history table.
pub fn score_move(mv: &Move, hint: Option<Move>, history: &HistoryTable) -> i32 {
    if let Some(hint_mv) = hint {
        if *mv == hint_mv {
            return HASH_MOVE_SCORE;
        }
    }
    if let Some(captured) = mv.captured {
        let victim = captured.kind as i32;
        let attacker = mv.piece.kind as i32;
        let mut inner = victim * 6 + 5 - attacker;
        if mv.is_promotion() {
            inner -= 5;
        }
        return inner * CAPTURE_BASE;
    }
    history.score(mv.piece, to8x8(mv.to))
}

/// Scores every move in `moves` and sorts descending.
pub fn order_moves(moves: &mut MoveList, hint: Option<Move>, history: &HistoryTable) {
    for mv in moves.iter_mut() {
        mv.score = score_move(mv, hint, history);
    }
    moves.sort_by(|a, b| b.score.cmp(&a.score));
}
